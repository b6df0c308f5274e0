//! Drag tracking for the sidebar logo.
//!
//! The logo can only be pulled downward. Its vertical offset runs through a
//! [`Spring`], and every change of the eased value re-derives whether the save
//! button is revealed.

use std::time::Duration;

use tracing::debug;

use crate::layout::{LayoutMetrics, LayoutProbe};
use crate::motion::{Spring, SpringConfig};

/// Pointer coordinates in CSS pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement of the dragged element from its rest position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragPosition {
    pub x: f64,
    pub y: f64,
}

/// Bounds for the drag offset. `None` leaves a side free.
///
/// `left`/`right` bound `x` from below/above and `top`/`bottom` bound `y`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragConstraints {
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
}

impl DragConstraints {
    /// Downward-only dragging: no horizontal movement, nothing above rest.
    pub fn downward_only() -> Self {
        Self {
            left: Some(0.0),
            right: Some(0.0),
            top: Some(0.0),
            bottom: None,
        }
    }

    /// Clamp a raw offset into the allowed region.
    pub fn clamp(&self, raw: DragPosition) -> DragPosition {
        DragPosition {
            x: clamp_axis(raw.x, self.left, self.right),
            y: clamp_axis(raw.y, self.top, self.bottom),
        }
    }
}

fn clamp_axis(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let value = min.map_or(value, |min| value.max(min));
    max.map_or(value, |max| value.min(max))
}

/// Whether the save button shows at vertical offset `y`, or `None` when the
/// layout is not measured.
pub fn save_visible_at(y: f64, metrics: LayoutMetrics) -> Option<bool> {
    metrics.save_threshold().map(|threshold| y >= threshold)
}

/// The derived save-button flag.
///
/// [`SaveVisibility::recompute`] is its only writer, so the flag always
/// equals the comparison for the last offset that had measurements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveVisibility {
    visible: bool,
}

impl SaveVisibility {
    pub fn get(&self) -> bool {
        self.visible
    }

    /// Re-derive the flag from `y` and `metrics`.
    ///
    /// Unmeasured layout keeps the previous value. Returns true if the flag
    /// flipped.
    pub fn recompute(&mut self, y: f64, metrics: LayoutMetrics) -> bool {
        match save_visible_at(y, metrics) {
            Some(visible) => {
                let changed = self.visible != visible;
                self.visible = visible;
                changed
            }
            None => false,
        }
    }
}

/// Reveal state of the drag-to-save interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealState {
    /// Save button hidden, logo at full size.
    #[default]
    Hidden,
    /// Save button shown, logo region collapsed to zero height.
    Revealed,
}

impl RevealState {
    pub fn from_visible(visible: bool) -> Self {
        if visible {
            Self::Revealed
        } else {
            Self::Hidden
        }
    }

    /// Returns true if the logo region renders with zero height.
    pub fn collapses_logo(&self) -> bool {
        matches!(self, Self::Revealed)
    }
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    pointer_origin: Point,
    offset_origin: DragPosition,
}

/// Tracks a pointer drag on the logo and derives save-button visibility.
#[derive(Debug, Clone)]
pub struct DragTracker {
    constraints: DragConstraints,
    x: f64,
    y: Spring,
    gesture: Option<Gesture>,
    save_visible: SaveVisibility,
}

impl DragTracker {
    /// Create a tracker at rest with downward-only constraints.
    pub fn new(spring: SpringConfig) -> Self {
        Self::with_constraints(spring, DragConstraints::downward_only())
    }

    pub fn with_constraints(spring: SpringConfig, constraints: DragConstraints) -> Self {
        Self {
            constraints,
            x: 0.0,
            y: Spring::new(0.0, spring),
            gesture: None,
            save_visible: SaveVisibility::default(),
        }
    }

    /// Start a gesture at `pointer`.
    pub fn begin(&mut self, pointer: Point) {
        self.gesture = Some(Gesture {
            pointer_origin: pointer,
            offset_origin: self.position(),
        });
    }

    /// Feed a pointer move. Returns false if no gesture is active.
    ///
    /// The horizontal offset follows immediately; the vertical offset becomes
    /// the spring target and eases in on later ticks.
    pub fn move_to(&mut self, pointer: Point) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };

        let raw = DragPosition {
            x: gesture.offset_origin.x + (pointer.x - gesture.pointer_origin.x),
            y: gesture.offset_origin.y + (pointer.y - gesture.pointer_origin.y),
        };
        let clamped = self.constraints.clamp(raw);

        self.x = clamped.x;
        self.y.set(clamped.y);
        true
    }

    /// Release the gesture. The offset stays where it was dragged to.
    pub fn end(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    /// Advance the vertical spring. Returns the new offset if it changed.
    pub fn tick(&mut self, dt: Duration, probe: &impl LayoutProbe) -> Option<f64> {
        let latest = self.y.tick(dt)?;
        self.on_offset_change(latest, probe);
        Some(latest)
    }

    /// Snap the vertical offset to rest, without easing.
    pub fn jump_to_rest(&mut self, probe: &impl LayoutProbe) {
        self.y.jump(0.0);
        self.on_offset_change(self.y.get(), probe);
    }

    /// Current (eased) offset.
    pub fn position(&self) -> DragPosition {
        DragPosition {
            x: self.x,
            y: self.y.get(),
        }
    }

    pub fn is_animating(&self) -> bool {
        self.y.is_animating()
    }

    pub fn save_visible(&self) -> bool {
        self.save_visible.get()
    }

    pub fn reveal_state(&self) -> RevealState {
        RevealState::from_visible(self.save_visible())
    }

    fn on_offset_change(&mut self, latest: f64, probe: &impl LayoutProbe) {
        let metrics = probe.measure();
        if self.save_visible.recompute(latest, metrics) {
            debug!(
                y = latest,
                threshold = ?metrics.save_threshold(),
                visible = self.save_visible.get(),
                "Save visibility changed"
            );
        }
    }
}
