//! Measured layout heights.

/// The two heights the reveal threshold is derived from.
///
/// A height is `None` while its element is not mounted or not laid out yet.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutMetrics {
    /// Client height of the sidebar container.
    pub container_height: Option<f64>,
    /// Client height of the draggable logo.
    pub logo_height: Option<f64>,
}

impl LayoutMetrics {
    /// Metrics with both heights measured.
    ///
    /// A zero height counts as not measured: an element that has not been laid
    /// out reports a client height of 0.
    pub fn measured(container_height: f64, logo_height: f64) -> Self {
        Self {
            container_height: available(container_height),
            logo_height: available(logo_height),
        }
    }

    /// Metrics with nothing measured yet.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Vertical offset at which the save button is revealed, if both heights
    /// are known.
    pub fn save_threshold(&self) -> Option<f64> {
        match (self.container_height, self.logo_height) {
            (Some(container), Some(logo)) => Some(container - logo),
            _ => None,
        }
    }
}

fn available(height: f64) -> Option<f64> {
    (height.is_finite() && height != 0.0).then_some(height)
}

/// Source of fresh layout measurements.
pub trait LayoutProbe {
    /// Read the current heights from the rendered layout.
    fn measure(&self) -> LayoutMetrics;
}

impl LayoutProbe for LayoutMetrics {
    fn measure(&self) -> LayoutMetrics {
        *self
    }
}

impl<F> LayoutProbe for F
where
    F: Fn() -> LayoutMetrics,
{
    fn measure(&self) -> LayoutMetrics {
        self()
    }
}
