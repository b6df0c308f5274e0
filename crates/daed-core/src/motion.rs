//! Eased motion values.
//!
//! The logo offset follows the pointer through a spring instead of jumping to
//! it, so the rendered value lags the raw input and converges exponentially.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Longest simulated step inside one tick (seconds).
const MAX_STEP_SECS: f64 = 1.0 / 240.0;

/// Longest elapsed time honored by a single tick (seconds). A frame callback
/// that resumes after a long pause should not replay the whole pause.
const MAX_TICK_SECS: f64 = 0.1;

/// Physical parameters of a [`Spring`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Spring constant. Higher means snappier.
    pub stiffness: f64,
    /// Opposing force proportional to velocity.
    pub damping: f64,
    /// Mass of the moving value.
    pub mass: f64,
    /// Distance to target under which the spring may settle.
    pub rest_delta: f64,
    /// Speed under which the spring may settle.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 10.0,
            mass: 1.0,
            rest_delta: 0.01,
            rest_speed: 0.01,
        }
    }
}

impl SpringConfig {
    /// Reject parameters that make the simulation diverge or never settle.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("stiffness", self.stiffness),
            ("damping", self.damping),
            ("mass", self.mass),
            ("rest_delta", self.rest_delta),
            ("rest_speed", self.rest_speed),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CoreError::InvalidConfig(format!(
                "spring.{name} must be finite, got {value}"
            )));
        }

        if self.mass <= 0.0 {
            return Err(invalid("spring.mass must be positive", self.mass));
        }
        if self.stiffness <= 0.0 {
            return Err(invalid("spring.stiffness must be positive", self.stiffness));
        }
        if self.damping < 0.0 {
            return Err(invalid("spring.damping must not be negative", self.damping));
        }
        if self.rest_delta <= 0.0 {
            return Err(invalid("spring.rest_delta must be positive", self.rest_delta));
        }
        if self.rest_speed <= 0.0 {
            return Err(invalid("spring.rest_speed must be positive", self.rest_speed));
        }
        Ok(())
    }
}

fn invalid(message: &str, value: f64) -> CoreError {
    CoreError::InvalidConfig(format!("{message}, got {value}"))
}

/// A value that eases toward its target when advanced by [`Spring::tick`].
#[derive(Debug, Clone)]
pub struct Spring {
    config: SpringConfig,
    current: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Create a spring at rest on `initial`.
    pub fn new(initial: f64, config: SpringConfig) -> Self {
        Self {
            config,
            current: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Current (eased) value.
    pub fn get(&self) -> f64 {
        self.current
    }

    /// Value the spring is heading to.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Current velocity in units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Returns true while the spring has not settled on its target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target || self.velocity != 0.0
    }

    /// Start easing toward `target`. The current value is unchanged until the
    /// next tick.
    pub fn set(&mut self, target: f64) {
        self.target = target;
    }

    /// Move to `value` immediately, cancelling any animation.
    ///
    /// Returns `Some(value)` if the current value changed.
    pub fn jump(&mut self, value: f64) -> Option<f64> {
        let changed = self.current != value;
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
        changed.then_some(value)
    }

    /// Advance the simulation by `dt`.
    ///
    /// Returns `Some(new_value)` if the current value changed.
    pub fn tick(&mut self, dt: Duration) -> Option<f64> {
        if !self.is_animating() {
            return None;
        }

        let before = self.current;
        let mut remaining = dt.as_secs_f64().min(MAX_TICK_SECS);

        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECS);
            let displacement = self.current - self.target;
            let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;

            // Semi-implicit Euler: velocity first, then position.
            self.velocity += force / self.config.mass * step;
            self.current += self.velocity * step;
            remaining -= step;

            if self.is_settled() {
                self.current = self.target;
                self.velocity = 0.0;
                break;
            }
        }

        (self.current != before).then_some(self.current)
    }

    fn is_settled(&self) -> bool {
        self.velocity.abs() < self.config.rest_speed
            && (self.current - self.target).abs() < self.config.rest_delta
    }
}
