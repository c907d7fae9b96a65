use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("boost_multiplier must exceed 1, got {0}")]
    WeakBoost(f32),

    #[error("max_steps_per_frame must be at least 1")]
    ZeroStepCap,

    #[error("a capped frame can accrue {accrued:.2} steps, above the per-frame cap of {cap}")]
    StepDebt { accrued: f32, cap: u32 },
}

/// Speed and boost parameters for a match. Arena files may override any subset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Logical steps per second for an agent that is not boosting.
    pub base_steps_per_second: f32,
    pub boost_multiplier: f32,
    /// Fraction of a full boost bar spent per second while boost is held.
    pub boost_drain_per_second: f32,
    /// Fraction of a full boost bar recovered per second while boost is released.
    pub boost_regen_per_second: f32,
    /// Upper bound on the simulated time of a single frame.
    pub max_frame_seconds: f32,
    pub max_steps_per_frame: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_steps_per_second: 12.0,
            boost_multiplier: 1.8,
            boost_drain_per_second: 0.6,
            boost_regen_per_second: 0.25,
            max_frame_seconds: 0.25,
            max_steps_per_frame: 20,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("base_steps_per_second", self.base_steps_per_second),
            ("boost_drain_per_second", self.boost_drain_per_second),
            ("boost_regen_per_second", self.boost_regen_per_second),
            ("max_frame_seconds", self.max_frame_seconds),
        ] {
            // Written negated so NaN is rejected too.
            if !(value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !(self.boost_multiplier > 1.0) {
            return Err(ConfigError::WeakBoost(self.boost_multiplier));
        }
        if self.max_steps_per_frame == 0 {
            return Err(ConfigError::ZeroStepCap);
        }
        let accrued = self.max_frame_seconds * self.steps_per_second(true);
        if accrued > self.max_steps_per_frame as f32 {
            return Err(ConfigError::StepDebt {
                accrued,
                cap: self.max_steps_per_frame,
            });
        }
        Ok(())
    }

    pub fn steps_per_second(&self, boosting: bool) -> f32 {
        if boosting {
            self.base_steps_per_second * self.boost_multiplier
        } else {
            self.base_steps_per_second
        }
    }
}
