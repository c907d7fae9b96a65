use crate::config::Tuning;

/// Depletable speed resource in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boost {
    level: f32,
}

impl Boost {
    pub fn full() -> Self {
        Self { level: 1.0 }
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Advance the resource by one frame. Returns whether the frame is boosted.
    ///
    /// Drain and regeneration are proportional to elapsed time, not to steps taken.
    pub(crate) fn update(&mut self, held: bool, dt: f32, tuning: &Tuning) -> bool {
        let boosting = held && self.level > 0.0;
        if held {
            self.level -= tuning.boost_drain_per_second * dt;
        } else {
            self.level += tuning.boost_regen_per_second * dt;
        }
        self.level = self.level.clamp(0.0, 1.0);
        boosting
    }
}
