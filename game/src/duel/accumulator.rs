/// Converts monotonic frame timestamps into capped frame deltas.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FrameClock {
    last: Option<f64>,
    max_frame_seconds: f32,
}

impl FrameClock {
    pub(crate) fn new(max_frame_seconds: f32) -> Self {
        Self {
            last: None,
            max_frame_seconds,
        }
    }

    /// Seconds of simulation owed for the frame stamped `now`.
    ///
    /// The first frame after creation or a reset yields zero, as does a clock that
    /// steps backwards. Long stalls are clamped to `max_frame_seconds`.
    pub(crate) fn tick(&mut self, now: f64) -> f32 {
        let dt = match self.last {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last = Some(now);
        (dt as f32).min(self.max_frame_seconds)
    }

    pub(crate) fn reset(&mut self) {
        self.last = None;
    }
}

/// Fractional count of logical steps an agent is owed. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct StepAccumulator {
    owed: f32,
}

impl StepAccumulator {
    pub(crate) fn accrue(&mut self, dt: f32, steps_per_second: f32) {
        self.owed += (dt * steps_per_second).max(0.0);
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.owed >= 1.0
    }

    pub(crate) fn consume(&mut self) {
        debug_assert!(self.is_ready(), "consumed a step that was not owed");
        self.owed = (self.owed - 1.0).max(0.0);
    }

    pub(crate) fn owed(&self) -> f32 {
        self.owed
    }
}

/// Which agents take a logical step in one micro-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct Ready {
    pub(crate) human: bool,
    pub(crate) bot: bool,
}

impl Ready {
    pub(crate) fn of(human: &StepAccumulator, bot: &StepAccumulator) -> Self {
        Self {
            human: human.is_ready(),
            bot: bot.is_ready(),
        }
    }

    pub(crate) fn any(self) -> bool {
        self.human || self.bot
    }
}
