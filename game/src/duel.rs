use serde::Serialize;

use crate::arena::Arena;
use crate::config::Tuning;
use crate::direction::Direction;
use crate::grid::{Cell, Grid};

mod accumulator;
mod agent;
mod boost;
mod bot;
mod resolver;

use accumulator::{FrameClock, Ready};
pub use agent::{Agent, AgentId};
pub use boost::Boost;
use resolver::{PlannedMove, Resolution, resolve};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Winner(AgentId),
    Draw,
}

impl Outcome {
    pub fn is_defeated(self, agent: AgentId) -> bool {
        match self {
            Outcome::Winner(winner) => winner != agent,
            Outcome::Draw => true,
        }
    }
}

/// Player input gathered since the previous frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intent {
    pub heading: Option<Direction>,
    pub boost_held: bool,
}

/// Read-only view of a match for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub arena: String,
    pub score: u32,
    pub outcome: Option<Outcome>,
    pub human_defeated: bool,
    pub bot_defeated: bool,
    pub boost: f32,
}

/// One duel from the first step to the first collision.
///
/// Once an outcome is set the match is frozen: no grid or agent state changes.
#[derive(Clone, Debug)]
pub struct Match {
    arena: String,
    tuning: Tuning,
    grid: Grid,
    human: Agent,
    bot: Agent,
    score: u32,
    outcome: Option<Outcome>,
}

impl Match {
    pub fn new(arena: &Arena) -> Self {
        let (width, height) = arena.size();
        let mut grid = Grid::new(width, height);
        let human = Agent::new(AgentId::Human, arena.human);
        let bot = Agent::new(AgentId::Bot, arena.bot);
        grid.set(human.position, Cell::Trail(AgentId::Human));
        grid.set(bot.position, Cell::Trail(AgentId::Bot));
        Self {
            arena: arena.name.clone(),
            tuning: arena.tuning,
            grid,
            human,
            bot,
            score: 0,
            outcome: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        match id {
            AgentId::Human => &self.human,
            AgentId::Bot => &self.bot,
        }
    }

    fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        match id {
            AgentId::Human => &mut self.human,
            AgentId::Bot => &mut self.bot,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            arena: self.arena.clone(),
            score: self.score(),
            outcome: self.outcome(),
            human_defeated: self.human.is_defeated(),
            bot_defeated: self.bot.is_defeated(),
            boost: self.human.boost_level(),
        }
    }

    /// Simulate `dt` seconds of wall-clock time. Returns the number of micro-steps run.
    pub(crate) fn advance(&mut self, dt: f32, intent: Intent) -> u32 {
        if self.is_over() {
            return 0;
        }
        if let Some(heading) = intent.heading {
            self.human.buffer_heading(heading);
        }

        let boosting = self.human.boost.update(intent.boost_held, dt, &self.tuning);
        self.human
            .owed
            .accrue(dt, self.tuning.steps_per_second(boosting));
        self.bot
            .owed
            .accrue(dt, self.tuning.steps_per_second(false));

        let mut micro_steps = 0;
        while micro_steps < self.tuning.max_steps_per_frame && !self.is_over() {
            let ready = Ready::of(&self.human.owed, &self.bot.owed);
            if !ready.any() {
                break;
            }
            if ready.human {
                self.human.owed.consume();
            }
            if ready.bot {
                self.bot.owed.consume();
            }
            self.step(ready);
            micro_steps += 1;
        }
        micro_steps
    }

    /// Resolve one micro-step for the agents in `ready`.
    pub(crate) fn step(&mut self, ready: Ready) {
        // Both headings are chosen from the grid and positions as they were before this step.
        let human = ready.human.then(|| self.human.take_pending_heading());
        let bot = ready
            .bot
            .then(|| bot::choose_heading(&self.grid, &self.bot, self.human.position));
        self.step_with(human, bot);
    }

    /// Resolve one micro-step with explicit headings. `None` sits that agent out.
    pub(crate) fn step_with(&mut self, human: Option<Direction>, bot: Option<Direction>) {
        if self.is_over() {
            return;
        }
        let moves: Vec<PlannedMove> = [(AgentId::Human, human), (AgentId::Bot, bot)]
            .into_iter()
            .filter_map(|(id, heading)| Some(self.plan(id, heading?)))
            .collect();
        self.apply(&moves);
    }

    fn plan(&self, id: AgentId, heading: Direction) -> PlannedMove {
        PlannedMove {
            agent: id,
            heading,
            to: self.agent(id).position + heading.delta(),
        }
    }

    fn apply(&mut self, moves: &[PlannedMove]) {
        match resolve(&self.grid, moves) {
            Resolution::Advance => {
                for m in moves {
                    self.grid.set(m.to, Cell::Trail(m.agent));
                    let agent = self.agent_mut(m.agent);
                    agent.turn(m.heading);
                    agent.position = m.to;
                }
                self.score += 1;
            }
            Resolution::End(outcome) => self.finish(outcome),
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        for id in [AgentId::Human, AgentId::Bot] {
            self.agent_mut(id).defeated = outcome.is_defeated(id);
        }
        self.outcome = Some(outcome);
        log::info!(
            "match on {} over after {} steps ({} cells claimed): {outcome:?}",
            self.arena,
            self.score,
            self.grid.occupied_count()
        );
    }
}

/// Drives matches on one arena from the host's frame loop.
///
/// The host calls [`Duel::frame`] once per rendered frame with a monotonic
/// timestamp and the input gathered since the previous frame. After
/// [`Duel::teardown`] the duel is halted and no further state changes happen.
pub struct Duel {
    arena: Arena,
    current: Match,
    clock: FrameClock,
    halted: bool,
}

impl Duel {
    pub fn new(arena: &Arena) -> Self {
        log::info!("starting duel on {}", arena.name);
        Self {
            arena: arena.clone(),
            current: Match::new(arena),
            clock: FrameClock::new(arena.tuning.max_frame_seconds),
            halted: false,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn current(&self) -> &Match {
        &self.current
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.current.snapshot()
    }

    /// Advance the current match to time `now` (seconds). Returns the micro-steps run.
    pub fn frame(&mut self, now: f64, intent: Intent) -> u32 {
        if self.halted {
            return 0;
        }
        let dt = self.clock.tick(now);
        self.current.advance(dt, intent)
    }

    /// Replace the current match with a fresh one on the same arena.
    pub fn restart(&mut self) {
        if self.halted {
            return;
        }
        log::info!("restarting duel on {}", self.arena.name);
        self.current = Match::new(&self.arena);
        self.clock.reset();
    }

    pub fn teardown(&mut self) {
        if !self.halted {
            log::info!("duel on {} torn down", self.arena.name);
        }
        self.halted = true;
    }
}

#[cfg(test)]
mod tests;
