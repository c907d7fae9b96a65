use serde::Serialize;

use crate::arena::Start;
use crate::direction::Direction;
use crate::position::Position;

use super::accumulator::StepAccumulator;
use super::boost::Boost;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AgentId {
    Human,
    Bot,
}

impl AgentId {
    pub fn rival(self) -> AgentId {
        match self {
            AgentId::Human => AgentId::Bot,
            AgentId::Bot => AgentId::Human,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Agent {
    pub(crate) id: AgentId,
    pub(crate) position: Position,
    pub(crate) heading: Direction,
    /// Last requested heading not yet consumed by a logical step.
    pub(crate) pending_heading: Option<Direction>,
    pub(crate) boost: Boost,
    pub(crate) owed: StepAccumulator,
    pub(crate) defeated: bool,
}

impl Agent {
    pub(crate) fn new(id: AgentId, start: Start) -> Self {
        Self {
            id,
            position: start.position,
            heading: start.heading,
            pending_heading: None,
            boost: Boost::full(),
            owed: StepAccumulator::default(),
            defeated: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn boost_level(&self) -> f32 {
        self.boost.level()
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub(crate) fn buffer_heading(&mut self, heading: Direction) {
        self.pending_heading = Some(heading);
    }

    /// Consume the buffered heading. A reversal is dropped in favour of the current heading.
    pub(crate) fn take_pending_heading(&mut self) -> Direction {
        match self.pending_heading.take() {
            Some(heading) if !heading.is_reverse_of(self.heading) => heading,
            _ => self.heading,
        }
    }

    pub(crate) fn turn(&mut self, heading: Direction) {
        debug_assert!(
            !heading.is_reverse_of(self.heading),
            "{:?} reversed from {:?} to {heading:?}",
            self.id,
            self.heading
        );
        self.heading = heading;
    }
}
