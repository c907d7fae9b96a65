use crate::direction::Direction;
use crate::grid::{Grid, Occupancy};
use crate::position::Position;

use super::{AgentId, Outcome};

/// One agent's intended logical step for the current micro-step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PlannedMove {
    pub(crate) agent: AgentId,
    pub(crate) heading: Direction,
    pub(crate) to: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Every planned move lands on a free, distinct cell.
    Advance,
    End(Outcome),
}

/// Resolve the moves of every ready agent against the pre-step grid.
///
/// The grid is only borrowed immutably, so no move can block or unblock another
/// within the same micro-step and the order of `moves` has no effect.
pub(crate) fn resolve(grid: &Grid, moves: &[PlannedMove]) -> Resolution {
    debug_assert!(moves.len() <= 2, "a duel has two agents");

    if let [a, b] = moves
        && a.to == b.to
    {
        log::debug!("head-on collision at {:?}", a.to);
        return Resolution::End(Outcome::Draw);
    }

    let mut faults = moves
        .iter()
        .filter(|m| grid.classify(m.to) != Occupancy::Free)
        .inspect(|m| {
            log::debug!(
                "{:?} crashed moving {:?} into {:?} ({:?})",
                m.agent,
                m.heading,
                m.to,
                grid.classify(m.to)
            )
        })
        .map(|m| m.agent);

    match (faults.next(), faults.next()) {
        (None, _) => Resolution::Advance,
        (Some(loser), None) => Resolution::End(Outcome::Winner(loser.rival())),
        (Some(_), Some(_)) => Resolution::End(Outcome::Draw),
    }
}
