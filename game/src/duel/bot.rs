use crate::direction::Direction;
use crate::grid::{Grid, Occupancy};
use crate::position::Position;

use super::Agent;

/// Cells checked beyond each candidate when scoring a heading.
const LOOKAHEAD: i32 = 3;
const DANGER_WEIGHT: i32 = 4;

/// Pick the bot's heading for its next logical step.
///
/// Safe candidates (free immediate cell) always beat unsafe ones. Among equals
/// the score is closeness to `target` minus a penalty for blocked cells straight
/// ahead of the candidate. Ties go to the first heading in `Direction::ALL`.
pub(crate) fn choose_heading(grid: &Grid, bot: &Agent, target: Position) -> Direction {
    let mut best: Option<(bool, i32, Direction)> = None;
    for dir in bot.heading.turns() {
        let candidate = bot.position + dir.delta();
        let safe = grid.classify(candidate) == Occupancy::Free;
        let score = -candidate.manhattan(target) - DANGER_WEIGHT * danger(grid, candidate, dir);
        if best.is_none_or(|(best_safe, best_score, _)| (safe, score) > (best_safe, best_score)) {
            best = Some((safe, score, dir));
        }
    }
    let Some((safe, score, dir)) = best else {
        return bot.heading;
    };
    log::debug!(
        "bot at {:?} heads {dir:?} (score {score}{})",
        bot.position,
        if safe { "" } else { ", cornered" }
    );
    dir
}

fn danger(grid: &Grid, from: Position, dir: Direction) -> i32 {
    (1..=LOOKAHEAD)
        .filter(|&n| grid.classify(from + dir.delta() * n) != Occupancy::Free)
        .count() as i32
}
