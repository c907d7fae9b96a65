use std::sync::LazyLock;

use crate::config::Tuning;
use crate::direction::Direction;
use crate::position::Position;

mod parse;
pub use parse::ArenaError;

include!(concat!(env!("OUT_DIR"), "/arenas.rs"));

pub const DEFAULT_ARENA: &str = "classic";

/// Where an agent begins a match and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Start {
    pub position: Position,
    pub heading: Direction,
}

impl Start {
    #[cfg(test)]
    pub(crate) const fn new(x: i32, y: i32, heading: Direction) -> Self {
        Self {
            position: Position::new(x, y),
            heading,
        }
    }
}

/// Board size, starting layout and tuning for a match.
#[derive(Clone, Debug, PartialEq)]
pub struct Arena {
    pub(crate) name: String,
    pub(crate) display_name: String,
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) human: Start,
    pub(crate) bot: Start,
    pub(crate) tuning: Tuning,
}

impl Arena {
    /// An arena with no obstacles and default tuning.
    #[cfg(test)]
    pub(crate) fn open(name: &str, width: usize, height: usize, human: Start, bot: Start) -> Self {
        Self {
            name: name.to_string(),
            display_name: name.to_string(),
            width,
            height,
            human,
            bot,
            tuning: Tuning::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

static ARENAS: LazyLock<Vec<Arena>> = LazyLock::new(|| {
    ARENA_DATA
        .iter()
        .map(|&(name, csv, json)| {
            Arena::parse(name, csv, json)
                .unwrap_or_else(|e| panic!("embedded arena {name} is invalid: {e}"))
        })
        .collect()
});

pub fn all() -> &'static [Arena] {
    &ARENAS
}

pub fn get_arena(name: &str) -> Option<&'static Arena> {
    ARENAS.iter().find(|a| a.name == name)
}

/// Look up an arena, falling back to the default when the name is unknown.
pub fn arena_or_default(name: &str) -> &'static Arena {
    get_arena(name).unwrap_or_else(|| {
        log::warn!("unknown arena {name:?}, using {DEFAULT_ARENA}");
        get_arena(DEFAULT_ARENA).unwrap_or(&ARENAS[0])
    })
}

/// The arena after `name` in the embedded list, wrapping around.
pub fn next_arena(name: &str) -> &'static Arena {
    let arenas = all();
    let index = arenas.iter().position(|a| a.name == name).unwrap_or(0);
    &arenas[(index + 1) % arenas.len()]
}
