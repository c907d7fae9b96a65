use csv::ReaderBuilder;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{ConfigError, Tuning};
use crate::direction::Direction;
use crate::position::Position;

use super::{Arena, Start};

const HUMAN_MARKER: &str = "A";
const BOT_MARKER: &str = "B";

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("invalid arena CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid arena JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("arena has no cells")]
    Empty,

    #[error("unknown cell {cell:?} at ({x}, {y})")]
    UnknownCell { cell: String, x: usize, y: usize },

    #[error("start marker {0:?} is missing")]
    MissingStart(&'static str),

    #[error("start marker {0:?} appears more than once")]
    DuplicateStart(&'static str),

    #[error("invalid tuning: {0}")]
    Tuning(#[from] ConfigError),
}

#[derive(Deserialize)]
struct ArenaMetadata {
    name: String,
    human_heading: Direction,
    bot_heading: Direction,
    #[serde(default)]
    tuning: Tuning,
}

impl Arena {
    /// Build an arena from a CSV layout (`.` empty, `A` human start, `B` bot
    /// start) and its JSON metadata.
    pub fn parse(name: &str, csv_str: &str, json_str: &str) -> Result<Self, ArenaError> {
        let metadata: ArenaMetadata = serde_json::from_str(json_str)?;
        metadata.tuning.validate()?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(false)
            .from_reader(csv_str.as_bytes());

        let mut width = 0;
        let mut height = 0;
        let mut human = None;
        let mut bot = None;
        for (y, result) in reader.records().enumerate() {
            let record = result?;
            width = record.len();
            height = y + 1;
            for (x, field) in record.iter().enumerate() {
                let pos = Position::from_index(x, y);
                match field.trim() {
                    "." => {}
                    HUMAN_MARKER => place(&mut human, pos, HUMAN_MARKER)?,
                    BOT_MARKER => place(&mut bot, pos, BOT_MARKER)?,
                    other => {
                        return Err(ArenaError::UnknownCell {
                            cell: other.to_string(),
                            x,
                            y,
                        });
                    }
                }
            }
        }
        if width == 0 || height == 0 {
            return Err(ArenaError::Empty);
        }

        let human = human.ok_or(ArenaError::MissingStart(HUMAN_MARKER))?;
        let bot = bot.ok_or(ArenaError::MissingStart(BOT_MARKER))?;
        Ok(Self {
            name: name.to_string(),
            display_name: metadata.name,
            width,
            height,
            human: Start {
                position: human,
                heading: metadata.human_heading,
            },
            bot: Start {
                position: bot,
                heading: metadata.bot_heading,
            },
            tuning: metadata.tuning,
        })
    }
}

fn place(
    slot: &mut Option<Position>,
    pos: Position,
    marker: &'static str,
) -> Result<(), ArenaError> {
    if slot.replace(pos).is_some() {
        return Err(ArenaError::DuplicateStart(marker));
    }
    Ok(())
}
