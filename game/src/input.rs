use macroquad::prelude::*;

use crate::direction::Direction;
use crate::duel::Intent;

const SWIPE_THRESHOLD: f32 = 30.0;
/// Seconds a touch must stay put before it counts as holding boost.
const BOOST_HOLD_DELAY: f64 = 0.15;

const HEADING_KEYS: [(KeyCode, KeyCode, Direction); 4] = [
    (KeyCode::Up, KeyCode::W, Direction::Up),
    (KeyCode::Down, KeyCode::S, Direction::Down),
    (KeyCode::Left, KeyCode::A, Direction::Left),
    (KeyCode::Right, KeyCode::D, Direction::Right),
];

/// Everything the player asked for this frame.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct FrameInput {
    pub(crate) intent: Intent,
    /// Space, Enter or a tap.
    pub(crate) confirm: bool,
    pub(crate) restart: bool,
    pub(crate) next_arena: bool,
    pub(crate) exit: bool,
}

/// Where and when a tracked touch began.
#[derive(Clone, Copy)]
struct TouchStart {
    id: u64,
    pos: Vec2,
    time: f64,
}

impl TouchStart {
    /// A touch boosts once it has stayed within the swipe threshold for the hold delay.
    fn is_boost_hold(self, pos: Vec2, now: f64) -> bool {
        (pos - self.pos).length() < SWIPE_THRESHOLD && now - self.time >= BOOST_HOLD_DELAY
    }
}

/// Tracks the touch in progress for swipe and hold detection.
pub(crate) struct InputState {
    touch_start: Option<TouchStart>,
    touch_pos: Vec2,
}

impl InputState {
    pub(crate) fn new() -> Self {
        Self {
            touch_start: None,
            touch_pos: Vec2::ZERO,
        }
    }

    /// Poll keyboard and touch. Call once per frame.
    pub(crate) fn poll(&mut self) -> FrameInput {
        let mut input = FrameInput {
            confirm: is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter),
            restart: is_key_pressed(KeyCode::R),
            next_arena: is_key_pressed(KeyCode::Tab),
            exit: is_key_pressed(KeyCode::Escape),
            ..Default::default()
        };

        for (arrow, letter, dir) in HEADING_KEYS {
            if is_key_pressed(arrow) || is_key_pressed(letter) {
                input.intent.heading = Some(dir);
            }
        }

        match self.poll_touch() {
            Some(TouchEnd::Swipe(dir)) => input.intent.heading = Some(dir),
            Some(TouchEnd::Tap) => input.confirm = true,
            None => {}
        }

        // A touch held in place boosts like the keyboard boost keys.
        let now = get_time();
        let touch_held = self
            .touch_start
            .is_some_and(|start| start.is_boost_hold(self.touch_pos, now));
        input.intent.boost_held = is_key_down(KeyCode::Space)
            || is_key_down(KeyCode::LeftShift)
            || is_key_down(KeyCode::RightShift)
            || touch_held;

        input
    }

    fn poll_touch(&mut self) -> Option<TouchEnd> {
        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => {
                    self.touch_start = Some(TouchStart {
                        id: touch.id,
                        pos: touch.position,
                        time: get_time(),
                    });
                    self.touch_pos = touch.position;
                }
                TouchPhase::Moved | TouchPhase::Stationary => {
                    if self.touch_start.is_some_and(|start| start.id == touch.id) {
                        self.touch_pos = touch.position;
                    }
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    let Some(start) = self.touch_start else {
                        continue;
                    };
                    if start.id != touch.id {
                        continue;
                    }
                    self.touch_start = None;
                    let delta = touch.position - start.pos;

                    return Some(if delta.length() >= SWIPE_THRESHOLD {
                        TouchEnd::Swipe(swipe_to_direction(delta))
                    } else {
                        TouchEnd::Tap
                    });
                }
            }
        }

        None
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

enum TouchEnd {
    Swipe(Direction),
    Tap,
}

fn swipe_to_direction(delta: Vec2) -> Direction {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
