use macroquad::prelude::*;

use crate::arena::{self, DEFAULT_ARENA};
use crate::assets::Assets;
use crate::duel::Duel;
use crate::input::{FrameInput, InputState};
use crate::render::{InputHints, render};
use crate::screen_wake::ScreenWake;

/// Frame-loop host: turns keyboard and touch into intents, feeds the duel and draws it.
pub struct App {
    duel: Duel,
    input: InputState,
    assets: Assets,
    hints: InputHints,
    wake: ScreenWake,
}

impl App {
    /// Start on the named arena, or the default one when `arena` is `None` or unknown.
    pub fn new(assets: Assets, arena: Option<&str>) -> Self {
        let arena = arena::arena_or_default(arena.unwrap_or(DEFAULT_ARENA));
        Self {
            duel: Duel::new(arena),
            input: InputState::new(),
            assets,
            hints: InputHints::default(),
            wake: ScreenWake::new(),
        }
    }

    /// Run one frame. Returns `false` once the player has asked to exit.
    pub fn tick(&mut self) -> bool {
        let input = self.input.poll();
        self.update_hints();

        if input.exit {
            self.duel.teardown();
            self.wake.set_active(false);
            return false;
        }

        self.handle_commands(&input);
        self.duel.frame(get_time(), input.intent);
        self.wake.set_active(!self.duel.current().is_over());

        render(&self.duel, &self.assets, self.hints);
        true
    }

    fn handle_commands(&mut self, input: &FrameInput) {
        if !self.duel.current().is_over() {
            if input.restart {
                self.duel.restart();
            }
            return;
        }

        if input.next_arena {
            let next = arena::next_arena(self.duel.arena().name());
            self.duel.teardown();
            self.duel = Duel::new(next);
        } else if input.confirm || input.restart {
            self.duel.restart();
        }
    }

    fn update_hints(&mut self) {
        if !touches().is_empty() {
            self.hints = InputHints::Touch;
        } else if get_last_key_pressed().is_some() {
            self.hints = InputHints::Keyboard;
        }
    }
}
