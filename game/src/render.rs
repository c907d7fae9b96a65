use macroquad::prelude::*;

use crate::assets::Assets;
use crate::duel::{AgentId, Duel, MatchSnapshot, Outcome};
use crate::grid::{Cell, Grid};
use crate::position::Position;

const PADDING: f32 = 8.0;
const HUD_HEIGHT: f32 = 48.0;
const FOOTER_HEIGHT: f32 = 36.0;
const BOOST_BAR_WIDTH: f32 = 160.0;
const BOOST_BAR_HEIGHT: f32 = 14.0;

const BACKGROUND: Color = Color::new(0.039, 0.020, 0.067, 1.0);
const HUMAN_COLOR: Color = Color::new(0.235, 1.0, 0.420, 1.0);
const BOT_COLOR: Color = Color::new(1.0, 0.267, 0.267, 1.0);
const GRID_LINE: Color = Color::new(1.0, 1.0, 1.0, 0.04);
const HUD_TEXT: Color = Color::new(0.78, 0.78, 0.86, 1.0);

fn text_params(font: Option<&Font>, size: u16, color: Color) -> TextParams<'_> {
    TextParams {
        font,
        font_size: size,
        color,
        ..Default::default()
    }
}

fn draw_text_centered(
    text: &str,
    center_x: f32,
    y: f32,
    font: Option<&Font>,
    size: u16,
    color: Color,
) {
    let dims = measure_text(text, font, size, 1.0);
    draw_text_ex(
        text,
        center_x - dims.width / 2.0,
        y,
        text_params(font, size, color),
    );
}

/// Input hint style, switched by whichever input the player used last.
#[derive(Clone, Copy, PartialEq, Default)]
pub(crate) enum InputHints {
    #[default]
    Keyboard,
    Touch,
}

impl InputHints {
    fn playing_hint(self) -> &'static str {
        match self {
            InputHints::Keyboard => "Arrows/WASD to steer | Hold Space or Shift to boost | R to restart",
            InputHints::Touch => "Swipe to steer | Press and hold to boost",
        }
    }

    fn match_over_hint(self) -> &'static str {
        match self {
            InputHints::Keyboard => "Space to play again | Tab for next arena",
            InputHints::Touch => "Tap to play again",
        }
    }
}

fn agent_color(id: AgentId) -> Color {
    match id {
        AgentId::Human => HUMAN_COLOR,
        AgentId::Bot => BOT_COLOR,
    }
}

pub(crate) fn render(duel: &Duel, assets: &Assets, hints: InputHints) {
    let current = duel.current();
    let snapshot = duel.snapshot();
    let grid = current.grid();
    let font = assets.font();

    clear_background(BACKGROUND);

    let cell = cell_size(grid);
    let (offset_x, offset_y) = grid_offset(grid, cell);
    let cell_rect = |pos: Position, inset: f32| {
        Rect::new(
            offset_x + pos.x as f32 * cell + inset,
            offset_y + pos.y as f32 * cell + inset,
            cell - inset * 2.0,
            cell - inset * 2.0,
        )
    };

    // Grid lines
    let grid_w = grid.width() as f32 * cell;
    let grid_h = grid.height() as f32 * cell;
    for i in 0..=grid.width() {
        let x = offset_x + i as f32 * cell;
        draw_line(x, offset_y, x, offset_y + grid_h, 1.0, GRID_LINE);
    }
    for i in 0..=grid.height() {
        let y = offset_y + i as f32 * cell;
        draw_line(offset_x, y, offset_x + grid_w, y, 1.0, GRID_LINE);
    }
    draw_rectangle_lines(offset_x, offset_y, grid_w, grid_h, 2.0, HUD_TEXT);

    // Trails dimmed, heads at full brightness on top
    for (pos, grid_cell) in grid.entries() {
        if let Cell::Trail(owner) = grid_cell {
            let r = cell_rect(pos, cell * 0.08);
            draw_rectangle(r.x, r.y, r.w, r.h, Color {
                a: 0.45,
                ..agent_color(owner)
            });
        }
    }
    for (id, defeated) in [
        (AgentId::Human, snapshot.human_defeated),
        (AgentId::Bot, snapshot.bot_defeated),
    ] {
        let agent = current.agent(id);
        let color = if defeated { WHITE } else { agent_color(id) };
        let r = cell_rect(agent.position(), -cell * 0.1);
        draw_rectangle(r.x, r.y, r.w, r.h, color);

        // Heading marker on the leading edge of the head
        let delta = agent.heading().delta();
        let (cx, cy) = (r.x + r.w / 2.0, r.y + r.h / 2.0);
        draw_circle(
            cx + delta.dx as f32 * r.w * 0.3,
            cy + delta.dy as f32 * r.h * 0.3,
            r.w * 0.12,
            BACKGROUND,
        );
    }

    render_hud(duel.arena().display_name(), &snapshot, font);

    match snapshot.outcome {
        Some(outcome) => render_result(&snapshot, outcome, hints, font),
        None => draw_text_centered(
            hints.playing_hint(),
            screen_width() / 2.0,
            screen_height() - FOOTER_HEIGHT / 2.0 + 6.0,
            font,
            18,
            HUD_TEXT,
        ),
    }
}

fn render_hud(arena_name: &str, snapshot: &MatchSnapshot, font: Option<&Font>) {
    let baseline = HUD_HEIGHT / 2.0 + 8.0;

    draw_text_ex(
        arena_name,
        PADDING,
        baseline,
        text_params(font, 24, HUD_TEXT),
    );
    draw_text_centered(
        &format!("Score {}", snapshot.score),
        screen_width() / 2.0,
        baseline,
        font,
        24,
        HUD_TEXT,
    );

    // Boost meter
    let level = snapshot.boost;
    let bar_x = screen_width() - PADDING - BOOST_BAR_WIDTH;
    let bar_y = (HUD_HEIGHT - BOOST_BAR_HEIGHT) / 2.0;
    draw_rectangle(
        bar_x,
        bar_y,
        BOOST_BAR_WIDTH,
        BOOST_BAR_HEIGHT,
        Color::from_rgba(40, 30, 50, 255),
    );
    draw_rectangle(
        bar_x,
        bar_y,
        BOOST_BAR_WIDTH * level,
        BOOST_BAR_HEIGHT,
        HUMAN_COLOR,
    );
    draw_rectangle_lines(bar_x, bar_y, BOOST_BAR_WIDTH, BOOST_BAR_HEIGHT, 1.0, HUD_TEXT);
    let label = "BOOST";
    let dims = measure_text(label, font, 16, 1.0);
    draw_text_ex(
        label,
        bar_x - dims.width - PADDING,
        bar_y + BOOST_BAR_HEIGHT,
        text_params(font, 16, HUD_TEXT),
    );
}

fn render_result(
    snapshot: &MatchSnapshot,
    outcome: Outcome,
    hints: InputHints,
    font: Option<&Font>,
) {
    draw_rectangle(
        0.0,
        0.0,
        screen_width(),
        screen_height(),
        Color::from_rgba(0, 0, 0, 170),
    );

    let (title, color) = match outcome {
        Outcome::Winner(AgentId::Human) => ("YOU WIN", HUMAN_COLOR),
        Outcome::Winner(AgentId::Bot) => ("DEFEATED", BOT_COLOR),
        Outcome::Draw => ("DRAW", WHITE),
    };

    let center_x = screen_width() / 2.0;
    let center_y = screen_height() / 2.0;
    draw_text_centered(title, center_x, center_y - 30.0, font, 64, color);
    draw_text_centered(
        &format!("Score {}", snapshot.score),
        center_x,
        center_y + 25.0,
        font,
        36,
        WHITE,
    );
    draw_text_centered(
        hints.match_over_hint(),
        center_x,
        center_y + 90.0,
        font,
        26,
        HUD_TEXT,
    );
}

fn cell_size(grid: &Grid) -> f32 {
    let width = screen_width() - PADDING * 2.0;
    let height = screen_height() - HUD_HEIGHT - FOOTER_HEIGHT - PADDING * 2.0;
    let cell_w = width / grid.width() as f32;
    let cell_h = height / grid.height() as f32;
    cell_w.min(cell_h).max(1.0)
}

fn grid_offset(grid: &Grid, cell: f32) -> (f32, f32) {
    let grid_w = grid.width() as f32 * cell;
    let grid_h = grid.height() as f32 * cell;
    let offset_x = (screen_width() - grid_w) / 2.0;
    let available = screen_height() - HUD_HEIGHT - FOOTER_HEIGHT;
    let offset_y = HUD_HEIGHT + ((available - grid_h) / 2.0).max(PADDING);
    (offset_x, offset_y)
}
