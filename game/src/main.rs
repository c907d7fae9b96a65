use macroquad::window::next_frame;

use trail_duel::{assets::Assets, duel_app::App};

#[macroquad::main("Trail Duel")]
async fn main() {
    let arena = std::env::args().nth(1);
    let mut app = App::new(Assets::load().await, arena.as_deref());
    while app.tick() {
        next_frame().await;
    }
}
