pub mod game_common;
pub mod menu_scene;
pub mod simon_scene;
pub mod tiles_scene;

use crate::app::{App, Screen};
use crate::games::ActiveGame;
use crate::scores::HighScoreStore;
use ratatui::{layout::Rect, Frame};

const MENU_WIDTH: u16 = 48;
const MENU_HEIGHT: u16 = 14;

/// Main UI drawing function.
pub fn draw<S: HighScoreStore + Clone + 'static>(frame: &mut Frame, app: &App<S>) {
    let size = frame.size();

    match (app.screen, app.game.as_ref()) {
        (Screen::Game, Some(ActiveGame::Tiles(game))) => {
            tiles_scene::render_tiles_scene(frame, size, game);
        }
        (Screen::Game, Some(ActiveGame::Simon(game))) => {
            simon_scene::render_simon_scene(frame, size, game);
        }
        _ => {
            menu_scene::render_menu(frame, centered(size, MENU_WIDTH, MENU_HEIGHT), app.menu_index, app.bests());
        }
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
