use commander_chess::board::Board;
use commander_chess::config::Config;
use commander_chess::layout;

use crate::tui;


pub struct ShowConfig {
    pub layout: String,
    pub blue_bottom: bool,
}

pub fn run(config: ShowConfig) -> anyhow::Result<()> {
    let board = Board::from_config(&Config { layout: config.layout, ..Config::default() });
    print!("{}", tui::render_board(&board, !config.blue_bottom));
    println!("{}", layout::write(board.grid()));
    Ok(())
}
