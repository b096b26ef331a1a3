use commander_chess::board::Board;
use commander_chess::color::Color;
use commander_chess::controller::BoardController;
use commander_chess::coord::{NUM_FILES, NUM_RANKS, Square};
use commander_chess::piece::{Piece, piece_to_layout_char};
use console::Style;
use itertools::Itertools;


const CELL_WIDTH: usize = 5;

fn format_cell(s: &str) -> String { format!("{s:^CELL_WIDTH$}") }

fn render_piece(piece: &Piece) -> String {
    let text =
        piece.flattened().iter().map(|unit| piece_to_layout_char(unit.role, unit.color)).join("");
    let style = match piece.color {
        Color::Red => Style::new().red().bold(),
        Color::Blue => Style::new().blue().bold(),
    };
    style.apply_to(format_cell(&text)).to_string()
}

// Squares that deserve a background: selection, last move, premove, predrop and check.
struct Highlights {
    selected: Option<Square>,
    last_move: Vec<Square>,
    premove: Vec<Square>,
    predrop: Option<Square>,
    check: Option<Square>,
}

impl Highlights {
    fn style(&self, square: Square) -> Style {
        if self.check == Some(square) {
            Style::new().on_red()
        } else if self.selected == Some(square) {
            Style::new().reverse()
        } else if self.premove.contains(&square) || self.predrop == Some(square) {
            Style::new().on_color256(153)
        } else if self.last_move.contains(&square) {
            Style::new().on_color256(194)
        } else {
            Style::new()
        }
    }
}

fn render_grid(board: &Board, red_bottom: bool, highlights: &Highlights) -> String {
    let mut files = (0..NUM_FILES).collect_vec();
    let mut ranks = (0..NUM_RANKS).rev().collect_vec();
    if !red_bottom {
        files.reverse();
        ranks.reverse();
    }
    let header = format!(
        "{}{}\n",
        format_cell(""),
        files.iter().map(|file| format_cell(&file.to_string())).join("")
    );
    let mut ret = header.clone();
    for &rank in &ranks {
        ret.push_str(&format_cell(&rank.to_string()));
        for &file in &files {
            let square = Square::from_zero_based(file, rank);
            let cell = match board.piece(square) {
                Some(piece) => render_piece(piece),
                None => format_cell("·"),
            };
            ret.push_str(&highlights.style(square).apply_to(cell).to_string());
        }
        ret.push_str(&format_cell(&rank.to_string()));
        ret.push('\n');
    }
    ret.push_str(&header);
    ret
}

pub fn render_board(board: &Board, red_bottom: bool) -> String {
    let highlights = Highlights {
        selected: None,
        last_move: board.last_move().map(|m| m.squares()).unwrap_or_default(),
        premove: Vec::new(),
        predrop: None,
        check: board.check(),
    };
    render_grid(board, red_bottom, &highlights)
}

pub fn render_controller(ctrl: &BoardController) -> String {
    let board = ctrl.board();
    let highlights = Highlights {
        selected: ctrl.selected(),
        last_move: board.last_move().map(|m| m.squares()).unwrap_or_default(),
        premove: ctrl.premove().map(|p| vec![p.orig, p.dest]).unwrap_or_default(),
        predrop: ctrl.predrop().map(|p| p.square),
        check: board.check(),
    };
    let turn = match board.turn_color() {
        Color::Red => Style::new().red().apply_to("red"),
        Color::Blue => Style::new().blue().apply_to("blue"),
    };
    format!("{}turn: {}\n", render_grid(board, ctrl.red_pov(), &highlights), turn)
}
