use std::fs;

use anyhow::Context;
use commander_chess::board::DropSource;
use commander_chess::config::Config;
use commander_chess::controller::BoardController;
use commander_chess::coord::Square;
use commander_chess::event::{
    MoveMetadata, NewPieceMetadata, NotificationKind, Observer, SetPremoveMetadata, dispatch,
};
use commander_chess::piece::{Piece, Role};
use log::{info, warn};
use strum::IntoEnumIterator;

use crate::action::Action;
use crate::tui;


pub struct ReplayConfig {
    pub config_file: Option<String>,
    pub layout: Option<String>,
    pub json: bool,
    pub actions: Vec<String>,
}

struct PrintObserver;

impl Observer for PrintObserver {
    fn on_select(&mut self, square: Square) { println!("  select {square}"); }
    fn on_move(&mut self, orig: Square, dest: Square, captured: Option<&Piece>) {
        match captured {
            Some(piece) => println!("  move {orig} -> {dest}, captured {}", piece.role.name()),
            None => println!("  move {orig} -> {dest}"),
        }
    }
    fn on_change(&mut self) { println!("  change"); }
    fn on_drop_new_piece(&mut self, piece: &Piece, square: Square) {
        println!("  new piece {} at {square}", piece.role.name());
    }
    fn on_premove_set(&mut self, orig: Square, dest: Square, metadata: SetPremoveMetadata) {
        println!("  premove set {orig} -> {dest} (ctrl: {})", metadata.ctrl_key);
    }
    fn on_premove_unset(&mut self) { println!("  premove unset"); }
    fn on_predrop_set(&mut self, role: Role, square: Square) {
        println!("  predrop set {} at {square}", role.name());
    }
    fn on_predrop_unset(&mut self) { println!("  predrop unset"); }
    fn on_after_move(&mut self, orig: Square, dest: Square, metadata: &MoveMetadata) {
        println!(
            "  after move {orig} -> {dest} (premove: {}, held {:?})",
            metadata.premove, metadata.hold_time
        );
    }
    fn on_after_new_piece(&mut self, role: Role, square: Square, metadata: NewPieceMetadata) {
        println!(
            "  after new piece {} at {square} (premove: {}, predrop: {})",
            role.name(),
            metadata.premove,
            metadata.predrop
        );
    }
}

fn read_board_config(path: &str) -> anyhow::Result<Config> {
    let contents = fs::read_to_string(path).context(format!("Failed to read file '{path}'."))?;
    serde_yaml::from_str(&contents).context(format!("Failed to parse board config '{path}'."))
}

fn apply(ctrl: &mut BoardController, action: Action) {
    match action {
        Action::Move { from, to } => {
            ctrl.select_square(from, false);
            ctrl.select_square(to, false);
        }
        Action::Drop { role, color, to } => {
            let piece = Piece::new(role, color, to);
            let result = ctrl.drop_new_piece(DropSource::Reserve(piece), to, false);
            info!("Drop result: {result:?}");
        }
        Action::Cancel => ctrl.cancel_move(),
        Action::PlayPremove => match ctrl.play_premove() {
            Ok(outcome) => info!("Premove played: {outcome:?}"),
            Err(err) => warn!("Premove not played: {err}"),
        },
        Action::PlayPredrop => match ctrl.play_predrop() {
            Ok(()) => info!("Predrop played"),
            Err(err) => warn!("Predrop not played: {err}"),
        },
        Action::Flip => ctrl.toggle_orientation(),
    }
}

pub fn run(config: ReplayConfig) -> anyhow::Result<()> {
    let actions = config
        .actions
        .iter()
        .map(|s| Action::parse(s).map(|action| (s, action)))
        .collect::<Result<Vec<_>, _>>()?;
    let mut board_config = match &config.config_file {
        Some(path) => read_board_config(path)?,
        None => Config::default(),
    };
    if let Some(layout) = config.layout {
        board_config.layout = layout;
    }
    if board_config.subscriptions.is_empty() {
        board_config.subscriptions = NotificationKind::iter().collect();
    }
    let mut ctrl = BoardController::from_config(&board_config);
    print!("{}", tui::render_controller(&ctrl));
    for (text, action) in actions {
        println!("> {text}");
        apply(&mut ctrl, action);
        if config.json {
            for notification in ctrl.board_mut().drain_notifications() {
                println!("{}", serde_json::to_string(&notification)?);
            }
        } else {
            dispatch(ctrl.board_mut().notifications_mut(), &mut PrintObserver);
        }
        print!("{}", tui::render_controller(&ctrl));
    }
    Ok(())
}
