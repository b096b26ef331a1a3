#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod action;
mod replay_main;
mod show_main;
mod tui;

use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Commander Chess")
        .version(clap::crate_version!())
        .about("Commander chess board console app")
        .subcommand_required(true)
        .subcommand(
            Command::new("show")
                .about("Render a layout")
                .arg(arg!(--"layout" <layout> "Layout string or \"start\"").default_value("start"))
                .arg(arg!(--"blue-bottom" "View the board from blue's side")),
        )
        .subcommand(
            Command::new("replay")
                .about(concat!(
                    "Replay user actions through the board and print the board and the ",
                    "notifications after each of them."
                ))
                .arg(arg!(--"config" <config_file> "Path to a yaml-serialized board Config"))
                .arg(arg!(--"layout" <layout> "Overrides the layout from the config"))
                .arg(arg!(--"json" "Print notifications as JSON lines"))
                .arg(arg!(
                    <actions> ... "Actions: F-R:F-R, drop:ROLE:COLOR:F-R, cancel, premove, predrop, flip"
                )),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("show", sub_matches)) => show_main::run(show_main::ShowConfig {
            layout: sub_matches.get_one::<String>("layout").cloned().unwrap_or_default(),
            blue_bottom: sub_matches.get_flag("blue-bottom"),
        }),
        Some(("replay", sub_matches)) => replay_main::run(replay_main::ReplayConfig {
            config_file: sub_matches.get_one::<String>("config").cloned(),
            layout: sub_matches.get_one::<String>("layout").cloned(),
            json: sub_matches.get_flag("json"),
            actions: sub_matches
                .get_many::<String>("actions")
                .map(|actions| actions.cloned().collect())
                .unwrap_or_default(),
        }),
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
