#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Dialquest **
//! Dial-paged text adventure engine

use dialquest_engine::config::CONFIG_FILE;
use dialquest_engine::data_paths::{data_path, data_root};
use dialquest_engine::style::GameStyle;
use dialquest_engine::{DIALQUEST_VERSION, Session, TerminalDisplay, load_config, load_game, run_repl};

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use std::io::Write;

fn main() -> Result<()> {
    env_logger::init();
    info!(
        "Start: loading Dialquest v{DIALQUEST_VERSION} from '{}'...",
        data_root().display()
    );
    let config = load_config(&data_path(CONFIG_FILE));
    let game = load_game(&config).context("while loading rooms")?;
    info!("rooms ready; starting in room {}", game.start_room);

    let mut session = Session::start(game.store, game.start_room, config.display, config.grant_policy())
        .with_context(|| format!("while entering start room {}", game.start_room))?;

    // clear the screen
    print!("\x1B[2J\x1B[H");
    std::io::stdout().flush()?;

    println!("{}", game.title.to_uppercase().room_style().underline());
    println!("{}", "Type `help` for commands.".italic());

    let mut display = TerminalDisplay::new(config.display.width);
    run_repl(&mut session, &mut display)
}
