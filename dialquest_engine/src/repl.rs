//! REPL and command handling.
//!
//! The terminal plays the part of the input sampler: each typed command is
//! posted to the [`InputMailbox`] and one [`Session::step`] runs after it.

mod input;

use anyhow::Result;
use log::info;

use crate::command::{Command, parse_command};
use crate::display::{DisplayDriver, Notice};
use crate::error::EngineError;
use crate::mailbox::InputMailbox;
use crate::session::Session;
use crate::store::RoomStore;
use crate::style::GameStyle;

use input::{DialTargets, InputEvent, InputManager};

/// Control flow signal used by handlers to exit the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplControl {
    Continue,
    Quit,
}

/// Run the read-eval-print loop until the player quits or a fatal error occurs.
///
/// # Errors
/// Returns the unrecoverable engine error that halted play.
pub fn run_repl<S: RoomStore>(session: &mut Session<S>, display: &mut impl DisplayDriver) -> Result<()> {
    let mailbox = InputMailbox::new();
    let mut input_manager = InputManager::new();

    session.step(&mailbox, display)?;
    loop {
        input_manager.set_dial_targets(DialTargets::from_pager(session.pager()));
        let prompt = format!(
            "\n[Room {}|{}/{}|dial {}]>> ",
            session.navigator().room().number,
            session.showing().unwrap_or(1),
            session.pager().screen_count(),
            session.position()
        )
        .prompt_style()
        .to_string();

        let line = match input_manager.read_line(&prompt) {
            Ok(InputEvent::Line(line)) => line,
            Ok(InputEvent::Eof) => "quit".to_string(),
            Ok(InputEvent::Interrupted) => continue,
            Err(err) => {
                display.notice(Notice::Error(format!("Failed to read input ({err}). Try again.")));
                continue;
            },
        };

        if dispatch(session, &mailbox, display, parse_command(&line))? == ReplControl::Quit {
            info!("player quit in room {}", session.navigator().room().number);
            return Ok(());
        }
    }
}

/// Apply one command to the session.
///
/// # Errors
/// Propagates unrecoverable errors from [`Session::step`].
pub fn dispatch<S: RoomStore>(
    session: &mut Session<S>,
    mailbox: &InputMailbox,
    display: &mut impl DisplayDriver,
    command: Command,
) -> Result<ReplControl, EngineError> {
    match command {
        Command::Go(dir) => mailbox.post_press(dir),
        Command::Dial(position) => mailbox.post_position(position),
        Command::Page(screen) => mailbox.post_position(session.pager().position_for_screen(screen)),
        Command::Look => session.redraw(display),
        Command::Inventory => display.notice(Notice::Inventory(session.navigator().inventory().items().collect())),
        Command::Help => display.notice(Notice::Help),
        Command::Quit => return Ok(ReplControl::Quit),
        Command::Unknown => display.notice(Notice::Error("Didn't quite catch that? Try `help`.".to_string())),
    }
    session.step(mailbox, display)?;
    Ok(ReplControl::Continue)
}
