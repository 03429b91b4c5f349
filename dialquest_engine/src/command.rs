//! Command module
//!
//! Typed commands stand in for the hardware's buttons and dial.
use variantly;

use crate::room::Direction;

/// Commands that can be entered at the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, variantly::Variantly)]
pub enum Command {
    Go(Direction),
    Dial(u16),
    Page(usize),
    Look,
    Inventory,
    Help,
    Quit,
    Unknown,
}

/// Parses an input string and returns a corresponding `Command` if recognized.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    match words.as_slice() {
        [dir] | ["go" | "move", dir] if Direction::from_word(dir).is_some() => {
            Direction::from_word(dir).map_or(Command::Unknown, Command::Go)
        },
        ["dial" | "turn", value] => value.parse().map_or(Command::Unknown, Command::Dial),
        ["page" | "screen", value] => value.parse().map_or(Command::Unknown, Command::Page),
        ["look" | "l"] => Command::Look,
        ["inventory" | "inv" | "i"] => Command::Inventory,
        ["help" | "?"] => Command::Help,
        ["quit" | "exit"] => Command::Quit,
        _ => Command::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_in_every_form() {
        assert_eq!(parse_command("north"), Command::Go(Direction::North));
        assert_eq!(parse_command("E"), Command::Go(Direction::East));
        assert_eq!(parse_command("go south"), Command::Go(Direction::South));
        assert_eq!(parse_command("  move w \n"), Command::Go(Direction::West));
        assert_eq!(parse_command("go up"), Command::Unknown);
    }

    #[test]
    fn dial_and_page_take_numbers() {
        assert_eq!(parse_command("dial 512"), Command::Dial(512));
        assert_eq!(parse_command("page 2"), Command::Page(2));
        assert!(parse_command("dial -1").is_unknown());
        assert!(parse_command("dial 70000").is_unknown());
        assert!(parse_command("page").is_unknown());
    }

    #[test]
    fn simple_words() {
        assert!(parse_command("look").is_look());
        assert!(parse_command("inv").is_inventory());
        assert!(parse_command("?").is_help());
        assert!(parse_command("exit").is_quit());
        assert!(parse_command("").is_unknown());
    }
}
