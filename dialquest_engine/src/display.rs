//! Output side of the engine.
//!
//! The engine hands finished pages and short notices to a [`DisplayDriver`].
//! [`TerminalDisplay`] draws them as a framed text block with a row of exit
//! indicators standing in for the four direction lights.

use std::fmt::Write as _;

use colored::Colorize;
use dialquest_data::ItemId;
use textwrap::fill;

use crate::paginate::Page;
use crate::room::{Direction, ExitMask};
use crate::style::{GameStyle, indented_block, normal_block};

/// Messages shown next to the page rather than on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Granted(ItemId),
    Dropped(ItemId),
    NoExit(Direction),
    Inventory(Vec<ItemId>),
    Error(String),
    Fatal(String),
    Help,
}

/// Anything that can show a page of room text and engine notices.
pub trait DisplayDriver {
    fn draw_page(&mut self, page: &Page);
    fn notice(&mut self, notice: Notice);
}

/// Prints pages and notices to stdout.
#[derive(Debug, Clone)]
pub struct TerminalDisplay {
    width: usize,
}

impl TerminalDisplay {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    /// The framed page text, without a trailing newline.
    pub fn render_page(&self, page: &Page) -> String {
        let bar = "─".repeat(self.width + 2);
        let mut out = String::new();
        let _ = writeln!(out, "{}", format!("┌{bar}┐").frame_style());
        for line in &page.lines {
            let _ = writeln!(
                out,
                "{} {} {}",
                "│".frame_style(),
                format!("{line:<width$}", width = self.width).page_style(),
                "│".frame_style()
            );
        }
        let _ = writeln!(out, "{}", format!("└{bar}┘").frame_style());
        let _ = write!(
            out,
            "{}  {}",
            render_exits(page.exits),
            format!("{}/{}", page.screen, page.screens).frame_style()
        );
        out
    }
}

impl DisplayDriver for TerminalDisplay {
    fn draw_page(&mut self, page: &Page) {
        println!("\n{}", self.render_page(page));
    }

    fn notice(&mut self, notice: Notice) {
        match notice {
            Notice::Granted(item) => println!("You now carry item {}.", item.to_string().item_style()),
            Notice::Dropped(item) => println!(
                "{}",
                format!("Your hands are full; item {item} stays behind.").error_style()
            ),
            Notice::NoExit(dir) => println!("{}", format!("There is no way {dir}.").italic()),
            Notice::Inventory(items) if items.is_empty() => println!("You carry nothing."),
            Notice::Inventory(items) => {
                println!("{}", "You carry:".subheading_style());
                for item in items {
                    println!("{}", fill(&format!("item {item}"), indented_block()).item_style());
                }
            },
            Notice::Error(msg) => println!("{}", fill(&msg, normal_block()).error_style()),
            Notice::Fatal(msg) => println!("{}", fill(&msg, normal_block()).fatal_style()),
            Notice::Help => println!("{}", fill(HELP_TEXT, normal_block())),
        }
    }
}

const HELP_TEXT: &str = "Move with north, east, south, west (or n, e, s, w). \
Turn the dial with `dial <0-max>` or jump to a screen with `page <n>`. \
`look` redraws the page, `inventory` lists what you carry, `quit` leaves.";

/// Exit indicator row: lit letters for exits that lead somewhere.
pub fn render_exits(mask: ExitMask) -> String {
    Direction::ALL
        .into_iter()
        .map(|dir| {
            let label = dir.name()[..1].to_uppercase();
            if mask.contains(dir.mask()) {
                format!("[{label}]").exit_lit_style().to_string()
            } else {
                format!("[{label}]").exit_dark_style().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_row_marks_every_direction() {
        colored::control::set_override(false);
        assert_eq!(render_exits(ExitMask::NORTH | ExitMask::WEST), "[N] [E] [S] [W]");
    }

    #[test]
    fn page_is_framed_to_display_width() {
        colored::control::set_override(false);
        let display = TerminalDisplay::new(6);
        let page = Page {
            screen: 1,
            screens: 2,
            lines: vec!["Hall".into(), "A dim".into()],
            exits: ExitMask::EAST,
        };
        let rendered = display.render_page(&page);
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "┌────────┐");
        assert_eq!(lines[1], "│ Hall   │");
        assert_eq!(lines[2], "│ A dim  │");
        assert_eq!(lines[3], "└────────┘");
        assert!(lines[4].ends_with("1/2"));
    }
}
