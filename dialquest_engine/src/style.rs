//! Styling helpers for terminal output.
//!
//! The [`GameStyle`] trait provides a set of convenience methods for applying
//! ANSI styling via the `colored` crate. Implementations for `&str` and
//! `String` are provided so string literals can be styled directly.

use colored::{ColoredString, Colorize};
use textwrap::{Options, termwidth};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn room_style(&self) -> ColoredString;
    fn page_style(&self) -> ColoredString;
    fn frame_style(&self) -> ColoredString;
    fn exit_lit_style(&self) -> ColoredString;
    fn exit_dark_style(&self) -> ColoredString;
    fn item_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
    fn fatal_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn subheading_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn room_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10)
    }
    fn page_style(&self) -> ColoredString {
        self.truecolor(102, 208, 250)
    }
    fn frame_style(&self) -> ColoredString {
        self.truecolor(75, 80, 75)
    }
    fn exit_lit_style(&self) -> ColoredString {
        self.bold().truecolor(110, 220, 110)
    }
    fn exit_dark_style(&self) -> ColoredString {
        self.dimmed().truecolor(80, 80, 80)
    }
    fn item_style(&self) -> ColoredString {
        self.truecolor(220, 180, 40)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
    fn fatal_style(&self) -> ColoredString {
        self.bold().truecolor(230, 30, 30).underline()
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(160, 160, 160)
    }
    fn subheading_style(&self) -> ColoredString {
        self.underline()
    }
}

impl GameStyle for String {
    fn room_style(&self) -> ColoredString {
        self.as_str().room_style()
    }
    fn page_style(&self) -> ColoredString {
        self.as_str().page_style()
    }
    fn frame_style(&self) -> ColoredString {
        self.as_str().frame_style()
    }
    fn exit_lit_style(&self) -> ColoredString {
        self.as_str().exit_lit_style()
    }
    fn exit_dark_style(&self) -> ColoredString {
        self.as_str().exit_dark_style()
    }
    fn item_style(&self) -> ColoredString {
        self.as_str().item_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
    fn fatal_style(&self) -> ColoredString {
        self.as_str().fatal_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn subheading_style(&self) -> ColoredString {
        self.as_str().subheading_style()
    }
}

/// Wrapping options for engine messages (help, errors) at terminal width.
pub fn normal_block() -> Options<'static> {
    Options::new(termwidth().min(80))
}

/// Like [`normal_block`], indented for list entries.
pub fn indented_block() -> Options<'static> {
    normal_block().initial_indent("  ").subsequent_indent("    ")
}
