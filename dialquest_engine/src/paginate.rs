//! Reflowing room text into fixed-size display pages.
//!
//! The room's title and description are joined with a line break, wrapped
//! greedily at spaces to the display width, and the resulting lines are cut
//! into screens of the display height. The external position (the dial)
//! picks which screen is shown by splitting its range into equal buckets.

use serde::{Deserialize, Serialize};

use crate::room::{ExitMask, Room};

/// Display geometry and the range of the position input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Characters per line.
    pub width: usize,
    /// Lines per screen.
    pub height: usize,
    /// Largest position value the input can report.
    pub position_max: u16,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width: 21,
            height: 4,
            position_max: 1023,
        }
    }
}

/// Byte range of one wrapped line within the joined text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

/// Wrap `text` greedily to `width` characters per line.
///
/// Existing line breaks always end a line. Within a line, the break goes at
/// the last space among the next `width + 1` characters and that space is
/// dropped. If those characters contain no space, wrapping stops for the rest
/// of the text: the remainder of that line stays whole, and later lines are
/// only split at existing breaks.
pub fn wrap_spans(text: &str, width: usize) -> Vec<LineSpan> {
    let mut spans = Vec::new();
    let mut wrapping = true;
    let mut offset = 0;

    for segment in text.split('\n') {
        if wrapping {
            wrapping = wrap_segment(segment, offset, width, &mut spans);
        } else {
            spans.push(LineSpan {
                start: offset,
                end: offset + segment.len(),
            });
        }
        offset += segment.len() + 1;
    }
    spans
}

/// Wrap one break-free segment; returns false if wrapping had to stop.
fn wrap_segment(segment: &str, base: usize, width: usize, spans: &mut Vec<LineSpan>) -> bool {
    let chars: Vec<(usize, char)> = segment.char_indices().collect();
    let byte_at = |idx: usize| chars.get(idx).map_or(segment.len(), |(b, _)| *b);

    let mut start = 0;
    while chars.len() - start > width {
        let window = &chars[start..=start + width];
        let Some(space) = window.iter().rposition(|(_, c)| *c == ' ') else {
            spans.push(LineSpan {
                start: base + byte_at(start),
                end: base + segment.len(),
            });
            return false;
        };
        let space = start + space;
        spans.push(LineSpan {
            start: base + byte_at(start),
            end: base + byte_at(space),
        });
        start = space + 1;
    }

    spans.push(LineSpan {
        start: base + byte_at(start),
        end: base + segment.len(),
    });
    true
}

/// Screen (1-based) selected by `position`, splitting `[0, position_max]`
/// into `screens` equal buckets.
pub fn screen_for_position(position: u16, position_max: u16, screens: usize) -> usize {
    let screens = screens.max(1);
    let position = u64::from(position.min(position_max));
    let buckets = u64::from(position_max) + 1;
    let screen = usize::try_from(position * screens as u64 / buckets).unwrap_or(usize::MAX);
    screen.saturating_add(1).clamp(1, screens)
}

/// One screen's worth of lines, ready for the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// 1-based screen number.
    pub screen: usize,
    pub screens: usize,
    pub lines: Vec<String>,
    pub exits: ExitMask,
}

/// Wrapped text of the current room, kept until the room changes.
#[derive(Debug, Clone)]
pub struct Pager {
    text: String,
    spans: Vec<LineSpan>,
    layout: PageLayout,
    exits: ExitMask,
}

impl Pager {
    pub fn new(room: &Room, layout: PageLayout) -> Self {
        let text = format!("{}\n{}", room.title, room.description);
        let spans = wrap_spans(&text, layout.width);
        Self {
            text,
            spans,
            layout,
            exits: room.exit_mask(),
        }
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn line_count(&self) -> usize {
        self.spans.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.spans.iter().map(|span| &self.text[span.start..span.end])
    }

    /// Number of screens, never less than one.
    pub fn screen_count(&self) -> usize {
        self.line_count().div_ceil(self.height()).max(1)
    }

    pub fn screen_for_position(&self, position: u16) -> usize {
        screen_for_position(position, self.layout.position_max, self.screen_count())
    }

    /// The lines of `screen` (1-based, clamped to the valid range).
    pub fn page(&self, screen: usize) -> Page {
        let screens = self.screen_count();
        let screen = screen.clamp(1, screens);
        let height = self.height();
        let lines = self
            .lines()
            .skip((screen - 1) * height)
            .take(height)
            .map(str::to_string)
            .collect();
        Page {
            screen,
            screens,
            lines,
            exits: self.exits,
        }
    }

    pub fn page_at(&self, position: u16) -> Page {
        self.page(self.screen_for_position(position))
    }

    /// Lowest dial position that selects `screen`.
    pub fn position_for_screen(&self, screen: usize) -> u16 {
        let screens = self.screen_count() as u64;
        let screen = screen.clamp(1, self.screen_count()) as u64;
        let buckets = u64::from(self.layout.position_max) + 1;
        let position = ((screen - 1) * buckets).div_ceil(screens);
        u16::try_from(position).unwrap_or(u16::MAX).min(self.layout.position_max)
    }

    fn height(&self) -> usize {
        self.layout.height.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounded::RoomText;
    use crate::room::Exits;

    fn room(title: &str, desc: &str) -> Room {
        Room {
            number: 1,
            title: RoomText::from_bytes("title", title.as_bytes()).unwrap(),
            description: RoomText::from_bytes("description", desc.as_bytes()).unwrap(),
            exits: Exits::new(2, 0, 3, 0),
        }
    }

    fn layout(width: usize, height: usize) -> PageLayout {
        PageLayout {
            width,
            height,
            position_max: 1023,
        }
    }

    fn wrapped(text: &str, width: usize) -> Vec<&str> {
        wrap_spans(text, width).iter().map(|s| &text[s.start..s.end]).collect()
    }

    #[test]
    fn hall_scenario() {
        let pager = Pager::new(&room("Hall", "A dim hall extends."), layout(10, 2));
        assert_eq!(pager.lines().collect::<Vec<_>>(), vec!["Hall", "A dim hall", "extends."]);
        assert_eq!(pager.screen_count(), 2);
        assert_eq!(pager.page(1).lines, vec!["Hall", "A dim hall"]);
        assert_eq!(pager.page(2).lines, vec!["extends."]);
        assert_eq!(pager.page(2).exits, ExitMask::NORTH | ExitMask::SOUTH);
    }

    #[test]
    fn exact_width_fits_on_one_line() {
        assert_eq!(wrapped("abcd efghi", 10), vec!["abcd efghi"]);
        assert_eq!(wrapped("abcd efghij", 10), vec!["abcd", "efghij"]);
    }

    #[test]
    fn long_token_stops_wrapping() {
        let text = "T\nok abcdefghijklmnop more words here\nnext line stays whole";
        assert_eq!(
            wrapped(text, 5),
            vec!["T", "ok", "abcdefghijklmnop more words here", "next line stays whole"]
        );
    }

    #[test]
    fn empty_room_has_two_blank_lines_on_one_screen() {
        let pager = Pager::new(&room("", ""), layout(21, 4));
        assert_eq!(pager.line_count(), 2);
        assert_eq!(pager.screen_count(), 1);
        assert_eq!(pager.page_at(1023).lines, vec!["", ""]);
    }

    #[test]
    fn screen_count_boundaries() {
        // title plus three full description lines: exactly one screen of four
        let desc = "aaaaaaaaa bbbbbbbbb ccccccccc";
        let one = Pager::new(&room("Top", desc), layout(9, 4));
        assert_eq!(one.line_count(), 4);
        assert_eq!(one.screen_count(), 1);

        let two = Pager::new(&room("Top", &format!("{desc} d")), layout(9, 4));
        assert_eq!(two.line_count(), 5);
        assert_eq!(two.screen_count(), 2);
        assert_eq!(two.page(2).lines, vec!["d"]);
    }

    #[test]
    fn positions_split_evenly() {
        assert_eq!(screen_for_position(0, 1023, 2), 1);
        assert_eq!(screen_for_position(511, 1023, 2), 1);
        assert_eq!(screen_for_position(512, 1023, 2), 2);
        assert_eq!(screen_for_position(1023, 1023, 2), 2);
        assert_eq!(screen_for_position(1023, 1023, 3), 3);
        assert_eq!(screen_for_position(341, 1023, 3), 1);
        assert_eq!(screen_for_position(342, 1023, 3), 2);
        assert_eq!(screen_for_position(u16::MAX, 1023, 3), 3);
        assert_eq!(screen_for_position(700, 1023, 1), 1);
    }

    #[test]
    fn page_requests_are_clamped() {
        let pager = Pager::new(&room("Hall", "A dim hall extends."), layout(10, 2));
        assert_eq!(pager.page(0).screen, 1);
        assert_eq!(pager.page(9).screen, 2);
    }

    #[test]
    fn each_screen_has_a_dial_position() {
        let pager = Pager::new(&room("Hall", &"word ".repeat(30)), layout(21, 4));
        assert!(pager.screen_count() > 1);
        for screen in 1..=pager.screen_count() {
            let position = pager.position_for_screen(screen);
            assert_eq!(pager.screen_for_position(position), screen);
        }
        assert_eq!(pager.position_for_screen(1), 0);
    }

    #[test]
    fn multibyte_text_wraps_on_characters() {
        assert_eq!(wrapped("żółw żółw", 4), vec!["żółw", "żółw"]);
    }
}
