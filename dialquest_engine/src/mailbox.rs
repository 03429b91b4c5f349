//! Single-slot mailbox between the input sampler and the control loop.
//!
//! The sampler (a timer interrupt on hardware, the REPL here) posts the latest
//! directional press and dial position; the control loop takes each at most
//! once per iteration. Taking swaps the slot empty atomically, so a posted
//! value is seen exactly once.

use std::sync::atomic::{AtomicBool, AtomicU8, AtomicU16, Ordering};

use crate::room::Direction;

const NO_PRESS: u8 = 0;

#[derive(Debug, Default)]
pub struct InputMailbox {
    press: AtomicU8,
    position: AtomicU16,
    position_changed: AtomicBool,
}

impl InputMailbox {
    pub const fn new() -> Self {
        Self {
            press: AtomicU8::new(NO_PRESS),
            position: AtomicU16::new(0),
            position_changed: AtomicBool::new(false),
        }
    }

    /// Record a directional press, replacing any press not yet taken.
    pub fn post_press(&self, dir: Direction) {
        self.press.store(encode(dir), Ordering::Release);
    }

    /// Record a new dial position and raise the changed flag.
    pub fn post_position(&self, position: u16) {
        self.position.store(position, Ordering::Release);
        self.position_changed.store(true, Ordering::Release);
    }

    /// Take the pending press, if any, leaving the slot empty.
    pub fn take_press(&self) -> Option<Direction> {
        decode(self.press.swap(NO_PRESS, Ordering::AcqRel))
    }

    /// Take the position if it changed since the last take.
    pub fn take_position(&self) -> Option<u16> {
        if self.position_changed.swap(false, Ordering::AcqRel) {
            Some(self.position.load(Ordering::Acquire))
        } else {
            None
        }
    }
}

fn encode(dir: Direction) -> u8 {
    match dir {
        Direction::North => 1,
        Direction::East => 2,
        Direction::South => 3,
        Direction::West => 4,
    }
}

fn decode(raw: u8) -> Option<Direction> {
    match raw {
        1 => Some(Direction::North),
        2 => Some(Direction::East),
        3 => Some(Direction::South),
        4 => Some(Direction::West),
        _ => None,
    }
}
