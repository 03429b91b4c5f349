#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const DIALQUEST_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod bounded;
pub mod command;
pub mod config;
pub mod data_paths;
pub mod display;
pub mod error;
pub mod inventory;
pub mod loader;
pub mod mailbox;
pub mod navigator;
pub mod paginate;
pub mod record;
pub mod repl;
pub mod room;
pub mod session;
pub mod source;
pub mod store;
pub mod style;

// Re-exports for convenience
pub use config::{EngineConfig, load_config};
pub use display::{DisplayDriver, Notice, TerminalDisplay};
pub use error::{EngineError, Severity};
pub use inventory::Inventory;
pub use loader::{GameData, load_game};
pub use mailbox::InputMailbox;
pub use navigator::{GrantPolicy, MoveOutcome, MoveReport, Navigator};
pub use paginate::{Page, PageLayout, Pager};
pub use record::{ParsedRoom, parse_room};
pub use repl::run_repl;
pub use room::{Direction, ExitMask, Room};
pub use session::{Session, StepOutcome};
pub use store::{DirRoomStore, MemoryRoomStore, RoomStore};
