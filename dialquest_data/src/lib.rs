//! Shared data model for Dialquest content.
//!
//! Authors describe rooms and their inventory-gated variants in TOML; this
//! crate validates that description and encodes each room into the binary
//! record the engine decodes at runtime.

pub mod defs;
pub mod encode;
pub mod validate;

pub use defs::*;
pub use encode::{EncodeError, encode_room};
pub use validate::{ValidationError, validate_world};
