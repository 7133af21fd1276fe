//! Shared types used by every ofrenda crate.

pub mod types;

pub use types::{ObjectKind, Rgb, Transform};
