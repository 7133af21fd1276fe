//! Player input: discrete actions mapped from buttons and keys, and the
//! player stats they mutate.
//!
//! # Invariants
//! - Energy always lies in `[0, 100]`.
//! - Offerings never decrease.
//! - Desktop buttons, key bindings and CLI scripts all produce the same `Action`.

pub mod action;
pub mod player;

pub use action::{Action, ActionBindings, ActionParseError, parse_script};
pub use player::{MAX_ENERGY, PlayerState};
