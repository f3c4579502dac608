//! Integration test utilities for the affiliate server
//!
//! Spawns the real HTTP application on an ephemeral port, backed by an
//! in-memory SQLite database and a recording mailer.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
