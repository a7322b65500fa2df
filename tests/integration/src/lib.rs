//! Integration test utilities for the volunteer API
//!
//! Spawns the real HTTP application against a PostgreSQL database and
//! drives it with `reqwest`.

pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
