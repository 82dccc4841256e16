//! Chess rules engine with a thin HTTP game API.
//!
//! The `engine` module is the rules core: board and piece model, move
//! generation, attack indexing, pin resolution, and terminal-state
//! detection. The `api` module is the boundary layer: an axum router over
//! a keyed in-memory game registry. The engine takes no dependency on the
//! registry or the transport.

pub mod api;
pub mod config;
pub mod engine;
