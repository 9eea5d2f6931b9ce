//! Logic Module - Client, History & Controller
//!
//! - `classify/` - HTTP client for the remote classifier
//! - `history/` - bounded, persisted check history
//! - `controller` - check state machine tying the two together

pub mod classify;
pub mod controller;
pub mod history;
