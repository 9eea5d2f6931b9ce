//! API Module - user-facing surface
//!
//! Structure:
//! - view.rs: text rendering of results and history
//! - commands.rs: handlers shared by the CLI and the shell
//! - shell.rs: interactive two-tab checker

pub mod commands;
pub mod shell;
pub mod view;
