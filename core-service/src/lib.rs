//! Rakshak - XSS and phishing checker client
//!
//! Submits payloads and URLs to a remote classification API, renders the
//! returned label, score and reasons, and keeps a bounded local history.

pub mod api;
pub mod config;
pub mod constants;
pub mod logic;

pub use config::Config;
