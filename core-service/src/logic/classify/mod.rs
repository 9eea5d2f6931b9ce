//! Classification Module - Client for the remote classifier
//!
//! This module handles:
//! - Request bodies and endpoints per check kind
//! - Response schema checking
//! - Mapping HTTP and transport failures to `ClassifyError`

pub mod client;
pub mod types;


pub use client::{ApiClient, Classifier, ClassifyError};
pub use types::{score_percent, CheckKind, ClassificationResult, HealthResponse};
