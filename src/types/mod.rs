//! Core types for the business card crate.
//!
//! This module provides foundational types used throughout the system:
//! - **Language**: the two supported card languages
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for vCard output, images and logging

mod config;
mod errors;
mod language;

pub use config::{
    Config, FetchConfig, ImageConfig, ObservabilityConfig, OutputConfig, VCardConfig,
};
pub use errors::{Error, Result};
pub use language::Language;
