//! # bizcard-core - Digital Business Card
//!
//! Library behind a personal digital business card:
//! - vCard 3.0 generation with escaping, optional-field omission and photo embedding
//! - Photo resolution from data URLs, http(s) URLs and local files
//! - Contact actions (call, email, LinkedIn, WhatsApp) and share text
//! - German/English UI strings and legal texts (imprint, privacy, acquisition profile)
//! - Uploaded-image storage behind a key-value store capability
//!
//! ## Save-contact flow
//!
//! ```text
//!   button → ContactSaver ──(one at a time)──→ generate_vcard
//!                                               │
//!             ImageReference ─→ ImageResolver ──┤ (failure: no PHOTO)
//!             ProfileRecord ─→ build_vcard ─────┤
//!                                               ▼
//!                                         DownloadSink (.vcf)
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod actions;
pub mod i18n;
pub mod image;
pub mod legal;
pub mod profile;
pub mod shell;
pub mod storage;
pub mod types;
pub mod vcard;

// Internal utilities
pub mod observability;

pub use types::{Config, Error, Language, Result};
