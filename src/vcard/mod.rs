//! vCard 3.0 contact-file generation.
//!
//! Output layout:
//! ```text
//! BEGIN:VCARD
//! VERSION:3.0
//! FN:<full name>
//! N:<last>;<first>;;;
//! ORG / TITLE / TEL / EMAIL / URL / item1.URL + item1.X-ABLabel / ADR / NOTE / PHOTO
//! END:VCARD
//! ```
//! Lines are joined with CRLF. Every property after `N` is optional and is
//! left out entirely when its source value is blank.

pub mod builder;
pub mod download;
pub mod escape;
mod serializer;

pub use builder::{PropertyList, VCardDocument};
pub use download::{
    vcard_filename, DirectorySink, DownloadSink, StdoutSink, VCardDownload, VCARD_CONTENT_TYPE,
};
pub use escape::{escape_text, unescape_text};
pub use serializer::{build_vcard, compose_note, generate_vcard, SaveReport, VCardOptions};
