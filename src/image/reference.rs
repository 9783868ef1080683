//! Image references and resolved photo payloads.

use base64::{engine::general_purpose, Engine};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Subtype used when a data URL header cannot be parsed.
pub const FALLBACK_MIME_SUBTYPE: &str = "JPEG";

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = "base64,";

/// Where the profile photo comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageReference {
    /// Already base64-encoded payload with its declared mime subtype.
    Embedded { mime_subtype: String, data: String },
    /// http(s) URL, `file://` URL or filesystem path to fetch.
    Remote { locator: String },
}

impl ImageReference {
    /// Classify a raw reference string. Blank input yields `None`.
    ///
    /// `data:` URLs become [`ImageReference::Embedded`]; everything else is
    /// [`ImageReference::Remote`].
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with(DATA_URL_PREFIX) {
            return Some(parse_data_url(raw));
        }
        Some(ImageReference::Remote {
            locator: raw.to_string(),
        })
    }

    pub fn embedded(mime_subtype: impl Into<String>, data: impl Into<String>) -> Self {
        ImageReference::Embedded {
            mime_subtype: mime_subtype.into(),
            data: data.into(),
        }
    }

    pub fn remote(locator: impl Into<String>) -> Self {
        ImageReference::Remote {
            locator: locator.into(),
        }
    }
}

fn parse_data_url(raw: &str) -> ImageReference {
    let (header, data) = match raw.split_once(BASE64_MARKER) {
        Some((header, data)) => (header, data),
        None => (raw, ""),
    };
    // header: "data:image/png;" (the marker consumed the trailing "base64,")
    let mime_subtype = header
        .strip_prefix(DATA_URL_PREFIX)
        .and_then(|rest| rest.split(|c: char| c == ';' || c == ',').next())
        .and_then(|media_type| media_type.split_once('/'))
        .map(|(_, subtype)| subtype.trim())
        .filter(|subtype| !subtype.is_empty())
        .map(str::to_ascii_uppercase)
        .unwrap_or_else(|| FALLBACK_MIME_SUBTYPE.to_string());

    ImageReference::Embedded {
        mime_subtype,
        data: data.to_string(),
    }
}

/// Subtype of an `image/*` content type, upper-cased.
///
/// Parameters such as `; charset=...` are ignored. Non-image types yield `None`.
pub fn mime_subtype_from_content_type(content_type: &str) -> Option<String> {
    let media_type = content_type.split(';').next()?.trim();
    let (top, subtype) = media_type.split_once('/')?;
    if !top.trim().eq_ignore_ascii_case("image") || subtype.trim().is_empty() {
        return None;
    }
    Some(subtype.trim().to_ascii_uppercase())
}

/// Subtype for a local image file, from its extension.
pub fn mime_subtype_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("JPEG"),
        "png" => Some("PNG"),
        "gif" => Some("GIF"),
        "webp" => Some("WEBP"),
        "bmp" => Some("BMP"),
        "heic" => Some("HEIC"),
        "svg" => Some("SVG+XML"),
        _ => None,
    }
}

/// A photo ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub mime_subtype: String,
    pub base64_data: String,
}

impl ResolvedImage {
    pub fn new(mime_subtype: impl AsRef<str>, base64_data: impl Into<String>) -> Self {
        Self {
            mime_subtype: mime_subtype.as_ref().to_ascii_uppercase(),
            base64_data: base64_data.into(),
        }
    }

    /// Encode raw image bytes.
    pub fn from_bytes(mime_subtype: impl AsRef<str>, bytes: &[u8]) -> Self {
        Self::new(mime_subtype, general_purpose::STANDARD.encode(bytes))
    }

    /// `data:image/<subtype>;base64,<data>`
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/{};base64,{}",
            self.mime_subtype.to_ascii_lowercase(),
            self.base64_data
        )
    }
}
