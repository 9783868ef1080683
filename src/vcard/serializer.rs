//! Profile → vCard 3.0.

use std::path::PathBuf;

use super::builder::{PropertyList, VCardDocument};
use super::download::{vcard_filename, DownloadSink, VCardDownload};
use super::escape::escape_text;
use crate::i18n::translations;
use crate::image::{resolve_image, ImageReference, ImageResolver, ResolvedImage};
use crate::profile::{present, ProfileRecord};
use crate::types::{Language, Result};

/// Per-call serialization choices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VCardOptions {
    /// Language for the title and the note labels.
    pub language: Language,
    /// Emit a TEL line.
    pub include_phone: bool,
}

impl VCardOptions {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            include_phone: false,
        }
    }

    pub fn with_phone(mut self, include_phone: bool) -> Self {
        self.include_phone = include_phone;
        self
    }
}

/// Outcome of one generated card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub filename: String,
    pub bytes: usize,
    pub photo_embedded: bool,
    pub location: Option<PathBuf>,
}

/// Assemble the document. Synchronous and infallible.
pub fn build_vcard(
    profile: &ProfileRecord,
    photo: Option<&ResolvedImage>,
    options: &VCardOptions,
) -> VCardDocument {
    let phone = if options.include_phone {
        profile.phone_number.as_deref()
    } else {
        None
    };
    let linkedin = present(profile.linkedin_url.as_deref());

    let properties = PropertyList::new()
        .always("FN", escape_text(&profile.full_name()))
        .always(
            "N",
            format!(
                "{};{};;;",
                escape_text(profile.last_name.trim()),
                escape_text(profile.first_name.trim())
            ),
        )
        .text("ORG", profile.organization.as_deref())
        .text("TITLE", profile.title.resolve(options.language))
        .text("TEL;TYPE=CELL,VOICE", phone)
        .text("EMAIL;TYPE=PREF,INTERNET", profile.email.as_deref())
        .text("URL", profile.website_url.as_deref())
        .text("item1.URL", linkedin)
        .encoded("item1.X-ABLabel", linkedin.map(|_| "LinkedIn".to_string()))
        .structured("ADR;TYPE=WORK", profile.postal_address.as_deref(), |v| {
            format!(";;{};;;", v)
        })
        .text("NOTE", compose_note(profile, options.language).as_deref())
        .encoded(
            photo
                .map(|p| format!("PHOTO;ENCODING=b;TYPE={}", p.mime_subtype.to_ascii_uppercase()))
                .unwrap_or_else(|| "PHOTO".to_string()),
            photo.map(|p| p.base64_data.clone()),
        );

    tracing::debug!("vCard properties: {:?}", properties.emitted_names());
    VCardDocument::from_properties(properties)
}

/// Multi-line note from organization and legal entity, or `None` if both are blank.
///
/// Lines are joined with a raw newline; escaping turns it into `\n`.
pub fn compose_note(profile: &ProfileRecord, lang: Language) -> Option<String> {
    let t = translations(lang);
    let lines: Vec<String> = [
        (t.note_company, profile.organization.as_deref()),
        (t.note_legal_entity, profile.legal_entity_name.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, value)| present(value).map(|v| format!("{}: {}", label, v)))
    .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Build the card and hand it to `sink`.
///
/// The photo is resolved once; a failed resolution is logged and the card is
/// produced without PHOTO. Only the sink can make this fail.
pub async fn generate_vcard(
    profile: &ProfileRecord,
    image: Option<&ImageReference>,
    options: &VCardOptions,
    resolver: &dyn ImageResolver,
    sink: &dyn DownloadSink,
) -> Result<SaveReport> {
    let photo = match image {
        Some(reference) => resolve_image(resolver, reference).await,
        None => None,
    };

    let document = build_vcard(profile, photo.as_ref(), options);
    let download = VCardDownload::new(vcard_filename(profile), document.to_text());
    let location = sink.deliver(&download).await?;

    tracing::info!(
        "Generated vCard {} (lang={}, photo={})",
        download.filename,
        options.language,
        photo.is_some()
    );

    Ok(SaveReport {
        filename: download.filename,
        bytes: download.body.len(),
        photo_embedded: photo.is_some(),
        location,
    })
}
