//! Profile record of the card owner.
//!
//! The record is immutable configuration: one person, contact channels and
//! legal identifiers, with the job title and acquisition profile available in
//! both card languages.

mod store;

pub use store::{builtin_profile, load_profile};

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Text available in both card languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub de: String,
    #[serde(default)]
    pub en: String,
}

impl LocalizedText {
    pub fn new(de: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            de: de.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::De => &self.de,
            Language::En => &self.en,
        }
    }

    /// Text in `preferred`, falling back to the other language.
    ///
    /// Returns `None` when both are blank.
    pub fn resolve(&self, preferred: Language) -> Option<&str> {
        present(Some(self.get(preferred))).or_else(|| present(Some(self.get(preferred.other()))))
    }
}

/// The card owner's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub title: LocalizedText,

    /// Brand or company name.
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub legal_entity_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub postal_address: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,

    // Legal identifiers, shown in the imprint only.
    #[serde(default)]
    pub managing_director: Option<String>,
    #[serde(default)]
    pub imprint_email: Option<String>,
    #[serde(default)]
    pub register_court: Option<String>,
    #[serde(default)]
    pub register_number: Option<String>,
    #[serde(default)]
    pub vat_id: Option<String>,
    #[serde(default)]
    pub acquisition_profile: LocalizedText,

    /// Photo reference: URL, file path or data URL.
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub logo_image: Option<String>,
}

impl ProfileRecord {
    /// Minimal record with just a name.
    pub fn named(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// "First Last", skipping blank parts.
    pub fn full_name(&self) -> String {
        [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Trimmed value, or `None` when absent or blank.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_fallback() {
        let title = LocalizedText::new("", "Founder");
        assert_eq!(title.resolve(Language::De), Some("Founder"));
        assert_eq!(title.resolve(Language::En), Some("Founder"));

        let blank = LocalizedText::new("  ", "");
        assert_eq!(blank.resolve(Language::De), None);
    }

    #[test]
    fn test_full_name_skips_blank_parts() {
        assert_eq!(ProfileRecord::named("Marco", "Possinger").full_name(), "Marco Possinger");
        assert_eq!(ProfileRecord::named("", "Possinger").full_name(), "Possinger");
        assert_eq!(ProfileRecord::named("", "").full_name(), "");
    }

    #[test]
    fn test_deserialize_camel_case_with_missing_fields() {
        let profile: ProfileRecord = serde_json::from_str(
            r#"{ "firstName": "Marco", "lastName": "Possinger", "email": "m@x.de",
                 "title": { "en": "Founder" } }"#,
        )
        .unwrap();
        assert_eq!(profile.first_name, "Marco");
        assert_eq!(profile.email.as_deref(), Some("m@x.de"));
        assert_eq!(profile.title.de, "");
        assert!(profile.organization.is_none());
    }

    #[test]
    fn test_present_trims() {
        assert_eq!(present(Some("  x ")), Some("x"));
        assert_eq!(present(Some("   ")), None);
        assert_eq!(present(None), None);
    }
}
