//! Built-in profile and profile files.

use std::path::Path;
use std::sync::OnceLock;

use super::{LocalizedText, ProfileRecord};
use crate::types::{Error, Result};

static BUILTIN_PROFILE: OnceLock<ProfileRecord> = OnceLock::new();

/// The process-wide profile shipped with the card.
pub fn builtin_profile() -> &'static ProfileRecord {
    BUILTIN_PROFILE.get_or_init(|| ProfileRecord {
        first_name: "Marco".to_string(),
        last_name: "Possinger".to_string(),
        title: LocalizedText::new("Gründer und Geschäftsführer", "Founder & Managing Director"),
        organization: Some("Munich Living Solutions".to_string()),
        legal_entity_name: Some("BPD Briem Property Development GmbH".to_string()),
        email: Some("marco.possinger@munichlivingsolutions.de".to_string()),
        phone_number: Some("+4915783698237".to_string()),
        website_url: Some("https://www.munichlivingsolutions.de".to_string()),
        postal_address: Some("Bürgermeister-Schneider-Weg 163, 85579 Neubiberg".to_string()),
        linkedin_url: Some(
            "https://www.linkedin.com/in/marco-briem-465323201/?originalSubdomain=de".to_string(),
        ),
        profile_image: Some(
            "https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?q=80&w=1000&auto=format&fit=crop"
                .to_string(),
        ),
        ..ProfileRecord::default()
    })
}

/// Load a profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<ProfileRecord> {
    if !path.exists() {
        return Err(Error::not_found(format!("profile file {}", path.display())));
    }
    let raw = std::fs::read_to_string(path)?;
    let profile: ProfileRecord = serde_json::from_str(&raw)?;
    tracing::debug!("Loaded profile for {} from {}", profile.full_name(), path.display());
    Ok(profile)
}
