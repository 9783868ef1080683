//! Contact actions shown on the card (call, email, LinkedIn, WhatsApp).

use crate::i18n::translations;
use crate::profile::{present, ProfileRecord};
use crate::types::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Call,
    Email,
    LinkedIn,
    WhatsApp,
}

/// A labelled link the user can follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAction {
    pub kind: ActionKind,
    pub label: &'static str,
    pub href: String,
}

/// Available actions in display order. Channels the profile lacks are skipped.
pub fn contact_actions(profile: &ProfileRecord, lang: Language) -> Vec<ContactAction> {
    let t = translations(lang);
    let phone = present(profile.phone_number.as_deref());

    let candidates = [
        (ActionKind::Call, t.call, phone.map(tel_href)),
        (
            ActionKind::Email,
            t.email,
            present(profile.email.as_deref()).map(|e| format!("mailto:{}", e)),
        ),
        (
            ActionKind::LinkedIn,
            t.linkedin,
            present(profile.linkedin_url.as_deref()).map(str::to_string),
        ),
        (ActionKind::WhatsApp, t.whatsapp, phone.and_then(whatsapp_href)),
    ];

    candidates
        .into_iter()
        .filter_map(|(kind, label, href)| href.map(|href| ContactAction { kind, label, href }))
        .collect()
}

fn tel_href(phone: &str) -> String {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{}", compact)
}

/// `https://wa.me/<digits>`; `None` when the number has no digits.
fn whatsapp_href(phone: &str) -> Option<String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        Some(format!("https://wa.me/{}", digits))
    }
}

/// Text shared when the card link is copied.
pub fn share_text(profile: &ProfileRecord, page_url: &str) -> String {
    let name = profile.full_name();
    match (name.is_empty(), page_url.trim()) {
        (_, "") => name,
        (true, url) => url.to_string(),
        (false, url) => format!("{} - {}", name, url),
    }
}
