//! Static UI strings for both card languages.

use crate::types::Language;

/// Labels shown on the card and in generated texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub save_contact: &'static str,
    pub call: &'static str,
    pub email: &'static str,
    pub linkedin: &'static str,
    pub whatsapp: &'static str,
    pub back: &'static str,
    pub download_vcard: &'static str,
    pub imprint: &'static str,
    pub privacy: &'static str,
    pub acquisition_profile: &'static str,
    pub close: &'static str,
    /// Prefix of the organization line in the vCard note.
    pub note_company: &'static str,
    /// Prefix of the legal-entity line in the vCard note.
    pub note_legal_entity: &'static str,
}

const DE: Translations = Translations {
    save_contact: "Kontakt speichern",
    call: "Anrufen",
    email: "E-Mail",
    linkedin: "LinkedIn",
    whatsapp: "WhatsApp",
    back: "Zurück",
    download_vcard: "vCard laden",
    imprint: "Impressum",
    privacy: "Datenschutz",
    acquisition_profile: "Ankaufsprofil",
    close: "Schließen",
    note_company: "Firma",
    note_legal_entity: "Rechtsträger",
};

const EN: Translations = Translations {
    save_contact: "Save Contact",
    call: "Call",
    email: "Email",
    linkedin: "LinkedIn",
    whatsapp: "WhatsApp",
    back: "Back",
    download_vcard: "Download vCard",
    imprint: "Imprint",
    privacy: "Privacy",
    acquisition_profile: "Acquisition Profile",
    close: "Close",
    note_company: "Company",
    note_legal_entity: "Legal entity",
};

pub fn translations(lang: Language) -> &'static Translations {
    match lang {
        Language::De => &DE,
        Language::En => &EN,
    }
}

/// Entry of the language switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageOption {
    pub language: Language,
    pub label: &'static str,
    pub flag: &'static str,
}

pub const LANGUAGE_OPTIONS: [LanguageOption; 2] = [
    LanguageOption {
        language: Language::De,
        label: "Deutsch",
        flag: "🇩🇪",
    },
    LanguageOption {
        language: Language::En,
        label: "English",
        flag: "🇺🇸",
    },
];

pub fn language_option(lang: Language) -> &'static LanguageOption {
    match lang {
        Language::De => &LANGUAGE_OPTIONS[0],
        Language::En => &LANGUAGE_OPTIONS[1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_per_language() {
        assert_eq!(translations(Language::De).save_contact, "Kontakt speichern");
        assert_eq!(translations(Language::En).save_contact, "Save Contact");
    }

    #[test]
    fn test_switcher_options_cover_all_languages() {
        for lang in Language::ALL {
            assert_eq!(language_option(lang).language, lang);
        }
        assert_eq!(language_option(Language::En).label, "English");
    }
}
