//! Legal information: imprint, privacy notice, acquisition profile.
//!
//! Documents are rendered into titled sections of plain lines. Lines whose
//! profile value is blank are dropped, and a section left without lines is
//! dropped with them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::i18n::translations;
use crate::profile::{present, ProfileRecord};
use crate::types::{Error, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalDocument {
    Imprint,
    Privacy,
    AcquisitionProfile,
}

impl FromStr for LegalDocument {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "imprint" | "impressum" => Ok(LegalDocument::Imprint),
            "privacy" | "datenschutz" => Ok(LegalDocument::Privacy),
            "acquisition" | "acquisition-profile" | "ankaufsprofil" => {
                Ok(LegalDocument::AcquisitionProfile)
            }
            other => Err(Error::validation(format!("unknown legal document '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalSection {
    pub heading: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalText {
    pub title: String,
    pub sections: Vec<LegalSection>,
}

impl fmt::Display for LegalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.heading.to_uppercase())?;
            for line in &section.lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

/// Collects sections, skipping blank values.
struct SectionBuilder {
    sections: Vec<LegalSection>,
}

impl SectionBuilder {
    fn new() -> Self {
        Self {
            sections: Vec::new(),
        }
    }

    fn section<'a, I>(mut self, heading: &str, lines: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .filter_map(|(label, value)| {
                present(value).map(|v| match label {
                    Some(label) => format!("{}: {}", label, v),
                    None => v.to_string(),
                })
            })
            .collect();
        if !lines.is_empty() {
            self.sections.push(LegalSection {
                heading: heading.to_string(),
                lines,
            });
        }
        self
    }

    fn build(self, title: &str) -> LegalText {
        LegalText {
            title: title.to_string(),
            sections: self.sections,
        }
    }
}

pub fn render(document: LegalDocument, profile: &ProfileRecord, lang: Language) -> LegalText {
    match document {
        LegalDocument::Imprint => imprint(profile, lang),
        LegalDocument::Privacy => privacy(profile, lang),
        LegalDocument::AcquisitionProfile => acquisition_profile(profile, lang),
    }
}

fn imprint(p: &ProfileRecord, lang: Language) -> LegalText {
    let de = lang == Language::De;
    let contact_email = p.imprint_email.as_deref().or(p.email.as_deref());

    SectionBuilder::new()
        .section(
            if de { "Angaben gemäß § 5 TMG" } else { "Information pursuant to § 5 TMG" },
            [(None, p.legal_entity_name.as_deref()), (None, p.postal_address.as_deref())],
        )
        .section(
            if de { "Vertreten durch" } else { "Represented by" },
            [(None, p.managing_director.as_deref())],
        )
        .section(
            if de { "Kontakt" } else { "Contact" },
            [
                (Some(if de { "Telefon" } else { "Phone" }), p.phone_number.as_deref()),
                (Some("E-Mail"), contact_email),
            ],
        )
        .section(
            if de { "Registereintrag" } else { "Register entry" },
            [
                (
                    Some(if de { "Registergericht" } else { "Register court" }),
                    p.register_court.as_deref(),
                ),
                (
                    Some(if de { "Registernummer" } else { "Register number" }),
                    p.register_number.as_deref(),
                ),
            ],
        )
        .section(
            if de { "Umsatzsteuer-ID" } else { "VAT ID" },
            [(
                Some(if de {
                    "Umsatzsteuer-Identifikationsnummer gemäß § 27 a Umsatzsteuergesetz"
                } else {
                    "VAT identification number according to § 27 a of the German VAT Act"
                }),
                p.vat_id.as_deref(),
            )],
        )
        .build(translations(lang).imprint)
}

fn privacy(p: &ProfileRecord, lang: Language) -> LegalText {
    let de = lang == Language::De;
    let (
        responsible,
        general_heading,
        general,
        fonts_heading,
        fonts,
        rights_heading,
        rights,
    ) = if de {
        (
            "Verantwortliche Stelle im Sinne der Datenschutzgesetze ist:",
            "Erfassung allgemeiner Informationen",
            "Wenn Sie auf diese Website zugreifen, werden automatisch Informationen allgemeiner \
                Natur erfasst. Diese Informationen (Server-Logfiles) beinhalten etwa die Art des \
                Webbrowsers, das verwendete Betriebssystem, den Domainnamen Ihres \
                Internet-Service-Providers und Ähnliches.",
            "Web Fonts & CDNs",
            "Diese Seite nutzt zur einheitlichen Darstellung von Schriftarten Web Fonts sowie \
                CDNs. Hierbei kann Ihre IP-Adresse an Server der Anbieter übertragen werden.",
            "Ihre Betroffenenrechte",
            "Unter den angegebenen Kontaktdaten können Sie jederzeit Auskunft über Ihre \
                gespeicherten Daten sowie deren Berichtigung, Löschung oder Einschränkung der \
                Verarbeitung verlangen.",
        )
    } else {
        (
            "The party responsible under data protection law is:",
            "Collection of general information",
            "When you access this website, general information is collected automatically. This \
                information (server log files) includes the type of web browser, the operating \
                system used, the domain name of your internet service provider and the like.",
            "Web fonts & CDNs",
            "This page uses web fonts and CDNs for consistent display. Your IP address may be \
                transmitted to the providers' servers in the process.",
            "Your rights",
            "Using the contact details provided, you may at any time request information about \
                your stored data as well as its correction, deletion or restriction of processing.",
        )
    };

    let heading = if de { "Datenschutzerklärung" } else { "Privacy policy" };
    let mut builder = SectionBuilder::new();
    if present(p.legal_entity_name.as_deref()).is_some()
        || present(p.postal_address.as_deref()).is_some()
    {
        builder = builder.section(
            heading,
            [
                (None, Some(responsible)),
                (None, p.legal_entity_name.as_deref()),
                (None, p.postal_address.as_deref()),
            ],
        );
    }
    builder
        .section(general_heading, [(None, Some(general))])
        .section(fonts_heading, [(None, Some(fonts))])
        .section(rights_heading, [(None, Some(rights))])
        .build(translations(lang).privacy)
}

fn acquisition_profile(p: &ProfileRecord, lang: Language) -> LegalText {
    let t = translations(lang);
    let body = p.acquisition_profile.resolve(lang);
    let lines = body.into_iter().flat_map(|text| text.lines()).map(|l| (None, Some(l)));
    SectionBuilder::new()
        .section(t.acquisition_profile, lines)
        .build(t.acquisition_profile)
}
