//! Supported card languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Error;

/// Language of the card. German is the primary language, English the secondary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    De,
    En,
}

impl Language {
    pub const PRIMARY: Language = Language::De;
    pub const SECONDARY: Language = Language::En;
    pub const ALL: [Language; 2] = [Language::De, Language::En];

    /// The fallback language.
    pub fn other(self) -> Language {
        match self {
            Language::De => Language::En,
            Language::En => Language::De,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "de" | "primary" => Ok(Language::De),
            "en" | "secondary" => Ok(Language::En),
            other => Err(Error::validation(format!(
                "unknown language '{}', expected one of: de, en",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("de".parse::<Language>().unwrap(), Language::De);
        assert_eq!(" EN ".parse::<Language>().unwrap(), Language::En);
        assert_eq!("secondary".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_other_flips() {
        assert_eq!(Language::PRIMARY.other(), Language::SECONDARY);
        assert_eq!(Language::En.other(), Language::De);
        assert_eq!(Language::default(), Language::De);
    }
}
