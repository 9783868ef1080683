//! Configuration structures.
//!
//! Configuration is loaded from a JSON file and environment variables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{Error, Language, Result};

/// Global configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Profile JSON file. The built-in profile is used when unset.
    #[serde(default)]
    pub profile_path: Option<PathBuf>,

    /// vCard generation settings.
    #[serde(default)]
    pub vcard: VCardConfig,

    /// Profile image sources and uploaded-image store.
    #[serde(default)]
    pub images: ImageConfig,

    /// Photo fetch settings.
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Where downloaded cards are written.
    #[serde(default)]
    pub output: OutputConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Load configuration from `path` (or defaults) and apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => {
                let raw = std::fs::read_to_string(p).map_err(|e| {
                    Error::config(format!("cannot read {}: {}", p.display(), e))
                })?;
                serde_json::from_str(&raw)?
            }
            None => Config::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `BIZCARD_*` overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(lang) = lookup("BIZCARD_LANG") {
            self.vcard.default_language = lang.parse()?;
        }
        if let Some(flag) = lookup("BIZCARD_INCLUDE_PHONE") {
            self.vcard.include_phone = parse_bool(&flag).ok_or_else(|| {
                Error::config(format!("BIZCARD_INCLUDE_PHONE: invalid boolean '{}'", flag))
            })?;
        }
        if let Some(dir) = lookup("BIZCARD_OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// vCard generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VCardConfig {
    /// Language used for the title and note labels.
    pub default_language: Language,

    /// Emit a TEL line. Off by default for privacy.
    pub include_phone: bool,
}

impl Default for VCardConfig {
    fn default() -> Self {
        Self {
            default_language: Language::PRIMARY,
            include_phone: false,
        }
    }
}

/// Profile image sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Configured photo reference (URL, path or data URL). Overrides the profile's own.
    pub profile_image: Option<String>,

    /// Uploaded-image store file.
    pub store_path: PathBuf,

    /// Store key of the uploaded profile photo.
    pub profile_key: String,

    /// Store key of the uploaded logo.
    pub logo_key: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            profile_image: None,
            store_path: PathBuf::from(".bizcard/images.json"),
            profile_key: "bizcard.profileImage".to_string(),
            logo_key: "bizcard.logoImage".to_string(),
        }
    }
}

/// Photo fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout. Unset means the HTTP client default.
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,

    /// User-Agent header sent with photo requests.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("bizcard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the `.vcf` file is written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
