//! Uploaded-image persistence behind a key-value store capability.
//!
//! Two slots exist (profile photo and logo). Images are stored as base64
//! data URLs so they can be used as an [`ImageReference`] directly.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;

use crate::image::{mime_subtype_from_extension, resolve_embedded, ImageReference, ResolvedImage};
use crate::types::{Error, ImageConfig, Result};

/// String key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| Error::internal("memory store lock poisoned"))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object in a single file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }

    fn modify<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::internal("file store lock poisoned"))?;
        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.modify(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.modify(|entries| {
            entries.remove(key);
        })
    }
}

/// Image slot of the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSlot {
    Profile,
    Logo,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 2] = [ImageSlot::Profile, ImageSlot::Logo];
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSlot::Profile => f.write_str("profile"),
            ImageSlot::Logo => f.write_str("logo"),
        }
    }
}

impl FromStr for ImageSlot {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profile" => Ok(ImageSlot::Profile),
            "logo" => Ok(ImageSlot::Logo),
            other => Err(Error::validation(format!(
                "unknown image slot '{}', expected one of: profile, logo",
                other
            ))),
        }
    }
}

/// User-uploaded images kept in a [`KeyValueStore`].
#[derive(Debug)]
pub struct UploadedImages<S> {
    store: S,
    profile_key: String,
    logo_key: String,
}

impl<S: KeyValueStore> UploadedImages<S> {
    pub fn new(store: S, profile_key: impl Into<String>, logo_key: impl Into<String>) -> Self {
        Self {
            store,
            profile_key: profile_key.into(),
            logo_key: logo_key.into(),
        }
    }

    pub fn with_config(store: S, config: &ImageConfig) -> Self {
        Self::new(store, config.profile_key.clone(), config.logo_key.clone())
    }

    pub fn key(&self, slot: ImageSlot) -> &str {
        match slot {
            ImageSlot::Profile => &self.profile_key,
            ImageSlot::Logo => &self.logo_key,
        }
    }

    /// Stored data URL of `slot`.
    pub fn get(&self, slot: ImageSlot) -> Result<Option<String>> {
        self.store.get(self.key(slot))
    }

    /// Like [`get`](Self::get), but a store that cannot be read counts as
    /// empty. Used when picking the card photo, which must not abort a save.
    pub fn get_or_skip(&self, slot: ImageSlot) -> Option<String> {
        match self.get(slot) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("uploaded_image_unavailable: {} image: {}", slot, e);
                None
            }
        }
    }

    /// Stored image of `slot` as a reference.
    pub fn reference(&self, slot: ImageSlot) -> Result<Option<ImageReference>> {
        Ok(self.get(slot)?.as_deref().and_then(ImageReference::parse))
    }

    /// Store a data URL after checking that it carries a usable payload.
    pub fn set_data_url(&self, slot: ImageSlot, data_url: &str) -> Result<ResolvedImage> {
        let image = match ImageReference::parse(data_url) {
            Some(ImageReference::Embedded { mime_subtype, data }) => {
                resolve_embedded(&mime_subtype, &data)
                    .map_err(|e| Error::validation(e.to_string()))?
            }
            _ => return Err(Error::validation("expected a base64 data URL")),
        };
        self.store.set(self.key(slot), &image.to_data_url())?;
        Ok(image)
    }

    /// Read an image file and store it in `slot`.
    pub fn upload_file(&self, slot: ImageSlot, path: &Path) -> Result<ResolvedImage> {
        let mime_subtype = mime_subtype_from_extension(path).ok_or_else(|| {
            Error::validation(format!("{}: not a supported image type", path.display()))
        })?;
        if !path.exists() {
            return Err(Error::not_found(format!("image file {}", path.display())));
        }
        let bytes = std::fs::read(path)?;
        if bytes.is_empty() {
            return Err(Error::validation(format!("{}: empty file", path.display())));
        }
        let image = ResolvedImage::from_bytes(mime_subtype, &bytes);
        self.store.set(self.key(slot), &image.to_data_url())?;
        tracing::info!("Stored {} image from {} ({} bytes)", slot, path.display(), bytes.len());
        Ok(image)
    }

    pub fn clear(&self, slot: ImageSlot) -> Result<()> {
        self.store.remove(self.key(slot))
    }
}
