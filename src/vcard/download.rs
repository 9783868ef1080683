//! Download payload and the sinks that receive it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::profile::ProfileRecord;
use crate::types::Result;

/// Media type of the delivered file.
pub const VCARD_CONTENT_TYPE: &str = "text/vcard;charset=utf-8";

/// Names used when the profile has no name at all.
pub const FALLBACK_FIRST_NAME: &str = "contact";
pub const FALLBACK_LAST_NAME: &str = "card";

/// A finished vCard on its way to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VCardDownload {
    pub filename: String,
    pub content_type: &'static str,
    pub body: String,
}

impl VCardDownload {
    pub fn new(filename: String, body: String) -> Self {
        Self {
            filename,
            content_type: VCARD_CONTENT_TYPE,
            body,
        }
    }
}

/// `First_Last.vcf`.
///
/// A single blank part is dropped; when both are blank the fixed fallback
/// names are used. Characters unsafe in file names become `_`.
pub fn vcard_filename(profile: &ProfileRecord) -> String {
    let parts: Vec<String> = [profile.first_name.trim(), profile.last_name.trim()]
        .into_iter()
        .filter(|p| !p.is_empty())
        .map(sanitize_filename_part)
        .collect();

    let stem = if parts.is_empty() {
        format!("{}_{}", FALLBACK_FIRST_NAME, FALLBACK_LAST_NAME)
    } else {
        parts.join("_")
    };
    format!("{}.vcf", stem)
}

fn sanitize_filename_part(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() || c.is_whitespace() => '_',
            c => c,
        })
        .collect()
}

/// Receives the finished download.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver the payload. Returns where it ended up, if it is a place on disk.
    async fn deliver(&self, download: &VCardDownload) -> Result<Option<PathBuf>>;
}

/// Writes the card into a directory, replacing an older file of the same name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, download: &VCardDownload) -> Result<Option<PathBuf>> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(&download.filename);
        tokio::fs::write(&path, download.body.as_bytes()).await?;
        tracing::info!(
            "Saved {} ({} bytes, {})",
            path.display(),
            download.body.len(),
            download.content_type
        );
        Ok(Some(path))
    }
}

/// Writes the card text to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl DownloadSink for StdoutSink {
    async fn deliver(&self, download: &VCardDownload) -> Result<Option<PathBuf>> {
        let mut out = tokio::io::stdout();
        out.write_all(download.body.as_bytes()).await?;
        out.write_all(b"\r\n").await?;
        out.flush().await?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_names() {
        assert_eq!(
            vcard_filename(&ProfileRecord::named("Marco", "Possinger")),
            "Marco_Possinger.vcf"
        );
    }

    #[test]
    fn test_filename_fallbacks() {
        let name = vcard_filename(&ProfileRecord::named("", ""));
        assert_eq!(name, "contact_card.vcf");
        assert_ne!(name, "_.vcf");

        assert_eq!(vcard_filename(&ProfileRecord::named("  ", "Possinger")), "Possinger.vcf");
        assert_eq!(vcard_filename(&ProfileRecord::named("Marco", "")), "Marco.vcf");
    }

    #[test]
    fn test_filename_sanitized() {
        assert_eq!(
            vcard_filename(&ProfileRecord::named("Anna Lena", "../Müller")),
            "Anna_Lena_.._Müller.vcf"
        );
    }

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("cards"));
        let download = VCardDownload::new("A_B.vcf".to_string(), "BEGIN:VCARD".to_string());

        let location = sink.deliver(&download).await.unwrap().unwrap();
        assert_eq!(location, dir.path().join("cards").join("A_B.vcf"));
        assert_eq!(std::fs::read_to_string(location).unwrap(), "BEGIN:VCARD");
        assert_eq!(download.content_type, "text/vcard;charset=utf-8");
    }
}
