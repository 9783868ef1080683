//! Photo resolution: turn an [`ImageReference`] into a [`ResolvedImage`].

use async_trait::async_trait;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{alphabet, Engine};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use std::path::Path;

use super::reference::{
    mime_subtype_from_content_type, mime_subtype_from_extension, ImageReference, ResolvedImage,
    FALLBACK_MIME_SUBTYPE,
};
use crate::types::{Error, FetchConfig, Result};

/// Capability that resolves a photo reference.
///
/// Both variants go through the same call so the serializer never cares
/// whether the bytes were embedded or fetched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageResolver: Send + Sync {
    async fn resolve(&self, reference: &ImageReference) -> Result<ResolvedImage>;
}

/// Resolve a reference, logging and swallowing any failure.
pub async fn resolve_image(
    resolver: &dyn ImageResolver,
    reference: &ImageReference,
) -> Option<ResolvedImage> {
    match resolver.resolve(reference).await {
        Ok(image) => {
            tracing::debug!(
                "Resolved profile photo: type={}, {} base64 chars",
                image.mime_subtype,
                image.base64_data.len()
            );
            Some(image)
        }
        Err(e) => {
            tracing::warn!("profile_photo_unavailable: {}", e);
            None
        }
    }
}

/// Resolver backed by `reqwest` for http(s) and `tokio::fs` for local files.
#[derive(Debug, Clone)]
pub struct HttpImageResolver {
    client: reqwest::Client,
}

impl HttpImageResolver {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::config(format!("invalid user agent: {}", e)))?;
        headers.insert(USER_AGENT, agent);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn fetch_http(&self, url: &str) -> Result<ResolvedImage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::image_fetch(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::image_fetch(format!("{}: HTTP {}", url, status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let mime_subtype = mime_subtype_from_content_type(&content_type).ok_or_else(|| {
            Error::image_fetch(format!("{}: unsupported content type '{}'", url, content_type))
        })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::image_fetch(format!("{}: {}", url, e)))?;
        if bytes.is_empty() {
            return Err(Error::image_fetch(format!("{}: empty body", url)));
        }

        Ok(ResolvedImage::from_bytes(mime_subtype, &bytes))
    }

    async fn read_local(&self, locator: &str) -> Result<ResolvedImage> {
        let path = Path::new(locator.strip_prefix("file://").unwrap_or(locator));
        let mime_subtype = mime_subtype_from_extension(path).ok_or_else(|| {
            Error::image_fetch(format!("{}: unknown image type", path.display()))
        })?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::image_fetch(format!("{}: {}", path.display(), e)))?;
        if bytes.is_empty() {
            return Err(Error::image_fetch(format!("{}: empty file", path.display())));
        }
        Ok(ResolvedImage::from_bytes(mime_subtype, &bytes))
    }
}

#[async_trait]
impl ImageResolver for HttpImageResolver {
    async fn resolve(&self, reference: &ImageReference) -> Result<ResolvedImage> {
        match reference {
            ImageReference::Embedded { mime_subtype, data } => {
                resolve_embedded(mime_subtype, data)
            }
            ImageReference::Remote { locator } => {
                let locator = locator.trim();
                if locator.starts_with("http://") || locator.starts_with("https://") {
                    self.fetch_http(locator).await
                } else {
                    self.read_local(locator).await
                }
            }
        }
    }
}

/// Standard alphabet; accepts payloads with or without trailing `=`.
const EMBEDDED_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Validate an embedded payload. Whitespace inside the base64 text is removed;
/// the payload itself is kept as given.
pub fn resolve_embedded(mime_subtype: &str, data: &str) -> Result<ResolvedImage> {
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(Error::image_fetch("embedded image has no base64 payload"));
    }
    EMBEDDED_ENGINE
        .decode(&compact)
        .map_err(|e| Error::image_fetch(format!("embedded image is not valid base64: {}", e)))?;

    let mime_subtype = match mime_subtype.trim() {
        "" => FALLBACK_MIME_SUBTYPE,
        subtype => subtype,
    };
    Ok(ResolvedImage::new(mime_subtype, compact))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_resolve_embedded() {
        let image = resolve_embedded("png", "QU\nJD").unwrap();
        assert_eq!(image, ResolvedImage::new("PNG", "QUJD"));

        let image = resolve_embedded("", "QUJD").unwrap();
        assert_eq!(image.mime_subtype, FALLBACK_MIME_SUBTYPE);
    }

    #[test]
    fn test_resolve_embedded_keeps_unpadded_payload() {
        let image = resolve_embedded("png", "QUJDRA").unwrap();
        assert_eq!(image, ResolvedImage::new("PNG", "QUJDRA"));

        let image = resolve_embedded("png", "QUJDRA==").unwrap();
        assert_eq!(image.base64_data, "QUJDRA==");
    }

    #[test]
    fn test_resolve_embedded_rejects_bad_payload() {
        assert!(matches!(resolve_embedded("PNG", ""), Err(Error::ImageFetch(_))));
        assert!(matches!(resolve_embedded("PNG", "!!!"), Err(Error::ImageFetch(_))));
    }

    #[tokio::test]
    async fn test_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portrait.png");
        std::fs::write(&path, b"ABC").unwrap();

        let resolver = HttpImageResolver::new(&FetchConfig::default()).unwrap();
        let image = resolver
            .resolve(&ImageReference::remote(path.display().to_string()))
            .await
            .unwrap();
        assert_eq!(image, ResolvedImage::new("PNG", "QUJD"));

        let url = format!("file://{}", path.display());
        let image = resolver.resolve(&ImageReference::remote(url)).await.unwrap();
        assert_eq!(image.base64_data, "QUJD");
    }

    #[tokio::test]
    async fn test_local_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = HttpImageResolver::new(&FetchConfig::default()).unwrap();

        let missing = dir.path().join("missing.jpg");
        let err = resolver
            .resolve(&ImageReference::remote(missing.display().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ImageFetch(_)));

        let text = dir.path().join("notes.txt");
        std::fs::write(&text, b"hello").unwrap();
        let err = resolver
            .resolve(&ImageReference::remote(text.display().to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ImageFetch(_)));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_resolve_image_logs_failure() {
        let mut mock = MockImageResolver::new();
        mock.expect_resolve()
            .times(1)
            .returning(|_| Err(Error::image_fetch("connection refused")));

        let resolved = resolve_image(&mock, &ImageReference::remote("https://x/p.jpg")).await;
        assert!(resolved.is_none());
        assert!(logs_contain("profile_photo_unavailable"));
        assert!(logs_contain("connection refused"));
    }

    #[test]
    fn test_invalid_user_agent_rejected() {
        let config = FetchConfig {
            timeout: None,
            user_agent: "bad\nagent".to_string(),
        };
        assert!(matches!(HttpImageResolver::new(&config), Err(Error::Config(_))));
    }
}
