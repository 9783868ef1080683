//! Profile photo sources.
//!
//! A photo is either embedded as a data URL or fetched from a locator. The
//! serializer only sees [`ImageResolver::resolve`], which handles both.

mod reference;
mod resolver;

pub use reference::{
    mime_subtype_from_content_type, mime_subtype_from_extension, ImageReference, ResolvedImage,
    FALLBACK_MIME_SUBTYPE,
};
pub use resolver::{resolve_embedded, resolve_image, HttpImageResolver, ImageResolver};

#[cfg(test)]
pub use resolver::MockImageResolver;

/// Pick the photo for the card: an uploaded image wins over configured ones.
///
/// `configured` is tried in order; the first non-blank reference is used.
pub fn select_profile_image<'a, I>(
    uploaded: Option<&'a str>,
    configured: I,
) -> Option<ImageReference>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    std::iter::once(uploaded)
        .chain(configured)
        .flatten()
        .find_map(ImageReference::parse)
}
