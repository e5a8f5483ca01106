//! Photo upload validation and storage naming.
//!
//! Pure helpers for the upload endpoint: content-based MIME sniffing (the
//! client-supplied filename and Content-Type are never trusted), the size
//! cap, and derivation of the date-partitioned storage path and random
//! filename. The actual filesystem write lives in the API layer.

use uuid::Uuid;

/// Maximum accepted photo size (10 MiB).
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Prefix for generated photo filenames.
const FILENAME_PREFIX: &str = "fg_";

/// Upload-specific failures, in validation order.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// No `photo` file part was present in the request.
    #[error("No photo file was uploaded.")]
    NoFile,

    /// Reading the file from the request transport failed.
    #[error("File upload failed: {0}")]
    Transport(String),

    /// The sniffed content type is not an accepted image format.
    #[error("Only JPEG, PNG, WebP, and HEIC images are allowed.")]
    InvalidType,

    /// The file exceeds [`MAX_PHOTO_BYTES`].
    #[error("Photo must be under 10MB.")]
    TooLarge { size: usize },
}

/// Accepted photo content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoMime {
    Jpeg,
    Png,
    Webp,
    Heic,
    Heif,
}

impl PhotoMime {
    /// File extension for this type.
    pub fn extension(self) -> &'static str {
        match self {
            PhotoMime::Jpeg => "jpg",
            PhotoMime::Png => "png",
            PhotoMime::Webp => "webp",
            PhotoMime::Heic => "heic",
            PhotoMime::Heif => "heif",
        }
    }

    /// IANA media type string.
    pub fn as_str(self) -> &'static str {
        match self {
            PhotoMime::Jpeg => "image/jpeg",
            PhotoMime::Png => "image/png",
            PhotoMime::Webp => "image/webp",
            PhotoMime::Heic => "image/heic",
            PhotoMime::Heif => "image/heif",
        }
    }
}

/// Sniff the content type from the file's leading bytes.
///
/// JPEG/PNG/WebP via `image`'s header-only format guesser; HEIC/HEIF via
/// the ISO-BMFF `ftyp` brand (the `image` crate does not model those).
pub fn sniff_mime(bytes: &[u8]) -> Option<PhotoMime> {
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => return Some(PhotoMime::Jpeg),
        Ok(image::ImageFormat::Png) => return Some(PhotoMime::Png),
        Ok(image::ImageFormat::WebP) => return Some(PhotoMime::Webp),
        _ => {}
    }
    sniff_heif_brand(bytes)
}

/// Detect HEIC/HEIF containers from the `ftyp` box major brand.
fn sniff_heif_brand(bytes: &[u8]) -> Option<PhotoMime> {
    if bytes.len() < 12 || &bytes[4..8] != b"ftyp" {
        return None;
    }
    match &bytes[8..12] {
        b"heic" | b"heix" | b"hevc" | b"hevx" => Some(PhotoMime::Heic),
        b"mif1" | b"msf1" | b"heif" => Some(PhotoMime::Heif),
        _ => None,
    }
}

/// Validate an uploaded photo: content type first, then size.
pub fn validate_photo(bytes: &[u8]) -> Result<PhotoMime, UploadError> {
    let mime = sniff_mime(bytes).ok_or(UploadError::InvalidType)?;
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(UploadError::TooLarge { size: bytes.len() });
    }
    Ok(mime)
}

/// Date partition (`YYYY/MM`) for the storage tree.
pub fn storage_subdir(now: crate::types::Timestamp) -> String {
    use chrono::Datelike;
    format!("{:04}/{:02}", now.year(), now.month())
}

/// Random collision-proof filename with the extension of the sniffed type.
pub fn random_filename(mime: PhotoMime) -> String {
    format!("{FILENAME_PREFIX}{}.{}", Uuid::new_v4(), mime.extension())
}
