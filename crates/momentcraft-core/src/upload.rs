//! Upload validation and conversion pipeline
//!
//! Every file entering a catalog or a gift goes through the same steps:
//! MIME allow-list check, byte-ceiling check, then conversion to an
//! inline data URI. Images are additionally downsampled to a maximum
//! pixel width and re-encoded as lossy JPEG to keep the namespace
//! within its storage quota. Writes happen only after the full
//! conversion completes, so an abandoned upload never leaves a partial
//! catalog entry behind.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;

use crate::error::{CraftError, CraftResult};

/// Allow-list for audio uploads
pub const AUDIO_TYPES: &[&str] = &["audio/*"];

/// Allow-list for image uploads
pub const IMAGE_TYPES: &[&str] = &["image/*"];

/// Byte ceiling for music uploads (10 MiB)
pub const MUSIC_MAX_BYTES: usize = 10 * 1024 * 1024;

/// Byte ceiling for effect images (2 MiB)
pub const EFFECT_IMAGE_MAX_BYTES: usize = 2 * 1024 * 1024;

/// Byte ceiling for background images; same pipeline as effects
pub const BACKGROUND_IMAGE_MAX_BYTES: usize = EFFECT_IMAGE_MAX_BYTES;

/// Downsampling bounds for catalog images
pub const CATALOG_IMAGE_MAX_WIDTH: u32 = 1200;
pub const CATALOG_IMAGE_QUALITY: u8 = 80;

/// Downsampling bounds for the photo attached to a gift letter
pub const PHOTO_MAX_WIDTH: u32 = 800;
pub const PHOTO_QUALITY: u8 = 70;

/// A file handed over by the UI layer, bytes already read
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Match a MIME type against an allow-list.
///
/// Entries ending in `/*` match any subtype of their top-level type;
/// anything else must match exactly.
pub fn matches_type(content_type: &str, allowed: &[&str]) -> bool {
    allowed.iter().any(|entry| {
        if let Some(top_level) = entry.strip_suffix("/*") {
            content_type
                .strip_prefix(top_level)
                .is_some_and(|rest| rest.starts_with('/'))
        } else {
            *entry == content_type
        }
    })
}

/// Reject an upload whose MIME type is not on the allow-list.
pub fn ensure_type(upload: &Upload, allowed: &[&str]) -> CraftResult<()> {
    if matches_type(&upload.content_type, allowed) {
        Ok(())
    } else {
        Err(CraftError::UnsupportedFormat(upload.content_type.clone()))
    }
}

/// Reject an upload exceeding the category's byte ceiling.
pub fn ensure_size(upload: &Upload, limit: usize) -> CraftResult<()> {
    if upload.bytes.len() <= limit {
        Ok(())
    } else {
        Err(CraftError::OversizeFile {
            size: upload.bytes.len(),
            limit,
        })
    }
}

/// Inline a payload as a base64 data URI.
pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, BASE64.encode(bytes))
}

/// Downsample an image and inline it as a JPEG data URI.
///
/// Images wider than `max_width` are scaled down preserving aspect
/// ratio; narrower ones are only re-encoded.
pub fn compress_image(bytes: &[u8], max_width: u32, quality: u8) -> CraftResult<String> {
    let img = image::load_from_memory(bytes).map_err(|e| CraftError::Image(e.to_string()))?;

    let img = if img.width() > max_width {
        let height =
            ((img.height() as u64 * max_width as u64) / img.width() as u64).max(1) as u32;
        img.resize_exact(max_width, height, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();
    let mut out = Vec::new();
    let mut encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality);
    encoder
        .encode_image(&rgb)
        .map_err(|e| CraftError::Image(e.to_string()))?;

    Ok(to_data_uri("image/jpeg", &out))
}

/// Human-readable file size for listings.
pub fn format_file_size(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = (usize::BITS - 1 - bytes.leading_zeros()) / 10;
    let exponent = (exponent as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / (1u64 << (exponent * 10)) as f64;
    format!("{:.2} {}", (value * 100.0).round() / 100.0, UNITS[exponent])
}
