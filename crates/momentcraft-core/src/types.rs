//! Core types for MomentCraft

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CraftError;

pub mod catalog;
pub mod gift;
pub mod user;

pub use catalog::{
    default_backgrounds, default_effects, default_music_library, default_music_tracks,
    font_color, AssetSource, FontColor, LibraryEntry, LibraryItem, MusicTrack, VisualItem,
    FONT_COLORS,
};
pub use gift::{CollaboratorLetter, GiftDraft, GiftRecord, LetterDraft, MusicSelection};
pub use user::UserRecord;

/// Number of random characters appended to a gift id
const SUFFIX_LEN: usize = 9;

/// Suffix alphabet: lowercase base-36 digits
const SUFFIX_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique identifier for a gift record
///
/// Format: `gift_<millis>_<suffix>` where `<millis>` is the wall-clock
/// Unix timestamp in milliseconds and `<suffix>` is 9 random base-36
/// characters. The id doubles as the storage key and as the externally
/// shared identifier embedded in gift URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GiftId(String);

impl GiftId {
    /// Generate a new GiftId from the current time and a random suffix
    ///
    /// Not cryptographically unique, but the timestamp + 36^9 suffix
    /// space makes collisions negligible for this workload.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        let mut rng = rand::rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_ALPHABET[rng.random_range(0..SUFFIX_ALPHABET.len())] as char)
            .collect();
        Self(format!("gift_{}_{}", millis, suffix))
    }

    /// Parse an id arriving from the outside (CLI argument, share URL)
    ///
    /// Accepts only the `gift_<digits>_<alphanumeric>` shape.
    pub fn parse(s: &str) -> Result<Self, CraftError> {
        let rest = s
            .strip_prefix("gift_")
            .ok_or_else(|| CraftError::InvalidGiftId(s.to_string()))?;
        let (millis, suffix) = rest
            .split_once('_')
            .ok_or_else(|| CraftError::InvalidGiftId(s.to_string()))?;
        let well_formed = !millis.is_empty()
            && millis.bytes().all(|b| b.is_ascii_digit())
            && !suffix.is_empty()
            && suffix.bytes().all(|b| b.is_ascii_alphanumeric());
        if !well_formed {
            return Err(CraftError::InvalidGiftId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// The id as a storage key / URL parameter
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GiftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
