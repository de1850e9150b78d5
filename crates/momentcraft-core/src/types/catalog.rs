//! Catalog item types - music tracks, visual effects, backgrounds
//!
//! Every catalog merges a compiled-in default set with the admin-uploaded
//! subset held in storage. Default music and effects are never persisted;
//! they are rebuilt from the constants below on every read. Backgrounds
//! are the exception: their whole list, defaults included, is persisted
//! once an admin mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a catalog item's bytes live
///
/// Default items ship with the application and reference a relative
/// asset path; admin uploads are inlined as base64 data URIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetSource {
    /// Relative asset path of a built-in item
    Path { image: String },
    /// Inline data URI of an uploaded item
    Inline { data: String },
}

impl AssetSource {
    /// The path or data URI, whichever this source holds
    pub fn location(&self) -> &str {
        match self {
            AssetSource::Path { image } => image,
            AssetSource::Inline { data } => data,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, AssetSource::Inline { .. })
    }
}

/// A music track as shown in the admin management table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Inline audio payload; absent for built-in tracks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_default: bool,
}

/// An effect or background as shown in the admin management grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualItem {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub source: AssetSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_default: bool,
}

/// An admin-uploaded entry in the creation-flow picker libraries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryItem {
    pub id: String,
    pub name: String,
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
}

/// A row in the creation-flow picker: built-in entries merged with the
/// admin library. Read model only, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryEntry {
    pub id: String,
    pub name: String,
    pub source: AssetSource,
    pub is_default: bool,
}

impl LibraryEntry {
    fn builtin(id: &str, name: &str, src: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            source: AssetSource::Path {
                image: src.to_string(),
            },
            is_default: true,
        }
    }
}

impl From<LibraryItem> for LibraryEntry {
    fn from(item: LibraryItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            source: AssetSource::Inline { data: item.data },
            is_default: false,
        }
    }
}

/// A font color choice for the gift message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontColor {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
}

/// The fixed font color palette
pub const FONT_COLORS: [FontColor; 5] = [
    FontColor { id: "black", name: "Black", value: "#000000" },
    FontColor { id: "brown", name: "Brown", value: "#8B4513" },
    FontColor { id: "blue", name: "Blue", value: "#0066cc" },
    FontColor { id: "green", name: "Green", value: "#2d8659" },
    FontColor { id: "purple", name: "Purple", value: "#800080" },
];

/// Look up a palette entry by id
pub fn font_color(id: &str) -> Option<&'static FontColor> {
    FONT_COLORS.iter().find(|c| c.id == id)
}

fn builtin_track(id: &str, title: &str, artist: &str, file_name: &str) -> MusicTrack {
    MusicTrack {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        file_name: Some(file_name.to_string()),
        data: None,
        added_date: None,
        is_default: true,
    }
}

fn builtin_visual(id: &str, name: &str, image: &str) -> VisualItem {
    VisualItem {
        id: id.to_string(),
        name: name.to_string(),
        source: AssetSource::Path {
            image: image.to_string(),
        },
        file_name: None,
        added_date: None,
        is_default: true,
    }
}

/// The built-in music tracks, in fixed display order
pub fn default_music_tracks() -> Vec<MusicTrack> {
    vec![
        builtin_track("default_1", "Happy Birthday Song 1", "Classical", "happy-birthday-334876.mp3"),
        builtin_track("default_2", "Happy Birthday Song 2", "Upbeat", "happy-birthday-357371.mp3"),
        builtin_track("default_3", "Happy Birthday Song 3", "Modern", "happy-birthday-401919.mp3"),
        builtin_track("default_4", "Romantic & Love", "Alex Productions", "romantic-and-love.mp3"),
        builtin_track("default_5", "Education Background", "Study Music", "education-background.mp3"),
    ]
}

/// The built-in picker rows for the music library
pub fn default_music_library() -> Vec<LibraryEntry> {
    vec![
        LibraryEntry::builtin("default_1", "Happy Birthday Song 1", "Assets/happy-birthday-334876.mp3"),
        LibraryEntry::builtin("default_2", "Happy Birthday Song 2", "Assets/happy-birthday-357371.mp3"),
        LibraryEntry::builtin("default_3", "Happy Birthday Song 3", "Assets/happy-birthday-401919.mp3"),
        LibraryEntry::builtin("default_4", "Romantic & Love", "Assets/romantic-and-love.mp3"),
        LibraryEntry::builtin("default_5", "Education Background", "Assets/education-background.mp3"),
    ]
}

/// The built-in visual effects, in fixed display order
pub fn default_effects() -> Vec<VisualItem> {
    vec![
        builtin_visual("balloon", "Balloon", "Assets/balloon.png"),
        builtin_visual("sparkles", "Sparkle", "Assets/sparkle.png"),
        builtin_visual("confetti", "Confetti", "Assets/confetti.png"),
        builtin_visual("hearts", "Hearts", "Assets/hearts.png"),
        builtin_visual("time", "Time", "Assets/time.png"),
    ]
}

/// The built-in backgrounds, in fixed display order
pub fn default_backgrounds() -> Vec<VisualItem> {
    vec![
        builtin_visual("bg1", "Dark", "Assets/bg1.png"),
        builtin_visual("bg2", "Starlight", "Assets/bg2.png"),
        builtin_visual("bg3", "Hearts", "Assets/bg3.png"),
        builtin_visual("bg4", "Cherry Bomb", "Assets/bg4.png"),
    ]
}
