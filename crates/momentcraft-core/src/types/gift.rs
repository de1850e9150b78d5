//! Gift record types
//!
//! A gift is created once by its author and then only ever extended:
//! collaborators append letters, nothing else changes after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Background music attached to a gift
///
/// Three origins: a file the author uploaded, a pick from the music
/// library (built-in or admin-uploaded), or the built-in fallback track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MusicSelection {
    /// Author-uploaded audio, inlined as a data URI
    Upload { name: String, data: String },
    /// Library pick: `src` is an asset path for built-in tracks,
    /// `data` carries the inline payload for admin-uploaded ones
    Library {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<String>,
    },
    /// Built-in fallback track
    Default { name: String, src: String },
}

impl MusicSelection {
    /// Human-readable track name for display
    pub fn display_name(&self) -> &str {
        match self {
            MusicSelection::Upload { name, .. } => name,
            MusicSelection::Library { name, .. } => name,
            MusicSelection::Default { name, .. } => name,
        }
    }
}

/// A letter appended to an existing gift by a collaborator
///
/// Has no identity of its own; its position in the gift's `collaborators`
/// sequence is its only address. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaboratorLetter {
    pub sender_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_logged_in: bool,
}

/// A stored gift
///
/// The creator's fields are immutable after creation; only
/// `collaborators` grows. Field names serialize in camelCase so the
/// persisted JSON stays compatible with records written by the legacy
/// web client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftRecord {
    /// Absent for collaboration-initiated gifts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    pub sender_name: String,
    pub message: String,
    /// Category, e.g. "Birthday"
    pub moment_type: String,
    pub effect_id: String,
    pub background_id: String,
    pub font_color_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_selection: Option<MusicSelection>,
    /// Inline photo as a data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    pub created_at: DateTime<Utc>,
    pub author_logged_in: bool,
    #[serde(default)]
    pub collaborators: Vec<CollaboratorLetter>,
}

impl GiftRecord {
    /// Total letters in the gift: the creator's plus the collaborators'
    pub fn letter_count(&self) -> usize {
        1 + self.collaborators.len()
    }
}

/// Form input for creating a gift (or starting a collaboration)
#[derive(Debug, Clone, Default)]
pub struct GiftDraft {
    pub recipient_name: Option<String>,
    pub sender_name: String,
    pub message: String,
    pub moment_type: String,
    pub image_data: Option<String>,
}

/// Form input for a collaborator's letter
#[derive(Debug, Clone, Default)]
pub struct LetterDraft {
    pub sender_name: String,
    pub message: String,
    pub image_data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> GiftRecord {
        GiftRecord {
            recipient_name: Some("Dina".to_string()),
            sender_name: "Alice".to_string(),
            message: "Happy Birthday".to_string(),
            moment_type: "Birthday".to_string(),
            effect_id: "balloon".to_string(),
            background_id: "bg1".to_string(),
            font_color_id: "white".to_string(),
            music_selection: Some(MusicSelection::Default {
                name: "Happy Birthday Song 1".to_string(),
                src: "Assets/happy-birthday-334876.mp3".to_string(),
            }),
            image_data: None,
            created_at: Utc::now(),
            author_logged_in: true,
            collaborators: Vec::new(),
        }
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let json = serde_json::to_string(&sample_record()).unwrap();
        assert!(json.contains("\"recipientName\""));
        assert!(json.contains("\"momentType\""));
        assert!(json.contains("\"fontColorId\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("\"sender_name\""));
    }

    #[test]
    fn test_record_roundtrip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: GiftRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_missing_collaborators_defaults_to_empty() {
        // Records written before the collaboration feature have no
        // collaborators field at all
        let json = r#"{
            "senderName": "Alice",
            "message": "hi",
            "momentType": "Birthday",
            "effectId": "none",
            "backgroundId": "bg1",
            "fontColorId": "white",
            "createdAt": "2024-06-01T10:00:00Z",
            "authorLoggedIn": false
        }"#;
        let record: GiftRecord = serde_json::from_str(json).unwrap();
        assert!(record.collaborators.is_empty());
        assert!(record.recipient_name.is_none());
        assert_eq!(record.letter_count(), 1);
    }

    #[test]
    fn test_music_selection_tagging() {
        let upload = MusicSelection::Upload {
            name: "our-song.mp3".to_string(),
            data: "data:audio/mpeg;base64,AAAA".to_string(),
        };
        let json = serde_json::to_string(&upload).unwrap();
        assert!(json.contains("\"type\":\"upload\""));

        let library: MusicSelection =
            serde_json::from_str(r#"{"type":"library","name":"Romantic & Love","src":"Assets/x.mp3"}"#)
                .unwrap();
        assert_eq!(library.display_name(), "Romantic & Love");
        assert!(matches!(library, MusicSelection::Library { data: None, .. }));
    }

    #[test]
    fn test_letter_count_includes_collaborators() {
        let mut record = sample_record();
        record.collaborators.push(CollaboratorLetter {
            sender_name: "Bob".to_string(),
            message: "Congrats!".to_string(),
            image_data: None,
            created_at: Utc::now(),
            author_logged_in: false,
        });
        assert_eq!(record.letter_count(), 2);
    }
}
