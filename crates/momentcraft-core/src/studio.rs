//! Main Studio - the primary entry point for MomentCraft
//!
//! Studio coordinates the store, the creation-session context, form
//! validation, the upload pipeline and share-link generation:
//! - Gift creation and the collaboration flow
//! - Catalog administration (music, effects, backgrounds)
//! - User registration and the admin session gate
//!
//! # Example
//!
//! ```ignore
//! use momentcraft_core::{GiftDraft, Studio};
//!
//! let studio = Studio::new("~/.momentcraft/data")?;
//! studio.begin_creation_session()?;
//! let created = studio.create_gift(GiftDraft {
//!     recipient_name: Some("Dina".into()),
//!     sender_name: "Alice".into(),
//!     message: "Happy Birthday!".into(),
//!     moment_type: "Birthday".into(),
//!     ..Default::default()
//! })?;
//! println!("{}", created.url);
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{CraftError, CraftResult};
use crate::share::{CollabLink, GiftLink, DEFAULT_SHARE_BASE};
use crate::store::Store;
use crate::types::catalog::{AssetSource, LibraryItem, MusicTrack, VisualItem};
use crate::types::gift::{
    CollaboratorLetter, GiftDraft, GiftRecord, LetterDraft, MusicSelection,
};
use crate::types::user::UserRecord;
use crate::types::GiftId;
use crate::upload::{self, Upload};

/// Hardcoded admin credential pair. Compared in plain text; hardening
/// the gate is an explicit non-goal.
const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "admin123";

/// Save-time fallbacks for a gift composed without active selections
const DEFAULT_EFFECT_ID: &str = "none";
const DEFAULT_BACKGROUND_ID: &str = "bg1";
const DEFAULT_FONT_COLOR_ID: &str = "white";

/// Result of creating a gift or starting a collaboration
#[derive(Debug, Clone)]
pub struct CreatedGift {
    pub id: GiftId,
    /// Display URL for a normal creation, collaboration URL for
    /// `start_collaboration`
    pub url: String,
}

/// Theme settings a collaborator inherits from the gift's creator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabContext {
    pub moment_type: String,
    pub effect_id: String,
    pub background_id: String,
    pub font_color_id: String,
}

/// Counts for the admin dashboard overview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: usize,
    pub gifts: usize,
    pub music: usize,
    pub effects: usize,
    pub backgrounds: usize,
}

/// Main entry point for MomentCraft
pub struct Studio {
    store: Store,
    data_dir: PathBuf,
    share_base: String,
}

impl Studio {
    /// Open a studio over the given data directory.
    ///
    /// Creates the directory and the database file on first use. Share
    /// URLs are built against [`DEFAULT_SHARE_BASE`].
    pub fn new(data_dir: impl AsRef<Path>) -> CraftResult<Self> {
        Self::with_share_base(data_dir, DEFAULT_SHARE_BASE)
    }

    /// Open a studio building share URLs against a custom base.
    pub fn with_share_base(
        data_dir: impl AsRef<Path>,
        share_base: impl Into<String>,
    ) -> CraftResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        info!(?data_dir, "Initializing Studio");

        std::fs::create_dir_all(&data_dir)?;
        let store = Store::new(data_dir.join("momentcraft.redb"))?;

        Ok(Self {
            store,
            data_dir,
            share_base: share_base.into(),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Direct access to the typed store operations.
    pub fn store(&self) -> &Store {
        &self.store
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Creation Session
    // ═══════════════════════════════════════════════════════════════════════

    /// Start a fresh creation session, dropping every in-progress
    /// selection so a previous gift's customization cannot bleed in.
    pub fn begin_creation_session(&self) -> CraftResult<()> {
        debug!("clearing in-progress selections");
        self.store.clear_selections()
    }

    /// Persist a music selection for the gift being composed.
    pub fn select_music(&self, selection: MusicSelection) -> CraftResult<()> {
        self.store.set_selected_music(&selection)
    }

    /// Validate and select an uploaded audio file as the gift's music.
    pub fn select_music_upload(&self, upload: &Upload) -> CraftResult<MusicSelection> {
        upload::ensure_type(upload, upload::AUDIO_TYPES)?;
        upload::ensure_size(upload, upload::MUSIC_MAX_BYTES)?;
        let selection = MusicSelection::Upload {
            name: upload.file_name.clone(),
            data: upload::to_data_uri(&upload.content_type, &upload.bytes),
        };
        self.store.set_selected_music(&selection)?;
        Ok(selection)
    }

    /// Pick a track from the music library by id.
    ///
    /// Returns `Ok(None)` when no library row carries the id.
    pub fn select_music_from_library(&self, id: &str) -> CraftResult<Option<MusicSelection>> {
        let Some(entry) = self
            .store
            .music_library()?
            .into_iter()
            .find(|e| e.id == id)
        else {
            return Ok(None);
        };
        let selection = match entry.source {
            AssetSource::Path { image } => MusicSelection::Library {
                name: entry.name,
                src: Some(image),
                data: None,
            },
            AssetSource::Inline { data } => MusicSelection::Library {
                name: entry.name,
                src: None,
                data: Some(data),
            },
        };
        self.store.set_selected_music(&selection)?;
        Ok(Some(selection))
    }

    pub fn select_effect(&self, id: &str) -> CraftResult<()> {
        self.store.set_selected_effect(id)
    }

    pub fn select_background(&self, id: &str) -> CraftResult<()> {
        self.store.set_selected_background(id)
    }

    pub fn select_font_color(&self, id: &str) -> CraftResult<()> {
        self.store.set_selected_font_color(id)
    }

    /// Validate and convert a photo for attachment to a gift letter.
    pub fn attach_photo(&self, upload: &Upload) -> CraftResult<String> {
        upload::ensure_type(upload, upload::IMAGE_TYPES)?;
        upload::compress_image(&upload.bytes, upload::PHOTO_MAX_WIDTH, upload::PHOTO_QUALITY)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Gift Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Create a gift from the draft and the active selections.
    ///
    /// Validates the required fields before any store mutation and
    /// records the display URL as the last share URL.
    pub fn create_gift(&self, draft: GiftDraft) -> CraftResult<CreatedGift> {
        require("recipient name", draft.recipient_name.as_deref().unwrap_or(""))?;
        require("sender name", &draft.sender_name)?;
        require("message", &draft.message)?;
        require("moment type", &draft.moment_type)?;

        let record = self.themed_record(draft)?;
        let id = self.store.create_gift(&record)?;
        let url = GiftLink::new(id.clone()).to_url(&self.share_base);
        self.store.set_last_gift_url(&url)?;
        info!(%id, "gift created");
        Ok(CreatedGift { id, url })
    }

    /// Create a gift to be filled in by collaborators.
    ///
    /// Same creation path as [`create_gift`](Self::create_gift) but the
    /// recipient is optional and the returned URL is the collaboration
    /// entry link rather than the display route.
    pub fn start_collaboration(&self, draft: GiftDraft) -> CraftResult<CreatedGift> {
        require("sender name", &draft.sender_name)?;
        require("message", &draft.message)?;

        let record = self.themed_record(draft)?;
        let id = self.store.create_gift(&record)?;
        let url = CollabLink::new(id.clone()).to_url(&self.share_base);
        info!(%id, "collaboration started");
        Ok(CreatedGift { id, url })
    }

    /// Resolve a collaboration link against the existing gift.
    ///
    /// Returns the creator's theme, which is also persisted into the
    /// collaborator's selections so the appended letter matches the
    /// gift. Fails with `GiftNotFound` when the link is stale - a
    /// missing gift must never be silently re-created.
    pub fn collaboration_context(&self, id: &GiftId) -> CraftResult<CollabContext> {
        let record = self.gift(id)?;

        self.store.set_selected_effect(&record.effect_id)?;
        self.store.set_selected_background(&record.background_id)?;
        self.store.set_selected_font_color(&record.font_color_id)?;

        Ok(CollabContext {
            moment_type: record.moment_type,
            effect_id: record.effect_id,
            background_id: record.background_id,
            font_color_id: record.font_color_id,
        })
    }

    /// Append a collaborator's letter and return the display URL.
    pub fn add_letter(&self, id: &GiftId, draft: LetterDraft) -> CraftResult<String> {
        require("sender name", &draft.sender_name)?;
        require("message", &draft.message)?;

        let letter = CollaboratorLetter {
            sender_name: draft.sender_name,
            message: draft.message,
            image_data: draft.image_data,
            created_at: Utc::now(),
            author_logged_in: self.store.user_logged_in()?,
        };
        self.store.append_letter(id, letter)?;

        let url = GiftLink::new(id.clone()).to_url(&self.share_base);
        self.store.set_last_gift_url(&url)?;
        info!(%id, "collaborator letter appended");
        Ok(url)
    }

    /// Load a gift for display.
    pub fn gift(&self, id: &GiftId) -> CraftResult<GiftRecord> {
        self.store
            .load_gift(id)?
            .ok_or_else(|| CraftError::GiftNotFound(id.to_string()))
    }

    pub fn delete_gift(&self, id: &GiftId) -> CraftResult<()> {
        self.store.delete_gift(id)
    }

    pub fn list_gifts(&self) -> CraftResult<Vec<(GiftId, GiftRecord)>> {
        self.store.list_gifts()
    }

    /// Newest gifts for the dashboard's recent-activity panel.
    pub fn recent_activity(&self, limit: usize) -> CraftResult<Vec<(GiftId, GiftRecord)>> {
        self.store.recent_gifts(limit)
    }

    pub fn last_gift_url(&self) -> CraftResult<Option<String>> {
        self.store.last_gift_url()
    }

    fn themed_record(&self, draft: GiftDraft) -> CraftResult<GiftRecord> {
        Ok(GiftRecord {
            recipient_name: draft.recipient_name.filter(|r| !r.trim().is_empty()),
            sender_name: draft.sender_name,
            message: draft.message,
            moment_type: draft.moment_type,
            effect_id: self
                .store
                .selected_effect()?
                .unwrap_or_else(|| DEFAULT_EFFECT_ID.to_string()),
            background_id: self
                .store
                .selected_background()?
                .unwrap_or_else(|| DEFAULT_BACKGROUND_ID.to_string()),
            font_color_id: self
                .store
                .selected_font_color()?
                .unwrap_or_else(|| DEFAULT_FONT_COLOR_ID.to_string()),
            music_selection: self.store.selected_music()?,
            image_data: draft.image_data,
            created_at: Utc::now(),
            author_logged_in: self.store.user_logged_in()?,
            collaborators: Vec::new(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Catalog Administration
    // ═══════════════════════════════════════════════════════════════════════

    /// Validate, inline and store an uploaded music track.
    pub fn add_music(&self, title: &str, artist: &str, upload: &Upload) -> CraftResult<MusicTrack> {
        require("title", title)?;
        require("artist", artist)?;
        upload::ensure_type(upload, upload::AUDIO_TYPES)?;
        upload::ensure_size(upload, upload::MUSIC_MAX_BYTES)?;

        let now = Utc::now();
        let data = upload::to_data_uri(&upload.content_type, &upload.bytes);
        let id = format!("music_{}", now.timestamp_millis());
        let track = MusicTrack {
            id: id.clone(),
            title: title.to_string(),
            artist: artist.to_string(),
            file_name: Some(upload.file_name.clone()),
            data: Some(data.clone()),
            added_date: Some(now),
            is_default: false,
        };
        let library = LibraryItem {
            id,
            name: format!("{} - {}", title, artist),
            data,
            uploaded_at: now,
        };
        self.store.add_music(track.clone(), library)?;
        info!(id = %track.id, "music track added");
        Ok(track)
    }

    /// Validate, downsample and store an uploaded effect image.
    pub fn add_effect(&self, name: &str, upload: &Upload) -> CraftResult<VisualItem> {
        require("effect name", name)?;
        upload::ensure_type(upload, upload::IMAGE_TYPES)?;
        upload::ensure_size(upload, upload::EFFECT_IMAGE_MAX_BYTES)?;

        let now = Utc::now();
        let data = upload::compress_image(
            &upload.bytes,
            upload::CATALOG_IMAGE_MAX_WIDTH,
            upload::CATALOG_IMAGE_QUALITY,
        )?;
        let id = format!("effect_{}", now.timestamp_millis());
        let effect = VisualItem {
            id: id.clone(),
            name: name.to_string(),
            source: AssetSource::Inline { data: data.clone() },
            file_name: Some(upload.file_name.clone()),
            added_date: Some(now),
            is_default: false,
        };
        let library = LibraryItem {
            id,
            name: name.to_string(),
            data,
            uploaded_at: now,
        };
        self.store.add_effect(effect.clone(), library)?;
        info!(id = %effect.id, "effect added");
        Ok(effect)
    }

    /// Validate, downsample and store an uploaded background image.
    pub fn add_background(&self, name: &str, upload: &Upload) -> CraftResult<VisualItem> {
        require("background name", name)?;
        upload::ensure_type(upload, upload::IMAGE_TYPES)?;
        upload::ensure_size(upload, upload::BACKGROUND_IMAGE_MAX_BYTES)?;

        let now = Utc::now();
        let data = upload::compress_image(
            &upload.bytes,
            upload::CATALOG_IMAGE_MAX_WIDTH,
            upload::CATALOG_IMAGE_QUALITY,
        )?;
        let id = format!("bg_{}", now.timestamp_millis());
        let background = VisualItem {
            id: id.clone(),
            name: name.to_string(),
            source: AssetSource::Inline { data: data.clone() },
            file_name: Some(upload.file_name.clone()),
            added_date: Some(now),
            is_default: false,
        };
        let library = LibraryItem {
            id,
            name: name.to_string(),
            data,
            uploaded_at: now,
        };
        self.store.add_background(background.clone(), library)?;
        info!(id = %background.id, "background added");
        Ok(background)
    }

    pub fn remove_music(&self, id: &str) -> CraftResult<()> {
        debug!(id, "removing music track");
        self.store.remove_music(id)
    }

    pub fn remove_effect(&self, id: &str) -> CraftResult<()> {
        debug!(id, "removing effect");
        self.store.remove_effect(id)
    }

    pub fn remove_background(&self, id: &str) -> CraftResult<()> {
        debug!(id, "removing background");
        self.store.remove_background(id)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Users
    // ═══════════════════════════════════════════════════════════════════════

    /// Register an end user and log them in.
    pub fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> CraftResult<UserRecord> {
        require("name", name)?;
        require("email", email)?;
        require("password", password)?;

        let user = self
            .store
            .register_user(UserRecord::new(name, email, password))?;
        self.store.set_user_logged_in(true)?;
        info!(email, "user registered");
        Ok(user)
    }

    pub fn users(&self) -> CraftResult<Vec<UserRecord>> {
        self.store.list_users()
    }

    pub fn remove_user(&self, email: &str) -> CraftResult<()> {
        self.store.remove_user(email)
    }

    /// How many gifts a user authored, matched by sender name - the
    /// only linkage the records carry.
    pub fn gifts_by_sender(&self, name: &str) -> CraftResult<usize> {
        Ok(self
            .store
            .list_gifts()?
            .iter()
            .filter(|(_, g)| g.sender_name == name)
            .count())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Session Gate
    // ═══════════════════════════════════════════════════════════════════════

    /// Mark the end user as logged in. The login form performs no
    /// credential check; the flag only gates the premium features.
    pub fn log_in_user(&self) -> CraftResult<()> {
        self.store.set_user_logged_in(true)
    }

    pub fn user_logged_in(&self) -> CraftResult<bool> {
        self.store.user_logged_in()
    }

    /// Check the credential pair and open the admin session.
    pub fn admin_login(&self, username: &str, password: &str) -> CraftResult<bool> {
        if username == ADMIN_USERNAME && password == ADMIN_PASSWORD {
            self.store.set_admin_session(username)?;
            info!(username, "admin logged in");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_admin(&self) -> CraftResult<bool> {
        self.store.admin_logged_in()
    }

    pub fn admin_username(&self) -> CraftResult<Option<String>> {
        self.store.admin_username()
    }

    pub fn admin_logout(&self) -> CraftResult<()> {
        info!("admin logged out");
        self.store.clear_admin_session()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Dashboard
    // ═══════════════════════════════════════════════════════════════════════

    pub fn dashboard_stats(&self) -> CraftResult<DashboardStats> {
        Ok(DashboardStats {
            users: self.store.list_users()?.len(),
            gifts: self.store.list_gifts()?.len(),
            music: self.store.list_music()?.len(),
            effects: self.store.list_effects()?.len(),
            backgrounds: self.store.list_backgrounds()?.len(),
        })
    }
}

fn require(field: &str, value: &str) -> CraftResult<()> {
    if value.trim().is_empty() {
        Err(CraftError::Validation(field.to_string()))
    } else {
        Ok(())
    }
}
