//! Catalog storage - music, effects, backgrounds
//!
//! Each catalog keeps two persisted families: the admin management view
//! (`adminMusic`, `adminEffects`, `adminBackgrounds`) and the
//! creation-flow picker library (`adminMusicLibrary`,
//! `adminEffectLibrary`, `adminBackgroundLibrary`). An upload lands in
//! both under one shared id; a removal filters both.
//!
//! Built-in music and effects are never written: they are rebuilt from
//! constants on every read and merged in front of the persisted subset,
//! which is why removing one never sticks. Backgrounds are fully
//! persisted - the built-in set is seeded into storage on the first
//! mutation and removal is unconditional, built-ins included.

use super::Store;
use crate::error::CraftResult;
use crate::types::catalog::{
    default_backgrounds, default_effects, default_music_library, default_music_tracks,
    LibraryEntry, LibraryItem, MusicTrack, VisualItem,
};

const KEY_ADMIN_MUSIC: &str = "adminMusic";
const KEY_ADMIN_EFFECTS: &str = "adminEffects";
const KEY_ADMIN_BACKGROUNDS: &str = "adminBackgrounds";
const KEY_MUSIC_LIBRARY: &str = "adminMusicLibrary";
const KEY_EFFECT_LIBRARY: &str = "adminEffectLibrary";
const KEY_BACKGROUND_LIBRARY: &str = "adminBackgroundLibrary";

impl Store {
    // ═══════════════════════════════════════════════════════════════════════
    // Music
    // ═══════════════════════════════════════════════════════════════════════

    /// All music tracks: built-ins first, then admin uploads.
    pub fn list_music(&self) -> CraftResult<Vec<MusicTrack>> {
        let mut tracks = default_music_tracks();
        tracks.extend(self.read_array::<MusicTrack>(KEY_ADMIN_MUSIC)?);
        Ok(tracks)
    }

    /// Persist an uploaded track in the management view and the picker
    /// library under its shared id.
    pub fn add_music(&self, track: MusicTrack, library: LibraryItem) -> CraftResult<()> {
        let mut uploaded = self.read_array::<MusicTrack>(KEY_ADMIN_MUSIC)?;
        uploaded.push(track);
        self.write_json(KEY_ADMIN_MUSIC, &uploaded)?;

        let mut items = self.read_array::<LibraryItem>(KEY_MUSIC_LIBRARY)?;
        items.push(library);
        self.write_json(KEY_MUSIC_LIBRARY, &items)
    }

    /// Remove an uploaded track from both families.
    ///
    /// Built-in ids never appear in the persisted subsets, so passing
    /// one is a no-op and the track reappears on the next read.
    pub fn remove_music(&self, id: &str) -> CraftResult<()> {
        let mut uploaded = self.read_array::<MusicTrack>(KEY_ADMIN_MUSIC)?;
        uploaded.retain(|m| m.id != id);
        self.write_json(KEY_ADMIN_MUSIC, &uploaded)?;

        let mut items = self.read_array::<LibraryItem>(KEY_MUSIC_LIBRARY)?;
        items.retain(|m| m.id != id);
        self.write_json(KEY_MUSIC_LIBRARY, &items)
    }

    /// Picker rows for the music selection dialog.
    pub fn music_library(&self) -> CraftResult<Vec<LibraryEntry>> {
        let mut entries = default_music_library();
        entries.extend(
            self.read_array::<LibraryItem>(KEY_MUSIC_LIBRARY)?
                .into_iter()
                .map(LibraryEntry::from),
        );
        Ok(entries)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Effects
    // ═══════════════════════════════════════════════════════════════════════

    /// All effects: built-ins first, then admin uploads.
    pub fn list_effects(&self) -> CraftResult<Vec<VisualItem>> {
        let mut effects = default_effects();
        effects.extend(self.read_array::<VisualItem>(KEY_ADMIN_EFFECTS)?);
        Ok(effects)
    }

    pub fn add_effect(&self, effect: VisualItem, library: LibraryItem) -> CraftResult<()> {
        let mut uploaded = self.read_array::<VisualItem>(KEY_ADMIN_EFFECTS)?;
        uploaded.push(effect);
        self.write_json(KEY_ADMIN_EFFECTS, &uploaded)?;

        let mut items = self.read_array::<LibraryItem>(KEY_EFFECT_LIBRARY)?;
        items.push(library);
        self.write_json(KEY_EFFECT_LIBRARY, &items)
    }

    /// Remove an uploaded effect; a built-in id is a no-op, as for music.
    pub fn remove_effect(&self, id: &str) -> CraftResult<()> {
        let mut uploaded = self.read_array::<VisualItem>(KEY_ADMIN_EFFECTS)?;
        uploaded.retain(|e| e.id != id);
        self.write_json(KEY_ADMIN_EFFECTS, &uploaded)?;

        let mut items = self.read_array::<LibraryItem>(KEY_EFFECT_LIBRARY)?;
        items.retain(|e| e.id != id);
        self.write_json(KEY_EFFECT_LIBRARY, &items)
    }

    /// Admin-uploaded picker entries for the effect dialog.
    pub fn effect_library(&self) -> CraftResult<Vec<LibraryEntry>> {
        Ok(self
            .read_array::<LibraryItem>(KEY_EFFECT_LIBRARY)?
            .into_iter()
            .map(LibraryEntry::from)
            .collect())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Backgrounds
    // ═══════════════════════════════════════════════════════════════════════

    /// All backgrounds. Before the first mutation this is the built-in
    /// set; afterwards it is whatever the persisted list says.
    pub fn list_backgrounds(&self) -> CraftResult<Vec<VisualItem>> {
        match self.read_json::<Vec<VisualItem>>(KEY_ADMIN_BACKGROUNDS)? {
            Some(backgrounds) => Ok(backgrounds),
            None => Ok(default_backgrounds()),
        }
    }

    /// Add a background, seeding the built-in set into persistence on
    /// the first mutation.
    pub fn add_background(&self, background: VisualItem, library: LibraryItem) -> CraftResult<()> {
        let mut backgrounds = self.list_backgrounds()?;
        backgrounds.push(background);
        self.write_json(KEY_ADMIN_BACKGROUNDS, &backgrounds)?;

        let mut items = self.read_array::<LibraryItem>(KEY_BACKGROUND_LIBRARY)?;
        items.push(library);
        self.write_json(KEY_BACKGROUND_LIBRARY, &items)
    }

    /// Remove a background unconditionally. Unlike music and effects
    /// this sticks for built-in ids too, because the whole list is
    /// persisted.
    pub fn remove_background(&self, id: &str) -> CraftResult<()> {
        let mut backgrounds = self.list_backgrounds()?;
        backgrounds.retain(|b| b.id != id);
        self.write_json(KEY_ADMIN_BACKGROUNDS, &backgrounds)?;

        let mut items = self.read_array::<LibraryItem>(KEY_BACKGROUND_LIBRARY)?;
        items.retain(|b| b.id != id);
        self.write_json(KEY_BACKGROUND_LIBRARY, &items)
    }

    /// Admin-uploaded picker entries for the background dialog.
    pub fn background_library(&self) -> CraftResult<Vec<LibraryEntry>> {
        Ok(self
            .read_array::<LibraryItem>(KEY_BACKGROUND_LIBRARY)?
            .into_iter()
            .map(LibraryEntry::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::catalog::AssetSource;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_test_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.redb")).unwrap();
        (store, temp_dir)
    }

    fn uploaded_track(id: &str, title: &str) -> MusicTrack {
        MusicTrack {
            id: id.to_string(),
            title: title.to_string(),
            artist: "The Band".to_string(),
            file_name: Some("song.mp3".to_string()),
            data: Some("data:audio/mpeg;base64,AAAA".to_string()),
            added_date: Some(Utc::now()),
            is_default: false,
        }
    }

    fn uploaded_visual(id: &str, name: &str) -> VisualItem {
        VisualItem {
            id: id.to_string(),
            name: name.to_string(),
            source: AssetSource::Inline {
                data: "data:image/jpeg;base64,/9j/".to_string(),
            },
            file_name: Some("upload.png".to_string()),
            added_date: Some(Utc::now()),
            is_default: false,
        }
    }

    fn library_item(id: &str, name: &str) -> LibraryItem {
        LibraryItem {
            id: id.to_string(),
            name: name.to_string(),
            data: "data:audio/mpeg;base64,AAAA".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_music_defaults_come_first_in_fixed_order() {
        let (store, _temp) = create_test_store();
        store
            .add_music(uploaded_track("music_1", "Ours"), library_item("music_1", "Ours - The Band"))
            .unwrap();

        let music = store.list_music().unwrap();
        let ids: Vec<&str> = music.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(
            ids,
            ["default_1", "default_2", "default_3", "default_4", "default_5", "music_1"]
        );
        assert!(music[0].is_default);
        assert!(!music[5].is_default);
    }

    #[test]
    fn test_add_then_list_contains_payload() {
        let (store, _temp) = create_test_store();
        store
            .add_music(uploaded_track("music_1", "Ours"), library_item("music_1", "Ours - The Band"))
            .unwrap();

        let added = store
            .list_music()
            .unwrap()
            .into_iter()
            .find(|m| m.id == "music_1")
            .unwrap();
        assert_eq!(added.title, "Ours");
        assert_eq!(added.data.as_deref(), Some("data:audio/mpeg;base64,AAAA"));

        let library = store.music_library().unwrap();
        assert!(library.iter().any(|e| e.id == "music_1" && e.source.is_inline()));
    }

    #[test]
    fn test_remove_music_clears_both_families() {
        let (store, _temp) = create_test_store();
        store
            .add_music(uploaded_track("music_1", "Ours"), library_item("music_1", "Ours - The Band"))
            .unwrap();

        store.remove_music("music_1").unwrap();

        assert!(!store.list_music().unwrap().iter().any(|m| m.id == "music_1"));
        assert!(!store.music_library().unwrap().iter().any(|e| e.id == "music_1"));
    }

    #[test]
    fn test_remove_default_music_is_a_no_op() {
        let (store, _temp) = create_test_store();
        store.remove_music("default_1").unwrap();
        // Rebuilt from constants on the next read
        assert!(store.list_music().unwrap().iter().any(|m| m.id == "default_1"));
    }

    #[test]
    fn test_effects_defaults_come_first() {
        let (store, _temp) = create_test_store();
        store
            .add_effect(uploaded_visual("effect_1", "Fireworks"), library_item("effect_1", "Fireworks"))
            .unwrap();

        let effects = store.list_effects().unwrap();
        let ids: Vec<&str> = effects.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["balloon", "sparkles", "confetti", "hearts", "time", "effect_1"]);
    }

    #[test]
    fn test_remove_default_effect_is_a_no_op() {
        let (store, _temp) = create_test_store();
        store.remove_effect("balloon").unwrap();
        assert!(store.list_effects().unwrap().iter().any(|e| e.id == "balloon"));
    }

    #[test]
    fn test_background_list_starts_with_defaults() {
        let (store, _temp) = create_test_store();
        let ids: Vec<String> = store
            .list_backgrounds()
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, ["bg1", "bg2", "bg3", "bg4"]);
    }

    #[test]
    fn test_add_background_keeps_defaults_in_front() {
        let (store, _temp) = create_test_store();
        store
            .add_background(uploaded_visual("bg_1", "Sunset"), library_item("bg_1", "Sunset"))
            .unwrap();

        let ids: Vec<String> = store
            .list_backgrounds()
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, ["bg1", "bg2", "bg3", "bg4", "bg_1"]);
    }

    #[test]
    fn test_remove_default_background_sticks() {
        let (store, _temp) = create_test_store();
        store.remove_background("bg2").unwrap();

        let ids: Vec<String> = store
            .list_backgrounds()
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, ["bg1", "bg3", "bg4"]);

        // Still gone after another mutation
        store
            .add_background(uploaded_visual("bg_1", "Sunset"), library_item("bg_1", "Sunset"))
            .unwrap();
        assert!(!store.list_backgrounds().unwrap().iter().any(|b| b.id == "bg2"));
    }

    #[test]
    fn test_remove_uploaded_background() {
        let (store, _temp) = create_test_store();
        store
            .add_background(uploaded_visual("bg_1", "Sunset"), library_item("bg_1", "Sunset"))
            .unwrap();
        store.remove_background("bg_1").unwrap();

        assert!(!store.list_backgrounds().unwrap().iter().any(|b| b.id == "bg_1"));
        assert!(store.background_library().unwrap().is_empty());
    }
}
