//! Session state - login flags, in-progress selections, last share URL
//!
//! These keys live in the same flat namespace as everything else. The
//! admin flag is a plain UI gate, not a capability token; the selection
//! keys hold the gift currently being composed and are cleared at the
//! start of every new creation session.

use super::Store;
use crate::error::CraftResult;
use crate::types::gift::MusicSelection;

const KEY_USER_LOGGED_IN: &str = "userLoggedIn";
const KEY_ADMIN_LOGGED_IN: &str = "adminLoggedIn";
const KEY_ADMIN_USERNAME: &str = "adminUsername";
const KEY_SELECTED_MUSIC: &str = "selectedMusic";
const KEY_SELECTED_EFFECT: &str = "selectedEffect";
const KEY_SELECTED_BACKGROUND: &str = "selectedBackground";
const KEY_SELECTED_FONT_COLOR: &str = "selectedFontColor";
const KEY_LAST_GIFT_URL: &str = "lastGiftURL";

impl Store {
    // ═══════════════════════════════════════════════════════════════════════
    // Login flags
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_user_logged_in(&self, logged_in: bool) -> CraftResult<()> {
        self.set(KEY_USER_LOGGED_IN, if logged_in { "true" } else { "false" })
    }

    pub fn user_logged_in(&self) -> CraftResult<bool> {
        Ok(self.get(KEY_USER_LOGGED_IN)?.as_deref() == Some("true"))
    }

    /// Mark the admin session active and record the display name.
    pub fn set_admin_session(&self, username: &str) -> CraftResult<()> {
        self.set(KEY_ADMIN_LOGGED_IN, "true")?;
        self.set(KEY_ADMIN_USERNAME, username)
    }

    pub fn admin_logged_in(&self) -> CraftResult<bool> {
        Ok(self.get(KEY_ADMIN_LOGGED_IN)?.as_deref() == Some("true"))
    }

    pub fn admin_username(&self) -> CraftResult<Option<String>> {
        self.get(KEY_ADMIN_USERNAME)
    }

    pub fn clear_admin_session(&self) -> CraftResult<()> {
        self.remove(KEY_ADMIN_LOGGED_IN)?;
        self.remove(KEY_ADMIN_USERNAME)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // In-progress selections
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_selected_music(&self, selection: &MusicSelection) -> CraftResult<()> {
        self.write_json(KEY_SELECTED_MUSIC, selection)
    }

    pub fn selected_music(&self) -> CraftResult<Option<MusicSelection>> {
        self.read_json(KEY_SELECTED_MUSIC)
    }

    pub fn set_selected_effect(&self, id: &str) -> CraftResult<()> {
        self.set(KEY_SELECTED_EFFECT, id)
    }

    pub fn selected_effect(&self) -> CraftResult<Option<String>> {
        self.get(KEY_SELECTED_EFFECT)
    }

    pub fn set_selected_background(&self, id: &str) -> CraftResult<()> {
        self.set(KEY_SELECTED_BACKGROUND, id)
    }

    pub fn selected_background(&self) -> CraftResult<Option<String>> {
        self.get(KEY_SELECTED_BACKGROUND)
    }

    pub fn set_selected_font_color(&self, id: &str) -> CraftResult<()> {
        self.set(KEY_SELECTED_FONT_COLOR, id)
    }

    pub fn selected_font_color(&self) -> CraftResult<Option<String>> {
        self.get(KEY_SELECTED_FONT_COLOR)
    }

    /// Drop every in-progress selection. Runs at the start of each new
    /// creation session so a previous gift's customization never bleeds
    /// into the next one.
    pub fn clear_selections(&self) -> CraftResult<()> {
        self.remove(KEY_SELECTED_MUSIC)?;
        self.remove(KEY_SELECTED_EFFECT)?;
        self.remove(KEY_SELECTED_BACKGROUND)?;
        self.remove(KEY_SELECTED_FONT_COLOR)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Last share URL
    // ═══════════════════════════════════════════════════════════════════════

    pub fn set_last_gift_url(&self, url: &str) -> CraftResult<()> {
        self.set(KEY_LAST_GIFT_URL, url)
    }

    pub fn last_gift_url(&self) -> CraftResult<Option<String>> {
        self.get(KEY_LAST_GIFT_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (Store, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(temp_dir.path().join("test.redb")).unwrap();
        (store, temp_dir)
    }

    #[test]
    fn test_user_login_flag() {
        let (store, _temp) = create_test_store();
        assert!(!store.user_logged_in().unwrap());
        store.set_user_logged_in(true).unwrap();
        assert!(store.user_logged_in().unwrap());
        store.set_user_logged_in(false).unwrap();
        assert!(!store.user_logged_in().unwrap());
    }

    #[test]
    fn test_admin_session_lifecycle() {
        let (store, _temp) = create_test_store();
        assert!(!store.admin_logged_in().unwrap());

        store.set_admin_session("admin").unwrap();
        assert!(store.admin_logged_in().unwrap());
        assert_eq!(store.admin_username().unwrap().as_deref(), Some("admin"));

        store.clear_admin_session().unwrap();
        assert!(!store.admin_logged_in().unwrap());
        assert!(store.admin_username().unwrap().is_none());
    }

    #[test]
    fn test_selections_roundtrip_and_clear() {
        let (store, _temp) = create_test_store();

        store.set_selected_effect("balloon").unwrap();
        store.set_selected_background("bg3").unwrap();
        store.set_selected_font_color("purple").unwrap();
        store
            .set_selected_music(&MusicSelection::Default {
                name: "Happy Birthday Song 1".to_string(),
                src: "Assets/happy-birthday-334876.mp3".to_string(),
            })
            .unwrap();

        assert_eq!(store.selected_effect().unwrap().as_deref(), Some("balloon"));
        assert_eq!(store.selected_background().unwrap().as_deref(), Some("bg3"));
        assert!(store.selected_music().unwrap().is_some());

        store.clear_selections().unwrap();
        assert!(store.selected_effect().unwrap().is_none());
        assert!(store.selected_background().unwrap().is_none());
        assert!(store.selected_font_color().unwrap().is_none());
        assert!(store.selected_music().unwrap().is_none());
    }

    #[test]
    fn test_last_gift_url() {
        let (store, _temp) = create_test_store();
        assert!(store.last_gift_url().unwrap().is_none());
        store
            .set_last_gift_url("https://momentcraft.app/gift.html?id=gift_1_abc")
            .unwrap();
        assert_eq!(
            store.last_gift_url().unwrap().as_deref(),
            Some("https://momentcraft.app/gift.html?id=gift_1_abc")
        );
    }
}
