//! MomentCraft Core Library
//!
//! Local-first gift card creation and administration.
//!
//! ## Overview
//!
//! MomentCraft lets a sender assemble a personalized digital gift
//! (recipient, message, photo, background theme, font color, visual
//! effect, music track) and share it through a URL. Additional
//! collaborators can append their own letters to an existing gift via a
//! collaboration link, and site administrators manage the catalogs of
//! music, effects and backgrounds plus the registered users and created
//! gifts.
//!
//! Everything is persisted in a single flat key-value namespace backed by
//! redb; there is no server. The [`Studio`] facade is the primary entry
//! point.
//!
//! ## Quick Start
//!
//! ```ignore
//! use momentcraft_core::{GiftDraft, Studio};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let studio = Studio::new("~/.momentcraft/data")?;
//!
//!     let created = studio.create_gift(GiftDraft {
//!         recipient_name: Some("Dina".into()),
//!         sender_name: "Alice".into(),
//!         message: "Happy Birthday!".into(),
//!         moment_type: "Birthday".into(),
//!         ..Default::default()
//!     })?;
//!
//!     println!("share this: {}", created.url);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod share;
pub mod store;
pub mod studio;
pub mod types;
pub mod upload;

// Re-exports
pub use error::{CraftError, CraftResult};
pub use share::{CollabLink, GiftLink, ShareTarget, DEFAULT_SHARE_BASE};
pub use store::Store;
pub use studio::{CollabContext, CreatedGift, DashboardStats, Studio};
pub use types::*;
pub use upload::Upload;
