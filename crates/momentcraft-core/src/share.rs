//! Share links
//!
//! A gift's id travels in URLs and nowhere else: the display route
//! (`gift.html?id=<id>`) renders a read-only view, and the collaboration
//! route (`index.html?mode=collaboration&giftId=<id>`) re-opens the
//! creation form against the existing record. Parsing these URLs is the
//! system's only inbound interface.

use crate::error::{CraftError, CraftResult};
use crate::types::GiftId;

/// Page serving the read-only gift view
pub const GIFT_PAGE: &str = "gift.html";

/// Page serving the creation form (and collaboration entry)
pub const CREATE_PAGE: &str = "index.html";

/// Base used when the caller does not configure one
pub const DEFAULT_SHARE_BASE: &str = "https://momentcraft.app";

/// Link to a gift's read-only display view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftLink {
    pub gift_id: GiftId,
}

impl GiftLink {
    pub fn new(gift_id: GiftId) -> Self {
        Self { gift_id }
    }

    pub fn to_url(&self, base: &str) -> String {
        format!("{}/{}?id={}", base.trim_end_matches('/'), GIFT_PAGE, self.gift_id)
    }
}

/// Link inviting collaborators to append a letter to an existing gift
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollabLink {
    pub gift_id: GiftId,
}

impl CollabLink {
    pub fn new(gift_id: GiftId) -> Self {
        Self { gift_id }
    }

    pub fn to_url(&self, base: &str) -> String {
        format!(
            "{}/{}?mode=collaboration&giftId={}",
            base.trim_end_matches('/'),
            CREATE_PAGE,
            self.gift_id
        )
    }
}

/// What an inbound URL (or bare id) points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareTarget {
    /// Read-only display of a gift
    Display(GiftId),
    /// Collaboration entry against an existing gift
    Collaboration(GiftId),
}

impl ShareTarget {
    /// Classify an inbound link.
    ///
    /// Accepts full URLs of either route and, as a convenience, a bare
    /// well-formed gift id (treated as a display target). Gift ids
    /// contain only `[0-9a-z_]`, so no percent-decoding is involved.
    pub fn parse(input: &str) -> CraftResult<Self> {
        let input = input.trim();

        if let Ok(id) = GiftId::parse(input) {
            return Ok(ShareTarget::Display(id));
        }

        let (_, query) = input
            .split_once('?')
            .ok_or_else(|| CraftError::InvalidLink("no query parameters".to_string()))?;
        let query = query.split('#').next().unwrap_or(query);

        let mut mode = None;
        let mut gift_id = None;
        let mut id = None;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "mode" => mode = Some(value),
                "giftId" => gift_id = Some(value),
                "id" => id = Some(value),
                _ => {}
            }
        }

        if mode == Some("collaboration") {
            let raw = gift_id.ok_or_else(|| {
                CraftError::InvalidLink("collaboration link without giftId".to_string())
            })?;
            let parsed = GiftId::parse(raw)
                .map_err(|_| CraftError::InvalidLink(format!("bad gift id: {}", raw)))?;
            return Ok(ShareTarget::Collaboration(parsed));
        }

        if let Some(raw) = id {
            let parsed = GiftId::parse(raw)
                .map_err(|_| CraftError::InvalidLink(format!("bad gift id: {}", raw)))?;
            return Ok(ShareTarget::Display(parsed));
        }

        Err(CraftError::InvalidLink(
            "neither a display nor a collaboration link".to_string(),
        ))
    }

    /// The gift id the link points at, whichever route it uses.
    pub fn gift_id(&self) -> &GiftId {
        match self {
            ShareTarget::Display(id) => id,
            ShareTarget::Collaboration(id) => id,
        }
    }
}
