//! Registered user records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered end user
///
/// The email is the record's key; uniqueness is enforced by a scan at
/// registration time, not by the store. The password is held in plain
/// text - credential hardening is an explicit non-goal of this system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub name: String,
    pub email: String,
    pub password: String,
    pub registered_date: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            registered_date: Utc::now(),
        }
    }
}
