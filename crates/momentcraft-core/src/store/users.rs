//! Registered user storage
//!
//! All users live in one JSON array under the `registeredUsers` key.
//! Email uniqueness is a linear scan with literal equality - no case
//! folding or normalization.

use super::Store;
use crate::error::{CraftError, CraftResult};
use crate::types::user::UserRecord;

const KEY_REGISTERED_USERS: &str = "registeredUsers";

impl Store {
    /// Register a new user.
    ///
    /// Fails with `DuplicateEmail` when the email is already taken;
    /// nothing is appended in that case.
    pub fn register_user(&self, user: UserRecord) -> CraftResult<UserRecord> {
        let mut users = self.read_array::<UserRecord>(KEY_REGISTERED_USERS)?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(CraftError::DuplicateEmail(user.email));
        }
        users.push(user.clone());
        self.write_json(KEY_REGISTERED_USERS, &users)?;
        Ok(user)
    }

    /// All registered users, in registration order.
    pub fn list_users(&self) -> CraftResult<Vec<UserRecord>> {
        self.read_array(KEY_REGISTERED_USERS)
    }

    /// Remove a user by email. Removing an unknown email is not an error.
    pub fn remove_user(&self, email: &str) -> CraftResult<()> {
        let mut users = self.read_array::<UserRecord>(KEY_REGISTERED_USERS)?;
        users.retain(|u| u.email != email);
        self.write_json(KEY_REGISTERED_USERS, &users)
    }
}
