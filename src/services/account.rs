use std::sync::Arc;

use chrono::Utc;

use crate::error::StorageError;
use crate::models::LocalUser;
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Local-only login: "logging in" writes a user record, nothing is verified
/// against a backend.
#[derive(Clone)]
pub struct AccountService {
    storage: Arc<dyn Storage>,
}

impl AccountService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn login(&self, email: &str, name: &str) -> Result<LocalUser, StorageError> {
        let user = LocalUser {
            email: email.trim().to_string(),
            name: name.trim().to_string(),
            login_time: Utc::now(),
        };
        write_json(self.storage.as_ref(), &StorageKey::User, &user)?;
        Ok(user)
    }

    pub fn current(&self) -> Option<LocalUser> {
        read_json(self.storage.as_ref(), &StorageKey::User)
    }

    pub fn logout(&self) {
        self.storage.remove(&StorageKey::User.to_key());
    }
}
