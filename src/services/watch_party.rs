use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{PartyCode, TitleId, WatchParty};
use crate::storage::{Storage, StorageKey, read_json, write_json};

/// Watch parties are a local stub: a stored record keyed by a short join code.
/// There is no synchronization between members.
#[derive(Clone)]
pub struct WatchPartyService {
    storage: Arc<dyn Storage>,
}

impl WatchPartyService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        title_id: &TitleId,
        ordinal: u32,
        host: &str,
    ) -> Result<WatchParty, StorageError> {
        let party = WatchParty {
            code: generate_code(),
            title_id: title_id.clone(),
            ordinal,
            host: host.to_string(),
            created_at: Utc::now(),
            members: vec![host.to_string()],
        };
        write_json(
            self.storage.as_ref(),
            &StorageKey::Party(party.code.clone()),
            &party,
        )?;
        Ok(party)
    }

    /// Look up a party by code. Codes are matched case-insensitively.
    pub fn join(&self, code: &str, member: &str) -> Result<Option<WatchParty>, StorageError> {
        let code = PartyCode::new(code.trim().to_uppercase());
        let Some(mut party) =
            read_json::<WatchParty>(self.storage.as_ref(), &StorageKey::Party(code.clone()))
        else {
            return Ok(None);
        };
        if !party.members.iter().any(|m| m == member) {
            party.members.push(member.to_string());
            write_json(self.storage.as_ref(), &StorageKey::Party(code), &party)?;
        }
        Ok(Some(party))
    }
}

/// Six characters from a fresh UUID, uppercased. Collisions are as unlikely
/// as this feature is load-bearing.
fn generate_code() -> PartyCode {
    let simple = Uuid::new_v4().simple().to_string();
    PartyCode::new(simple[..6].to_uppercase())
}
