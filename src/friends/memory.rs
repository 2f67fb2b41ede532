//! In-process friend registry.
//!
//! Seeded from the `[[friends]]` config table. Nothing is written back to
//! disk; removals last for the lifetime of the process.

use super::{FriendId, FriendRecord, FriendRegistry, Removal, RegistryError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct MemoryRegistry {
    records: RwLock<BTreeMap<FriendId, FriendRecord>>,
}

impl MemoryRegistry {
    pub fn new(seed: impl IntoIterator<Item = FriendRecord>) -> Self {
        let records = seed
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }
}

#[async_trait]
impl FriendRegistry for MemoryRegistry {
    async fn list(&self) -> Result<Vec<FriendRecord>, RegistryError> {
        Ok(self.records.read().values().cloned().collect())
    }

    async fn remove(&self, id: &FriendId) -> Result<Removal, RegistryError> {
        // Single write-lock critical section: lookup and removal cannot interleave.
        match self.records.write().remove(id) {
            Some(_) => Ok(Removal::Removed),
            None => Ok(Removal::NotFound),
        }
    }
}
