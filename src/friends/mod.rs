//! Companion (friend) registry abstraction.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryRegistry;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid friend id: {0:?}")]
    InvalidId(String),
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidId(_) => "invalid_id",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

/// Identifier of a registered companion. Never empty, never padded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct FriendId(String);

impl FriendId {
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(RegistryError::InvalidId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FriendId {
    type Error = RegistryError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FriendRecord {
    pub id: FriendId,
    #[serde(default)]
    pub name: String,
}

/// Outcome of a remove request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    Removed,
    NotFound,
}

#[async_trait]
pub trait FriendRegistry: Send + Sync {
    /// All known companions, ordered by id.
    async fn list(&self) -> Result<Vec<FriendRecord>, RegistryError>;

    /// Forget a companion. Either the record is gone afterwards or the
    /// registry is unchanged.
    async fn remove(&self, id: &FriendId) -> Result<Removal, RegistryError>;
}
