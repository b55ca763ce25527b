use super::service::ChatSession;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persistence boundary for in-flight chat sessions.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: ChatSession) -> Result<(), StoreError>;
    /// Replace the stored session only while its revision still equals
    /// `expected_revision`; a stale write fails with [`StoreError::Conflict`].
    fn update(&self, session: ChatSession, expected_revision: u64) -> Result<(), StoreError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<ChatSession>, StoreError>;
    fn remove(&self, id: &SessionId) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session already exists or was changed concurrently")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}
