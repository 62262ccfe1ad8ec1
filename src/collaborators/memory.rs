//! In-memory collaborators used by the replay command and tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::errors::{FieldcheckError, Result};
use crate::schemas::{Submission, UserMetadata};

use super::{Identity, IdentityDirectory, SubmissionSink, ValidationRecords};

/// One user known to the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub id: String,

    #[serde(flatten)]
    pub metadata: UserMetadata,
}

/// Directory backed by a fixed list of users
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    users: HashMap<String, Identity>,
}

impl InMemoryDirectory {
    pub fn new(entries: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        let users = entries
            .into_iter()
            .map(|entry| {
                let metadata = (entry.metadata != UserMetadata::default()).then_some(entry.metadata);
                (
                    entry.id.clone(),
                    Identity {
                        user_id: entry.id,
                        metadata,
                    },
                )
            })
            .collect();
        InMemoryDirectory { users }
    }
}

#[async_trait]
impl IdentityDirectory for InMemoryDirectory {
    async fn lookup(&self, token: &str) -> Result<Identity> {
        self.users
            .get(token)
            .cloned()
            .ok_or_else(|| FieldcheckError::UserNotFound(token.to_string()))
    }
}

/// Allocates ids `<prefix>1`, `<prefix>2`, ... or always fails when `unavailable`.
#[derive(Debug)]
pub struct SequentialRecords {
    prefix: String,
    next: AtomicU64,
    unavailable: bool,
}

impl SequentialRecords {
    pub fn new(prefix: impl Into<String>) -> Self {
        SequentialRecords {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
            unavailable: false,
        }
    }

    /// An allocator whose every request fails
    pub fn unavailable() -> Self {
        SequentialRecords {
            unavailable: true,
            ..SequentialRecords::new("")
        }
    }
}

#[async_trait]
impl ValidationRecords for SequentialRecords {
    async fn create(&self, user_id: &str) -> Result<String> {
        if self.unavailable {
            return Err(FieldcheckError::RecordCreation(format!(
                "record service unavailable for user {}",
                user_id
            )));
        }
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}{}", self.prefix, n))
    }
}

/// Keeps every accepted submission; optionally rejects all of them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    accepted: Mutex<Vec<Submission>>,
    reject_with: Option<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: impl Into<String>) -> Self {
        RecordingSink {
            accepted: Mutex::new(Vec::new()),
            reject_with: Some(reason.into()),
        }
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.accepted.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(&self, submission: &Submission) -> Result<()> {
        if let Some(reason) = &self.reject_with {
            return Err(FieldcheckError::Submission(reason.clone()));
        }
        self.accepted.lock().await.push(submission.clone());
        Ok(())
    }
}
