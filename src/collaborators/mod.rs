//! External collaborators
//!
//! The session core talks to three services it does not own: the user
//! directory, the validation-record allocator and the submission endpoint.
//! Each is a trait so the workflow can run against real clients or the
//! in-memory versions defined here.

mod json_sink;
mod memory;

use async_trait::async_trait;

use crate::errors::Result;
use crate::schemas::{Submission, UserMetadata};

pub use json_sink::JsonFileSink;
pub use memory::{DirectoryEntry, InMemoryDirectory, RecordingSink, SequentialRecords};

/// A user confirmed by the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub metadata: Option<UserMetadata>,
}

/// Maps a login token to a stable user id.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// # Errors
    /// * `UserNotFound` - If the token matches no user
    async fn lookup(&self, token: &str) -> Result<Identity>;
}

/// Allocates the durable id a visit is submitted under.
#[async_trait]
pub trait ValidationRecords: Send + Sync {
    /// # Errors
    /// * `RecordCreation` - If no id could be allocated
    async fn create(&self, user_id: &str) -> Result<String>;
}

/// Receives the aggregated record at checkout. Not retried.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// # Errors
    /// * `Submission` - If the payload was rejected
    async fn submit(&self, submission: &Submission) -> Result<()>;
}
