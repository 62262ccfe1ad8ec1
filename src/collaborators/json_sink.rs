//! Submission sink that writes the checkout payload to disk

use std::path::PathBuf;

use async_trait::async_trait;

use crate::errors::{FieldcheckError, Result};
use crate::fs::write_json;
use crate::schemas::Submission;

use super::SubmissionSink;

/// Writes each submission to `path` as pretty JSON, replacing the previous one.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileSink { path: path.into() }
    }
}

#[async_trait]
impl SubmissionSink for JsonFileSink {
    async fn submit(&self, submission: &Submission) -> Result<()> {
        write_json(&self.path, submission)
            .map_err(|e| FieldcheckError::Submission(format!("{}: {}", self.path.display(), e)))?;
        tracing::info!(
            submission_id = %submission.submission_id,
            path = %self.path.display(),
            "submission written"
        );
        Ok(())
    }
}
