//! Submission schema - What checkout hands to the submission collaborator

use serde::{Deserialize, Serialize};

use super::section::SectionRecord;

/// Aggregated record of one finished visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub user_id: String,
    pub submission_id: String,
    pub username: String,
    pub city: String,
    pub store: String,

    #[serde(default)]
    pub validation1: Option<SectionRecord>,

    #[serde(default)]
    pub validation2: Option<SectionRecord>,

    #[serde(default)]
    pub validation3: Option<SectionRecord>,

    /// ISO 8601 timestamp of when the payload was assembled
    pub submitted_at: String,
}
