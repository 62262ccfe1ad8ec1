//! Session schema - The root snapshot of one inspection visit

use serde::{Deserialize, Serialize};

use super::section::{SectionRecord, SectionSlot};
use super::step::Step;

/// Display metadata returned alongside a confirmed user
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Stores the user is assigned to, as listed by the directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stores: Option<String>,
}

/// One worker's visit, replaced wholesale on every change
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    /// Step the worker is on
    pub current_step: Step,

    /// Confirmed user id, set after login
    #[serde(default)]
    pub user_id: Option<String>,

    /// Validation record id, set after store selection
    #[serde(default)]
    pub submission_id: Option<String>,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub store: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<UserMetadata>,

    #[serde(default)]
    pub validation1: Option<SectionRecord>,

    #[serde(default)]
    pub validation2: Option<SectionRecord>,

    #[serde(default)]
    pub validation3: Option<SectionRecord>,
}

impl Session {
    /// Fresh session on the login step
    pub fn new() -> Self {
        Self::default()
    }

    /// Record stored in `slot`, if the section was ever written
    pub fn section(&self, slot: SectionSlot) -> Option<&SectionRecord> {
        match slot {
            SectionSlot::Validation1 => self.validation1.as_ref(),
            SectionSlot::Validation2 => self.validation2.as_ref(),
            SectionSlot::Validation3 => self.validation3.as_ref(),
        }
    }

    fn section_mut(&mut self, slot: SectionSlot) -> &mut Option<SectionRecord> {
        match slot {
            SectionSlot::Validation1 => &mut self.validation1,
            SectionSlot::Validation2 => &mut self.validation2,
            SectionSlot::Validation3 => &mut self.validation3,
        }
    }

    // ===== IMMUTABLE BUILDER METHODS =====

    pub fn with_step(mut self, step: Step) -> Self {
        self.current_step = step;
        self
    }

    pub fn with_user(
        mut self,
        user_id: impl Into<String>,
        username: impl Into<String>,
        metadata: Option<UserMetadata>,
    ) -> Self {
        self.user_id = Some(user_id.into());
        self.username = username.into();
        self.user_metadata = metadata;
        self
    }

    pub fn with_store(
        mut self,
        city: impl Into<String>,
        store: impl Into<String>,
        submission_id: impl Into<String>,
    ) -> Self {
        self.city = city.into();
        self.store = store.into();
        self.submission_id = Some(submission_id.into());
        self
    }

    /// Return a new Session with `slot` replaced by `record`
    pub fn with_section(mut self, slot: SectionSlot, record: SectionRecord) -> Self {
        *self.section_mut(slot) = Some(record);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::Lot;

    #[test]
    fn test_new_session_is_empty() {
        let session = Session::new();
        assert_eq!(session.current_step, Step::Login);
        assert!(session.user_id.is_none());
        assert!(session.submission_id.is_none());
        for slot in SectionSlot::ALL {
            assert!(session.section(slot).is_none());
        }
    }

    #[test]
    fn test_with_section_targets_one_slot() {
        let record = SectionRecord::default().with_lots(vec![Lot::new("A").with_quantity("1")]);
        let session = Session::new().with_section(SectionSlot::Validation2, record.clone());

        assert!(session.validation1.is_none());
        assert_eq!(session.validation2.as_ref(), Some(&record));
        assert!(session.validation3.is_none());
    }

    #[test]
    fn test_builders_leave_original_untouched() {
        let session = Session::new();
        let updated = session.clone().with_user("U1", "worker", None).with_step(Step::StoreSelection);

        assert_eq!(session, Session::new());
        assert_eq!(updated.user_id.as_deref(), Some("U1"));
        assert_eq!(updated.current_step, Step::StoreSelection);
    }

    #[test]
    fn test_session_json_round_trip() {
        let session = Session::new()
            .with_user("U1", "worker", Some(UserMetadata {
                name: Some("Ana".into()),
                ..Default::default()
            }))
            .with_store("X", "Y", "V1")
            .with_step(Step::Validation1);

        let json = serde_json::to_string_pretty(&session).unwrap();
        assert!(json.contains("\"current_step\": \"validation-1\""));
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }
}
