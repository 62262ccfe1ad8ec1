//! Checkout readiness and submission assembly

use crate::errors::{FieldcheckError, Result};
use crate::schemas::{SectionRecord, SectionSlot, Session, Submission};

/// A section is complete when it was skipped or has at least one lot.
pub fn section_is_complete(record: Option<&SectionRecord>) -> bool {
    match record {
        None => false,
        Some(record) => record.skipped || !record.lots.is_empty(),
    }
}

/// Sections that still need data before checkout
pub fn pending_sections(session: &Session) -> Vec<SectionSlot> {
    SectionSlot::ALL
        .into_iter()
        .filter(|&slot| !section_is_complete(session.section(slot)))
        .collect()
}

/// Assemble the payload handed to the submission collaborator.
///
/// # Errors
/// * `MissingUser` - If nobody logged in
/// * `RecordCreation` - If no validation record was allocated
pub fn build_submission(session: &Session) -> Result<Submission> {
    let user_id = session.user_id.clone().ok_or(FieldcheckError::MissingUser)?;
    let submission_id = session.submission_id.clone().ok_or_else(|| {
        FieldcheckError::RecordCreation("no validation record allocated".to_string())
    })?;

    Ok(Submission {
        user_id,
        submission_id,
        username: session.username.clone(),
        city: session.city.clone(),
        store: session.store.clone(),
        validation1: session.validation1.clone(),
        validation2: session.validation2.clone(),
        validation3: session.validation3.clone(),
        submitted_at: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{Lot, Step};

    #[test]
    fn test_section_is_complete() {
        assert!(!section_is_complete(None));
        assert!(!section_is_complete(Some(&SectionRecord::default())));
        assert!(section_is_complete(Some(&SectionRecord::default().with_skipped(true))));
        assert!(section_is_complete(Some(
            &SectionRecord::default().with_lots(vec![Lot::new("A").with_quantity("1")])
        )));
    }

    #[test]
    fn test_skipped_section_complete_regardless_of_lots() {
        let record = SectionRecord::default()
            .with_lots(vec![Lot::placeholder("A")])
            .with_skipped(true);
        assert!(section_is_complete(Some(&record)));
    }

    #[test]
    fn test_pending_sections() {
        let session = Session::new()
            .with_section(SectionSlot::Validation1, SectionRecord::default().with_skipped(true))
            .with_section(SectionSlot::Validation2, SectionRecord::default());

        assert_eq!(
            pending_sections(&session),
            vec![SectionSlot::Validation2, SectionSlot::Validation3]
        );
    }

    #[test]
    fn test_build_submission() {
        let session = Session::new()
            .with_user("U1", "worker", None)
            .with_store("X", "Y", "V1")
            .with_section(SectionSlot::Validation3, SectionRecord::default().with_skipped(true))
            .with_step(Step::Checkout);

        let submission = build_submission(&session).unwrap();
        assert_eq!(submission.user_id, "U1");
        assert_eq!(submission.submission_id, "V1");
        assert_eq!(submission.city, "X");
        assert_eq!(submission.store, "Y");
        assert!(submission.validation1.is_none());
        assert!(submission.validation3.unwrap().skipped);
    }

    #[test]
    fn test_build_submission_requires_ids() {
        let err = build_submission(&Session::new()).unwrap_err();
        assert_eq!(err.code(), "MISSING_USER");

        let err = build_submission(&Session::new().with_user("U1", "worker", None)).unwrap_err();
        assert_eq!(err.code(), "RECORD_CREATION");
    }
}
