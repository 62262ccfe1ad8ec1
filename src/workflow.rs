//! Session orchestration
//!
//! Glues the step controller and the section aggregator to the external
//! collaborators. The workflow exclusively owns the current snapshot; each
//! operation replaces it with a new one and callers only ever get copies.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::collaborators::{IdentityDirectory, SubmissionSink, ValidationRecords};
use crate::domain::{
    apply_advance, apply_by_key, apply_go_back, build_submission, merge_section, reset,
    section_for_step, SectionUpdate,
};
use crate::errors::{FieldcheckError, Result};
use crate::scheduler::DeferredTask;
use crate::schemas::{Config, LotPatch, SectionSubmission, Session, Step};

/// One worker's inspection session and the services it talks to
pub struct Workflow<D, R, S> {
    session: Arc<Mutex<Session>>,
    directory: D,
    records: R,
    sink: S,
    reset_delay: Duration,
    pending_reset: Mutex<Option<DeferredTask>>,
}

fn expect_step(session: &Session, expected: Step) -> Result<()> {
    if session.current_step != expected {
        return Err(FieldcheckError::StepMismatch {
            expected: expected.to_string(),
            actual: session.current_step.to_string(),
        });
    }
    Ok(())
}

/// Advance from `from`, logging the move.
fn advance(session: &Session, from: Step) -> Session {
    let next = apply_advance(session, from).session_or(session);
    if next.current_step != session.current_step {
        tracing::info!(from = %session.current_step, to = %next.current_step, "step advanced");
    }
    next
}

impl<D, R, S> Workflow<D, R, S>
where
    D: IdentityDirectory,
    R: ValidationRecords,
    S: SubmissionSink,
{
    pub fn new(directory: D, records: R, sink: S, config: &Config) -> Self {
        Workflow {
            session: Arc::new(Mutex::new(Session::new())),
            directory,
            records,
            sink,
            reset_delay: config.reset_delay(),
            pending_reset: Mutex::new(None),
        }
    }

    /// Copy of the current snapshot
    pub async fn snapshot(&self) -> Session {
        self.session.lock().await.clone()
    }

    pub async fn current_step(&self) -> Step {
        self.session.lock().await.current_step
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Confirm `token` with the directory and move on to store selection.
    ///
    /// # Errors
    /// * `StepMismatch` - If the session is not on the login step
    /// * `UserNotFound` - If the directory does not know the token
    pub async fn login(&self, token: &str) -> Result<Step> {
        let mut session = self.session.lock().await;
        expect_step(&session, Step::Login)?;

        let identity = self.directory.lookup(token).await.inspect_err(|e| {
            tracing::warn!(error = %e, "login rejected");
        })?;

        let next = session
            .clone()
            .with_user(identity.user_id, token, identity.metadata);
        *session = advance(&next, Step::Login);
        Ok(session.current_step)
    }

    /// Allocate a validation record for the logged-in user and start the first section.
    ///
    /// # Errors
    /// * `StepMismatch` - If the session is not on store selection
    /// * `MissingUser` - If no user id is recorded
    /// * `RecordCreation` - If the allocator fails; the session stays put
    pub async fn select_store(&self, city: &str, store: &str) -> Result<Step> {
        let mut session = self.session.lock().await;
        expect_step(&session, Step::StoreSelection)?;
        let user_id = session.user_id.clone().ok_or(FieldcheckError::MissingUser)?;

        let submission_id = self.records.create(&user_id).await.inspect_err(|e| {
            tracing::warn!(error = %e, %user_id, "validation record not created");
        })?;

        let next = session.clone().with_store(city, store, submission_id);
        *session = advance(&next, Step::StoreSelection);
        Ok(session.current_step)
    }

    /// Fold the current section's full submission in and move to the next step.
    ///
    /// # Errors
    /// * `StepMismatch` - If the session is not on a validation step
    pub async fn submit_section(&self, submission: &SectionSubmission) -> Result<Step> {
        let mut session = self.session.lock().await;
        let step = session.current_step;
        let slot = section_for_step(step).ok_or_else(|| FieldcheckError::StepMismatch {
            expected: "a validation step".to_string(),
            actual: step.to_string(),
        })?;

        let merged = merge_section(&session, slot, submission);
        *session = advance(&merged, step);
        Ok(session.current_step)
    }

    /// Apply a key-addressed section update. Unknown keys change nothing.
    pub async fn update_section(&self, section_key: &str, update: &SectionUpdate) -> Session {
        let mut session = self.session.lock().await;
        *session = apply_by_key(&session, section_key, update);
        session.clone()
    }

    pub async fn upsert_lot(&self, section_key: &str, lot_id: &str, patch: LotPatch) -> Session {
        let update = SectionUpdate::UpsertLot {
            lot_id: lot_id.to_string(),
            patch,
        };
        self.update_section(section_key, &update).await
    }

    pub async fn remove_lot(&self, section_key: &str, lot_id: &str) -> Session {
        let update = SectionUpdate::RemoveLot {
            lot_id: lot_id.to_string(),
        };
        self.update_section(section_key, &update).await
    }

    pub async fn set_observation(&self, section_key: &str, text: &str) -> Session {
        self.update_section(section_key, &SectionUpdate::Observation(text.to_string()))
            .await
    }

    pub async fn set_final_photo(&self, section_key: &str, photo: Option<&str>) -> Session {
        let update = SectionUpdate::FinalPhoto(photo.map(str::to_string));
        self.update_section(section_key, &update).await
    }

    pub async fn set_skipped(&self, section_key: &str, skipped: bool) -> Session {
        self.update_section(section_key, &SectionUpdate::Skipped(skipped))
            .await
    }

    /// Step back once; a no-op where there is no predecessor.
    pub async fn go_back(&self) -> Step {
        let mut session = self.session.lock().await;
        let next = apply_go_back(&session).session_or(&session);
        if next.current_step != session.current_step {
            tracing::info!(from = %session.current_step, to = %next.current_step, "stepped back");
        }
        *session = next;
        session.current_step
    }

    /// Submit the visit, mark it completed and schedule the reset for the next worker.
    ///
    /// # Errors
    /// * `StepMismatch` - If the session is not on checkout
    /// * `MissingUser` / `RecordCreation` - If login or store selection never finished
    /// * `Submission` - If the sink rejects the payload; the session stays on checkout
    pub async fn finish(&self) -> Result<Step> {
        let mut session = self.session.lock().await;
        expect_step(&session, Step::Checkout)?;

        let submission = build_submission(&session)?;
        self.sink.submit(&submission).await.inspect_err(|e| {
            tracing::warn!(error = %e, submission_id = %submission.submission_id, "submission failed");
        })?;

        *session = advance(&session, Step::Checkout);

        let shared = Arc::clone(&self.session);
        let task = DeferredTask::schedule(self.reset_delay, async move {
            *shared.lock().await = reset();
            tracing::info!("session reset for next worker");
        });
        *self.pending_reset.lock().await = Some(task);

        Ok(session.current_step)
    }

    /// Wait until a scheduled reset has run. Returns immediately when none is pending.
    pub async fn wait_for_reset(&self) {
        let task = self.pending_reset.lock().await.take();
        if let Some(task) = task {
            task.join().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{DirectoryEntry, InMemoryDirectory, RecordingSink, SequentialRecords};
    use crate::schemas::{Lot, UserMetadata};

    type TestWorkflow = Workflow<InMemoryDirectory, SequentialRecords, RecordingSink>;

    fn directory() -> InMemoryDirectory {
        InMemoryDirectory::new(vec![DirectoryEntry {
            id: "U1".to_string(),
            metadata: UserMetadata::default(),
        }])
    }

    fn make_workflow() -> TestWorkflow {
        Workflow::new(directory(), SequentialRecords::new("V"), RecordingSink::new(), &Config::default())
    }

    async fn at_first_section(workflow: &TestWorkflow) {
        workflow.login("U1").await.unwrap();
        workflow.select_store("X", "Y").await.unwrap();
    }

    #[tokio::test]
    async fn test_scenario_back_and_resubmit() {
        let workflow = make_workflow();

        assert_eq!(workflow.login("U1").await.unwrap(), Step::StoreSelection);
        assert_eq!(workflow.select_store("X", "Y").await.unwrap(), Step::Validation1);
        assert_eq!(workflow.snapshot().await.submission_id.as_deref(), Some("V1"));

        let first = SectionSubmission::default()
            .with_lots(vec![Lot::new("A").with_quantity("3")])
            .with_skipped(false);
        assert_eq!(workflow.submit_section(&first).await.unwrap(), Step::Validation2);
        let lots = workflow.snapshot().await.validation1.unwrap().lots;
        assert_eq!(lots.as_slice(), &[Lot::new("A").with_quantity("3")]);

        assert_eq!(workflow.go_back().await, Step::Validation1);
        let lots = workflow.snapshot().await.validation1.unwrap().lots;
        assert_eq!(lots.as_slice(), &[Lot::new("A").with_quantity("3")]);

        let again = SectionSubmission::default().with_lots(vec![Lot::new("A").with_photo("p.jpg")]);
        workflow.submit_section(&again).await.unwrap();
        let lots = workflow.snapshot().await.validation1.unwrap().lots;
        assert_eq!(
            lots.as_slice(),
            &[Lot::new("A").with_quantity("3").with_photo("p.jpg")]
        );
    }

    #[tokio::test]
    async fn test_login_unknown_user_keeps_session() {
        let workflow = make_workflow();
        let err = workflow.login("ghost").await.unwrap_err();

        assert_eq!(err.code(), "USER_NOT_FOUND");
        assert!(err.is_recoverable());
        assert_eq!(workflow.snapshot().await, Session::new());
    }

    #[tokio::test]
    async fn test_login_records_user() {
        let workflow = make_workflow();
        workflow.login("U1").await.unwrap();

        let session = workflow.snapshot().await;
        assert_eq!(session.user_id.as_deref(), Some("U1"));
        assert_eq!(session.username, "U1");
    }

    #[tokio::test]
    async fn test_login_twice_is_rejected() {
        let workflow = make_workflow();
        workflow.login("U1").await.unwrap();

        let err = workflow.login("U1").await.unwrap_err();
        assert_eq!(err.code(), "STEP_MISMATCH");
        assert_eq!(workflow.current_step().await, Step::StoreSelection);
    }

    #[tokio::test]
    async fn test_record_creation_failure_stays_on_store_selection() {
        let workflow = Workflow::new(
            directory(),
            SequentialRecords::unavailable(),
            RecordingSink::new(),
            &Config::default(),
        );
        workflow.login("U1").await.unwrap();
        let before = workflow.snapshot().await;

        let err = workflow.select_store("X", "Y").await.unwrap_err();
        assert_eq!(err.code(), "RECORD_CREATION");
        assert_eq!(workflow.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_submit_section_outside_validation_step() {
        let workflow = make_workflow();
        let err = workflow
            .submit_section(&SectionSubmission::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STEP_MISMATCH");
    }

    #[tokio::test]
    async fn test_section_updates_by_key() {
        let workflow = make_workflow();
        at_first_section(&workflow).await;

        workflow
            .upsert_lot("camaraFria", "A", LotPatch::default().photo(Some("a.jpg")))
            .await;
        workflow
            .upsert_lot("camaraFria", "A", LotPatch::default().quantity(Some("7")))
            .await;
        workflow.upsert_lot("camaraFria", "B", LotPatch::default()).await;
        workflow.remove_lot("camaraFria", "B").await;
        workflow.set_observation("camaraFria", "left door stuck").await;
        workflow.set_final_photo("camaraFria", Some("final.jpg")).await;
        let session = workflow.set_skipped("freezer", true).await;

        let record = session.validation1.unwrap();
        assert_eq!(record.lots.as_slice(), &[Lot::new("A").with_photo("a.jpg").with_quantity("7")]);
        assert_eq!(record.observation.as_deref(), Some("left door stuck"));
        assert_eq!(record.final_photo.as_deref(), Some("final.jpg"));
        assert!(session.validation2.is_none());
        assert!(session.validation3.is_none());
    }

    #[tokio::test]
    async fn test_form_updates_survive_step_submission() {
        let workflow = make_workflow();
        at_first_section(&workflow).await;

        workflow.set_final_photo("camaraFria", Some("final.jpg")).await;
        workflow.set_observation("camaraFria", "ok").await;
        workflow
            .submit_section(&SectionSubmission::default().with_lots(vec![Lot::new("A").with_quantity("1")]))
            .await
            .unwrap();

        let record = workflow.snapshot().await.validation1.unwrap();
        assert_eq!(record.final_photo.as_deref(), Some("final.jpg"));
        assert_eq!(record.observation.as_deref(), Some("ok"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_submits_and_resets_after_delay() {
        let workflow = make_workflow();
        at_first_section(&workflow).await;
        workflow
            .submit_section(&SectionSubmission::default().with_lots(vec![Lot::new("A").with_quantity("3")]))
            .await
            .unwrap();
        workflow
            .submit_section(&SectionSubmission::default().with_skipped(true))
            .await
            .unwrap();
        workflow
            .submit_section(&SectionSubmission::default().with_skipped(true))
            .await
            .unwrap();

        assert_eq!(workflow.finish().await.unwrap(), Step::Completed);

        let submitted = workflow.sink().submissions().await;
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].submission_id, "V1");
        assert!(submitted[0].validation2.as_ref().unwrap().skipped);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(workflow.current_step().await, Step::Completed);

        workflow.wait_for_reset().await;
        assert_eq!(workflow.snapshot().await, Session::new());
    }

    #[tokio::test]
    async fn test_finish_with_rejected_submission_stays_on_checkout() {
        let workflow = Workflow::new(
            directory(),
            SequentialRecords::new("V"),
            RecordingSink::rejecting("endpoint down"),
            &Config::default(),
        );
        at_first_section(&workflow).await;
        for _ in 0..3 {
            workflow
                .submit_section(&SectionSubmission::default().with_skipped(true))
                .await
                .unwrap();
        }

        let err = workflow.finish().await.unwrap_err();
        assert_eq!(err.code(), "SUBMISSION");
        assert_eq!(workflow.current_step().await, Step::Checkout);
    }

    #[tokio::test]
    async fn test_go_back_at_login_is_noop() {
        let workflow = make_workflow();
        assert_eq!(workflow.go_back().await, Step::Login);
        assert_eq!(workflow.snapshot().await, Session::new());
    }
}
