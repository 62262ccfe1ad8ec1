//! Replay command - Drive a session from a scripted list of events

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collaborators::{
    DirectoryEntry, InMemoryDirectory, JsonFileSink, RecordingSink, SequentialRecords,
    SubmissionSink,
};
use crate::domain::{pending_sections, section_is_complete};
use crate::errors::{FieldcheckError, Result};
use crate::fs::{read_json, resolve_cwd, resolve_input};
use crate::schemas::{Config, LotPatch, SectionSlot, SectionSubmission, Session};
use crate::workflow::Workflow;

/// A recorded session: who may log in and what they did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub users: Vec<DirectoryEntry>,

    /// Prefix of allocated validation record ids
    #[serde(default = "default_record_prefix")]
    pub record_prefix: String,

    pub events: Vec<ScriptEvent>,
}

fn default_record_prefix() -> String {
    "V".to_string()
}

/// One user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptEvent {
    Login {
        token: String,
    },
    SelectStore {
        city: String,
        store: String,
    },
    SubmitSection {
        #[serde(default)]
        submission: SectionSubmission,
    },
    UpsertLot {
        section: String,
        lot_id: String,
        #[serde(default)]
        patch: LotPatch,
    },
    RemoveLot {
        section: String,
        lot_id: String,
    },
    SetObservation {
        section: String,
        text: String,
    },
    SetFinalPhoto {
        section: String,
        #[serde(default)]
        photo: Option<String>,
    },
    SetSkipped {
        section: String,
        skipped: bool,
    },
    Back,
    Finish,
}

/// Replay `script` and print the final snapshot
pub async fn run(
    cwd: Option<&Path>,
    config: &Config,
    script: &Path,
    output: Option<&Path>,
    wait_reset: bool,
    json: bool,
) -> Result<()> {
    let root = resolve_cwd(cwd);
    let script: Script = read_json(&resolve_input(&root, script))?;

    let session = match output {
        Some(path) => {
            let sink = JsonFileSink::new(resolve_input(&root, path));
            replay(&script, sink, config, wait_reset).await?
        }
        None => replay(&script, RecordingSink::new(), config, wait_reset).await?,
    };

    if json {
        let out = serde_json::to_string_pretty(&session)
            .map_err(|e| FieldcheckError::InvalidJson(e.to_string()))?;
        println!("{}", out);
    } else {
        print_summary(&session);
    }
    Ok(())
}

/// Run every event in order against a fresh workflow.
///
/// Recoverable failures are logged and the replay continues, as a worker
/// would after seeing the error notice.
pub async fn replay<S: SubmissionSink>(
    script: &Script,
    sink: S,
    config: &Config,
    wait_reset: bool,
) -> Result<Session> {
    let workflow = Workflow::new(
        InMemoryDirectory::new(script.users.clone()),
        SequentialRecords::new(script.record_prefix.clone()),
        sink,
        config,
    );

    for (index, event) in script.events.iter().enumerate() {
        let outcome = match event {
            ScriptEvent::Login { token } => workflow.login(token).await.map(drop),
            ScriptEvent::SelectStore { city, store } => {
                workflow.select_store(city, store).await.map(drop)
            }
            ScriptEvent::SubmitSection { submission } => {
                workflow.submit_section(submission).await.map(drop)
            }
            ScriptEvent::UpsertLot {
                section,
                lot_id,
                patch,
            } => {
                workflow.upsert_lot(section, lot_id, patch.clone()).await;
                Ok(())
            }
            ScriptEvent::RemoveLot { section, lot_id } => {
                workflow.remove_lot(section, lot_id).await;
                Ok(())
            }
            ScriptEvent::SetObservation { section, text } => {
                workflow.set_observation(section, text).await;
                Ok(())
            }
            ScriptEvent::SetFinalPhoto { section, photo } => {
                workflow.set_final_photo(section, photo.as_deref()).await;
                Ok(())
            }
            ScriptEvent::SetSkipped { section, skipped } => {
                workflow.set_skipped(section, *skipped).await;
                Ok(())
            }
            ScriptEvent::Back => {
                workflow.go_back().await;
                Ok(())
            }
            ScriptEvent::Finish => workflow.finish().await.map(drop),
        };

        match outcome {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                tracing::warn!(event = index, code = e.code(), "{}", e);
            }
            Err(e) => return Err(e),
        }
    }

    if wait_reset {
        workflow.wait_for_reset().await;
    }
    Ok(workflow.snapshot().await)
}

fn print_summary(session: &Session) {
    println!("Step:       {}", session.current_step);
    println!("User:       {}", session.user_id.as_deref().unwrap_or("-"));
    println!("Submission: {}", session.submission_id.as_deref().unwrap_or("-"));
    if !session.store.is_empty() {
        println!("Store:      {} / {}", session.city, session.store);
    }
    for slot in SectionSlot::ALL {
        let record = session.section(slot);
        let status = if section_is_complete(record) { "complete" } else { "pending" };
        match record {
            None => println!("  {:<26} {}", slot.title(), status),
            Some(record) => println!(
                "  {:<26} {} ({} lots{})",
                slot.title(),
                status,
                record.lots.len(),
                if record.skipped { ", skipped" } else { "" }
            ),
        }
    }
    let pending = pending_sections(session);
    if !pending.is_empty() && session.user_id.is_some() {
        let names: Vec<String> = pending.iter().map(|s| s.key().to_string()).collect();
        println!("Pending sections: {}", names.join(", "));
    }
}
