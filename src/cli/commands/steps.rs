//! Steps command - Show the step chain

use serde::Serialize;

use crate::domain::{get_next_step, get_previous_step, section_for_step, STEP_ORDER};
use crate::errors::{FieldcheckError, Result};
use crate::schemas::Step;

#[derive(Debug, Serialize, PartialEq)]
struct StepRow {
    step: Step,
    next: Option<Step>,
    back: Option<Step>,
    section: Option<String>,
}

fn step_rows() -> Vec<StepRow> {
    STEP_ORDER
        .iter()
        .map(|&step| StepRow {
            step,
            next: get_next_step(step),
            back: get_previous_step(step),
            section: section_for_step(step).map(|slot| slot.key().to_string()),
        })
        .collect()
}

fn describe(step: Option<Step>) -> String {
    step.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Print every step with its successor and predecessor
pub async fn run(json: bool) -> Result<()> {
    let rows = step_rows();
    if json {
        let out = serde_json::to_string_pretty(&rows)
            .map_err(|e| FieldcheckError::InvalidJson(e.to_string()))?;
        println!("{}", out);
        return Ok(());
    }

    for row in &rows {
        let section = row
            .section
            .as_deref()
            .map(|key| format!("  [{}]", key))
            .unwrap_or_default();
        println!(
            "{:<16} next: {:<16} back: {}{}",
            row.step.to_string(),
            describe(row.next),
            describe(row.back),
            section
        );
    }
    Ok(())
}
