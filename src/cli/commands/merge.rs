//! Merge command - Apply a resubmission to a stored lot list

use std::path::Path;

use crate::domain::merge_lots;
use crate::errors::{FieldcheckError, Result};
use crate::fs::{read_json, resolve_cwd, resolve_input};
use crate::schemas::{Lot, LotList};

/// Read both lot arrays, merge them and print the result as JSON
pub async fn run(cwd: Option<&Path>, previous: &Path, incoming: &Path) -> Result<()> {
    let root = resolve_cwd(cwd);
    let merged = merge_files(&resolve_input(&root, previous), &resolve_input(&root, incoming))?;

    let out = serde_json::to_string_pretty(&merged)
        .map_err(|e| FieldcheckError::InvalidJson(e.to_string()))?;
    println!("{}", out);
    Ok(())
}

fn merge_files(previous: &Path, incoming: &Path) -> Result<LotList> {
    let previous: LotList = read_json(previous)?;
    let incoming: Vec<Lot> = read_json(incoming)?;
    tracing::debug!(previous = previous.len(), incoming = incoming.len(), "merging lots");
    Ok(merge_lots(&previous, &incoming))
}
