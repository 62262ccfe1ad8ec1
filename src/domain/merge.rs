//! Lot merging
//!
//! Combines previously stored lots with a new partial submission without
//! losing any stored value.

use crate::schemas::{Lot, LotList};

/// Keyed upsert of `incoming` onto `previous`.
///
/// - Incoming lots carrying nothing but an id are dropped.
/// - Known ids are updated in place, field by field; only filled incoming
///   fields overwrite.
/// - New ids are appended in incoming order.
/// - Lots absent from `incoming` are kept as they were.
pub fn merge_lots(previous: &LotList, incoming: &[Lot]) -> LotList {
    let mut merged = previous.clone();
    for lot in incoming {
        if !lot.has_meaningful_fields() {
            tracing::debug!(lot_id = %lot.id, "dropping lot update without data");
            continue;
        }
        let base = merged
            .get(&lot.id)
            .cloned()
            .unwrap_or_else(|| Lot::new(lot.id.clone()));
        merged.upsert(base.overlay(lot));
    }
    merged
}
