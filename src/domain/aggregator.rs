//! Section aggregation
//!
//! Pure operations that fold form updates into the session's section
//! records. Every operation returns a new snapshot and may be called any
//! number of times, in any order, for any slot.

use crate::schemas::{
    map_section_key, Lot, LotPatch, Session, SectionRecord, SectionSlot, SectionSubmission,
};

use super::merge::merge_lots;

fn record_or_default(session: &Session, slot: SectionSlot) -> SectionRecord {
    session.section(slot).cloned().unwrap_or_default()
}

/// Fold a full step submission into `slot`.
///
/// Lots are merged with [`merge_lots`]; `skipped`, `final_photo` and
/// `observation` change only when the submission supplies them.
pub fn merge_section(session: &Session, slot: SectionSlot, incoming: &SectionSubmission) -> Session {
    let previous = record_or_default(session, slot);

    let lots = match &incoming.lots {
        Some(lots) => merge_lots(&previous.lots, lots),
        None => previous.lots.clone(),
    };

    let record = SectionRecord {
        lots,
        final_photo: incoming
            .final_photo
            .clone()
            .unwrap_or(previous.final_photo),
        observation: incoming.observation.clone().or(previous.observation),
        skipped: incoming.skipped.unwrap_or(previous.skipped),
    };

    session.clone().with_section(slot, record)
}

/// Patch the lot `lot_id` in `slot`, appending it when unknown.
///
/// Unlike [`merge_section`], every key present in the patch is written,
/// explicit nulls included. New lots start as `{id, photo: null, quantity: ""}`.
pub fn upsert_lot(session: &Session, slot: SectionSlot, lot_id: &str, patch: &LotPatch) -> Session {
    let mut record = record_or_default(session, slot);

    let lot = match record.lots.get(lot_id) {
        Some(existing) => existing.clone().apply_patch(patch),
        None => Lot::placeholder(lot_id).apply_patch(patch),
    };
    record.lots.upsert(lot);

    session.clone().with_section(slot, record)
}

/// Remove the lot `lot_id` from `slot`. Unknown lots and unwritten slots are left alone.
pub fn remove_lot(session: &Session, slot: SectionSlot, lot_id: &str) -> Session {
    let Some(existing) = session.section(slot) else {
        return session.clone();
    };
    if !existing.lots.contains(lot_id) {
        return session.clone();
    }

    let mut record = existing.clone();
    record.lots.remove(lot_id);
    session.clone().with_section(slot, record)
}

pub fn set_observation(session: &Session, slot: SectionSlot, text: impl Into<String>) -> Session {
    let record = record_or_default(session, slot).with_observation(text);
    session.clone().with_section(slot, record)
}

pub fn set_final_photo(session: &Session, slot: SectionSlot, photo: Option<String>) -> Session {
    let record = record_or_default(session, slot).with_final_photo(photo);
    session.clone().with_section(slot, record)
}

pub fn set_skipped(session: &Session, slot: SectionSlot, skipped: bool) -> Session {
    let record = record_or_default(session, slot).with_skipped(skipped);
    session.clone().with_section(slot, record)
}

/// A mutation addressed by raw section key
#[derive(Debug, Clone, PartialEq)]
pub enum SectionUpdate {
    Submit(SectionSubmission),
    UpsertLot { lot_id: String, patch: LotPatch },
    RemoveLot { lot_id: String },
    Observation(String),
    FinalPhoto(Option<String>),
    Skipped(bool),
}

/// Apply `update` to the slot named by `key`.
///
/// Keys outside the three known sections leave the session unchanged.
pub fn apply_by_key(session: &Session, key: &str, update: &SectionUpdate) -> Session {
    let Some(slot) = map_section_key(key) else {
        tracing::warn!(section_key = key, "ignoring update for unknown section");
        return session.clone();
    };
    apply_to_slot(session, slot, update)
}

/// Apply `update` to `slot`.
pub fn apply_to_slot(session: &Session, slot: SectionSlot, update: &SectionUpdate) -> Session {
    match update {
        SectionUpdate::Submit(submission) => merge_section(session, slot, submission),
        SectionUpdate::UpsertLot { lot_id, patch } => upsert_lot(session, slot, lot_id, patch),
        SectionUpdate::RemoveLot { lot_id } => remove_lot(session, slot, lot_id),
        SectionUpdate::Observation(text) => set_observation(session, slot, text.clone()),
        SectionUpdate::FinalPhoto(photo) => set_final_photo(session, slot, photo.clone()),
        SectionUpdate::Skipped(skipped) => set_skipped(session, slot, *skipped),
    }
}
