//! Schema types for fieldcheck
//!
//! Field names follow the JSON records exchanged with the form layer.

mod config;
mod lot;
mod section;
mod session;
mod step;
mod submission;

pub use config::Config;
pub use lot::{Lot, LotList, LotPatch};
pub use section::{map_section_key, SectionKey, SectionRecord, SectionSlot, SectionSubmission};
pub use session::{Session, UserMetadata};
pub use step::Step;
pub use submission::Submission;
