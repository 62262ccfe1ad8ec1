//! Domain logic for inspection steps and section records

mod aggregator;
mod checkout;
mod merge;
mod steps;
mod transitions;


pub use aggregator::{
    apply_by_key, apply_to_slot, merge_section, remove_lot, set_final_photo, set_observation,
    set_skipped, upsert_lot, SectionUpdate,
};
pub use checkout::{build_submission, pending_sections, section_is_complete};
pub use merge::merge_lots;
pub use steps::{
    get_next_step, get_previous_step, get_step_index, is_terminal_step, section_for_step,
    STEP_ORDER,
};
pub use transitions::{apply_advance, apply_go_back, reset, TransitionResult};
