//! Step state machine definitions
//!
//! The workflow follows a linear progression:
//! login → store-selection → validation-1 → validation-2 → validation-3 → checkout → completed
//!
//! Backward moves are allowed one step at a time from the validation steps and checkout.

use crate::schemas::{SectionSlot, Step};

/// The canonical ordering of steps.
///
/// IMPORTANT: This is the source of truth for step ordering.
pub const STEP_ORDER: &[Step] = &[
    Step::Login,
    Step::StoreSelection,
    Step::Validation1,
    Step::Validation2,
    Step::Validation3,
    Step::Checkout,
    Step::Completed,
];

/// Get the 0-based index of a step in the workflow progression.
pub fn get_step_index(step: Step) -> usize {
    STEP_ORDER
        .iter()
        .position(|&s| s == step)
        .unwrap_or(usize::MAX)
}

/// Returns the step that follows `current`, or None for the terminal step.
pub fn get_next_step(current: Step) -> Option<Step> {
    let index = get_step_index(current);
    if index >= STEP_ORDER.len() - 1 {
        return None;
    }
    Some(STEP_ORDER[index + 1])
}

/// Returns the step a "back" request leads to.
///
/// Only the validation steps and checkout can go back; login,
/// store-selection and completed have no predecessor.
pub fn get_previous_step(current: Step) -> Option<Step> {
    match current {
        Step::Validation1 | Step::Validation2 | Step::Validation3 | Step::Checkout => {
            Some(STEP_ORDER[get_step_index(current) - 1])
        }
        Step::Login | Step::StoreSelection | Step::Completed => None,
    }
}

/// Check if a step is the terminal step (completed).
pub fn is_terminal_step(step: Step) -> bool {
    step == Step::Completed
}

/// Section addressed while the session is on `step`, if any.
pub fn section_for_step(step: Step) -> Option<SectionSlot> {
    match step {
        Step::Validation1 => Some(SectionSlot::Validation1),
        Step::Validation2 => Some(SectionSlot::Validation2),
        Step::Validation3 => Some(SectionSlot::Validation3),
        _ => None,
    }
}
