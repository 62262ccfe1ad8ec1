//! fieldcheck - Step state machine and section merge engine for guided shelf inspections
//!
//! This library provides:
//! - Schema definitions for sessions, sections and lots
//! - Domain logic for step transitions and non-destructive section merging
//! - Collaborator traits for the user directory, record allocation and submission
//! - The workflow that owns a session and wires the pieces together
//! - File system and configuration helpers used by the CLI

pub mod cli;
pub mod collaborators;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fs;
pub mod scheduler;
pub mod schemas;
pub mod workflow;

// Re-export commonly used types
pub use errors::{FieldcheckError, Result};
pub use schemas::{Config, Lot, SectionRecord, SectionSlot, SectionSubmission, Session, Step};
pub use workflow::Workflow;
