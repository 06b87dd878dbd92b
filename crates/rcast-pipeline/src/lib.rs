//! Job orchestration core for the Reelcast backend.
//!
//! This crate provides:
//! - An in-process, process-lifetime job record store
//! - The multi-stage create pipeline (scrape, analyze, script, render)
//! - The approval gate that publishes a ready job exactly once
//! - A `JobService` facade exposing start/status/approve to outer layers
//!
//! External collaborators (scraper, LLM, renderer, publisher) are consumed
//! through the traits in [`collaborators`]; their implementations live in
//! `rcast-collab`.

pub mod approval;
pub mod collaborators;
pub mod error;
pub mod pipeline;
pub mod service;
pub mod store;

// Re-export common types
pub use collaborators::{
    Collaborators, NewsSource, Publisher, ScriptWriter, TopicDistiller, VideoRenderer,
};
pub use error::{
    ApprovalError, ApprovalResult, CollaboratorError, CollaboratorResult, PipelineError,
    PipelineResult,
};
pub use service::JobService;
pub use store::JobStore;
