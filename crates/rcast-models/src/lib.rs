//! Shared data models for the Reelcast backend.
//!
//! This crate provides Serde-serializable types for:
//! - Jobs, statuses, and progress records
//! - Job outcomes (pending approval, published, error)
//! - Scraped articles and distilled topics
//! - Generated scripts and publish receipts

pub mod article;
pub mod job;
pub mod outcome;
pub mod script;

// Re-export common types
pub use article::{Article, Topic};
pub use job::{JobId, JobRecord, JobStatus};
pub use outcome::{JobOutcome, PublishReceipt};
pub use script::Script;
