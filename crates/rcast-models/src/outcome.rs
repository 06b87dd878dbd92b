//! Job outcome payloads.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::script::Script;

/// Outcome of a job, stored on the record once the create phase finishes
/// (success or error) or the job is later published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JobOutcome {
    /// Artifacts rendered, awaiting human approval.
    PendingApproval {
        script: Script,
        /// Path to the rendered video file
        video_path: String,
        /// Path to the rendered thumbnail image
        thumbnail_path: String,
        /// Video filename derived from the path, for downstream serving
        video_filename: String,
        /// Thumbnail filename derived from the path
        thumbnail_filename: String,
        /// Cleared by the approval gate when the job is claimed for upload
        ready_for_approval: bool,
    },
    /// Published to the platform; original artifacts kept for audit.
    Published {
        /// Platform-assigned video identifier
        video_id: String,
        /// Public URL of the published video
        video_url: String,
        script: Script,
        video_path: String,
        thumbnail_path: String,
    },
    /// The pipeline failed; no paths, no script.
    Error { message: String },
}

impl JobOutcome {
    /// Check whether the approval gate may consume this outcome.
    pub fn is_ready_for_approval(&self) -> bool {
        matches!(
            self,
            JobOutcome::PendingApproval {
                ready_for_approval: true,
                ..
            }
        )
    }
}

/// Receipt returned by the publish collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PublishReceipt {
    /// Platform-assigned video identifier
    pub video_id: String,
    /// Public URL of the published video
    pub video_url: String,
}
