//! Job records for pipeline progress tracking and polling.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::outcome::JobOutcome;

/// Unique identifier for a video production job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current pipeline stage of a job.
///
/// Stages advance strictly in order; any stage may instead transition to
/// `Error`. `Completed` and `Error` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Job accepted, pipeline not yet running
    #[default]
    Pending,
    /// Scraping source articles
    Scraping,
    /// Distilling topics from scraped articles
    Analyzing,
    /// Generating the video script
    GeneratingScript,
    /// Rendering the full video
    CreatingVideo,
    /// Rendering the thumbnail
    CreatingThumbnail,
    /// Artifacts rendered, awaiting human approval
    Ready,
    /// Approved, uploading to the platform
    Uploading,
    /// Published to the platform
    Completed,
    /// Pipeline or upload failed
    Error,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Scraping => "scraping",
            JobStatus::Analyzing => "analyzing",
            JobStatus::GeneratingScript => "generating_script",
            JobStatus::CreatingVideo => "creating_video",
            JobStatus::CreatingThumbnail => "creating_thumbnail",
            JobStatus::Ready => "ready",
            JobStatus::Uploading => "uploading",
            JobStatus::Completed => "completed",
            JobStatus::Error => "error",
        }
    }

    /// Check if no further automatic transitions occur from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Error)
    }

    /// Rank of the status within the create-phase stage order.
    ///
    /// Used to assert monotonic stage progression; `Error` compares highest
    /// since it is terminal.
    pub fn stage_rank(&self) -> u8 {
        match self {
            JobStatus::Pending => 0,
            JobStatus::Scraping => 1,
            JobStatus::Analyzing => 2,
            JobStatus::GeneratingScript => 3,
            JobStatus::CreatingVideo => 4,
            JobStatus::CreatingThumbnail => 5,
            JobStatus::Ready => 6,
            JobStatus::Uploading => 7,
            JobStatus::Completed => 8,
            JobStatus::Error => 9,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Mutable progress state for a single job.
///
/// One record exists per job ID for the lifetime of the process. Records are
/// never garbage-collected; this is an intentional limitation of the
/// in-process store.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JobRecord {
    /// Unique job identifier
    pub job_id: JobId,

    /// Current pipeline stage
    pub status: JobStatus,

    /// Progress percentage (0-100), non-decreasing within a run except on
    /// error reset to 0
    pub progress: u8,

    /// Human-readable description of current activity or outcome
    pub message: String,

    /// Outcome payload, present once the pipeline finishes or the job is
    /// later published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<JobOutcome>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl JobRecord {
    /// Create a freshly accepted record in the `Pending` state.
    pub fn new(job_id: JobId) -> Self {
        let now = Utc::now();
        Self {
            job_id,
            status: JobStatus::Pending,
            progress: 0,
            message: "Job accepted".to_string(),
            outcome: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Advance to a new stage, keeping any previously stored outcome.
    pub fn set_stage(&mut self, status: JobStatus, progress: u8, message: impl Into<String>) {
        self.status = status;
        self.progress = progress.min(100);
        self.message = message.into();
        self.updated_at = Utc::now();
    }

    /// Record a failure: status `Error`, progress reset to 0, and an
    /// `Error` outcome carrying the message.
    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.outcome = Some(JobOutcome::Error {
            message: message.clone(),
        });
        self.set_stage(JobStatus::Error, 0, message);
    }

    /// Check if the record is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_pending() {
        let record = JobRecord::new(JobId::from_string("job-1"));
        assert_eq!(record.status, JobStatus::Pending);
        assert_eq!(record.progress, 0);
        assert!(record.outcome.is_none());
        assert!(!record.is_terminal());
    }

    #[test]
    fn test_set_stage_clamps_progress() {
        let mut record = JobRecord::new(JobId::from_string("job-1"));
        record.set_stage(JobStatus::Scraping, 200, "Scraping news sources");
        assert_eq!(record.progress, 100);
        assert_eq!(record.status, JobStatus::Scraping);
    }

    #[test]
    fn test_fail_resets_progress_and_stores_error_outcome() {
        let mut record = JobRecord::new(JobId::from_string("job-1"));
        record.set_stage(JobStatus::Analyzing, 40, "Identified 3 topics");
        record.fail("distill failed");

        assert_eq!(record.status, JobStatus::Error);
        assert_eq!(record.progress, 0);
        assert!(record.is_terminal());
        match record.outcome {
            Some(JobOutcome::Error { ref message }) => assert_eq!(message, "distill failed"),
            ref other => panic!("expected error outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_stage_rank_is_monotonic_over_pipeline_order() {
        let order = [
            JobStatus::Pending,
            JobStatus::Scraping,
            JobStatus::Analyzing,
            JobStatus::GeneratingScript,
            JobStatus::CreatingVideo,
            JobStatus::CreatingThumbnail,
            JobStatus::Ready,
            JobStatus::Uploading,
            JobStatus::Completed,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].stage_rank() < pair[1].stage_rank());
        }
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let json = serde_json::to_string(&JobStatus::GeneratingScript).unwrap();
        assert_eq!(json, "\"generating_script\"");
    }
}
