//! Pipeline and approval error types.

use thiserror::Error;

use rcast_models::JobId;

pub type CollaboratorResult<T> = Result<T, CollaboratorError>;
pub type PipelineResult<T> = Result<T, PipelineError>;
pub type ApprovalResult<T> = Result<T, ApprovalError>;

/// Failure of an external collaborator call (scrape, distill, script,
/// render, publish).
///
/// These are absorbed into the job record and surfaced only via polling;
/// they are never raised to the caller that launched the pipeline.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct CollaboratorError(String);

impl CollaboratorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Create-pipeline failure, reported to the launch site for logging after
/// the job record has already been updated.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("collaborator failed: {0}")]
    Collaborator(#[from] CollaboratorError),
}

/// Approval gate failure.
///
/// Unlike pipeline failures these are both recorded into the store and
/// re-raised, since the approving caller is synchronously waiting.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Job unknown, or the pipeline has not produced a result yet
    #[error("job {0} not found or has no result")]
    NotFound(JobId),

    /// The job never reached ready, or its approval was already consumed
    #[error("job {0} is not ready for approval")]
    NotReady(JobId),

    /// Ready flag set but a required artifact is missing
    #[error("job {0} is missing artifacts required for publishing")]
    IncompleteArtifacts(JobId),

    /// The publish collaborator failed
    #[error("publish failed: {0}")]
    Publish(String),
}
