//! The approval gate: validate, publish, finalize.
//!
//! A second, independently invokable operation keyed by job ID. It re-checks
//! the stored state rather than trusting call order, publishes through the
//! collaborator, and transitions the job to a terminal state. Unlike the
//! create pipeline its failures are re-raised to the awaiting caller in
//! addition to being recorded.

use std::path::Path;

use tracing::{error, info};

use rcast_models::{JobId, JobOutcome, JobStatus, PublishReceipt, Script};

use crate::collaborators::Collaborators;
use crate::error::{ApprovalError, ApprovalResult};
use crate::store::JobStore;

/// Approve a ready job and upload its artifacts to the platform.
///
/// Precondition failures are distinct: unknown or resultless job ->
/// [`ApprovalError::NotFound`]; result present but not (or no longer) ready
/// -> [`ApprovalError::NotReady`]; ready flag set but artifacts missing ->
/// [`ApprovalError::IncompleteArtifacts`]. The gate is not idempotent: the
/// first successful run consumes the ready flag, so a second invocation
/// fails with `NotReady` instead of silently re-publishing.
pub async fn approve_and_publish(
    store: &JobStore,
    collab: &Collaborators,
    job_id: &JobId,
) -> ApprovalResult<PublishReceipt> {
    let (script, video_path, thumbnail_path) = claim_for_upload(store, job_id)?;
    info!(job_id = %job_id, video = %video_path, "Job approved, uploading");

    let receipt = match collab
        .publisher
        .publish(Path::new(&video_path), Path::new(&thumbnail_path), &script)
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            error!(job_id = %job_id, "Upload failed: {}", e);
            store.update(job_id, |rec| {
                rec.set_stage(JobStatus::Error, 0, format!("Upload failed: {}", e));
            });
            return Err(ApprovalError::Publish(e.to_string()));
        }
    };

    store.update(job_id, |rec| {
        rec.outcome = Some(JobOutcome::Published {
            video_id: receipt.video_id.clone(),
            video_url: receipt.video_url.clone(),
            script: script.clone(),
            video_path: video_path.clone(),
            thumbnail_path: thumbnail_path.clone(),
        });
        rec.set_stage(
            JobStatus::Completed,
            100,
            format!("Published at {}", receipt.video_url),
        );
    });
    info!(job_id = %job_id, url = %receipt.video_url, "Job published");

    Ok(receipt)
}

/// Atomically validate the preconditions and claim the job for upload.
///
/// Runs entirely inside one store update: the ready flag is consumed and the
/// status moved to `uploading(0)` in the same critical section as the check,
/// so concurrent approvals serialize and the loser observes `NotReady`.
/// On any precondition failure the stored outcome is left untouched.
fn claim_for_upload(
    store: &JobStore,
    job_id: &JobId,
) -> ApprovalResult<(Script, String, String)> {
    let claimed = store.update(job_id, |rec| {
        let artifacts = match rec.outcome.as_mut() {
            None => return Err(ApprovalError::NotFound(job_id.clone())),
            Some(JobOutcome::PendingApproval {
                script,
                video_path,
                thumbnail_path,
                ready_for_approval,
                ..
            }) => {
                if !*ready_for_approval {
                    return Err(ApprovalError::NotReady(job_id.clone()));
                }
                if !script.is_complete() || video_path.is_empty() || thumbnail_path.is_empty() {
                    return Err(ApprovalError::IncompleteArtifacts(job_id.clone()));
                }
                *ready_for_approval = false;
                (script.clone(), video_path.clone(), thumbnail_path.clone())
            }
            Some(_) => return Err(ApprovalError::NotReady(job_id.clone())),
        };
        rec.set_stage(JobStatus::Uploading, 0, "Uploading to platform");
        Ok(artifacts)
    });

    match claimed {
        None => Err(ApprovalError::NotFound(job_id.clone())),
        Some(result) => result,
    }
}
