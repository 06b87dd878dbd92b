//! The create-phase stage pipeline.
//!
//! Runs the fixed stage sequence for one job:
//! `pending(0) -> scraping(10-20) -> analyzing(30-40) -> generating_script(50-60)
//! -> creating_video(70-80) -> creating_thumbnail(90-95) -> ready(100)`.
//!
//! Each collaborator call is awaited; the first failure aborts the remaining
//! stages, writes an `Error` outcome with the triggering message, and resets
//! progress to 0. There is no automatic retry and no cancellation primitive.

use std::path::Path;

use tracing::{error, info};

use rcast_models::{JobId, JobOutcome, JobRecord, JobStatus};

use crate::collaborators::Collaborators;
use crate::error::{CollaboratorError, PipelineError, PipelineResult};
use crate::store::JobStore;

/// Run the full create pipeline for `job_id`, publishing progress into the
/// store after every stage.
///
/// The record is written as `pending` before the first suspension point so
/// pollers never see "not found" for an accepted job. The returned error is
/// informational for the launch site; by the time it is returned the store
/// already reflects the failure.
pub async fn run_pipeline(
    store: &JobStore,
    collab: &Collaborators,
    job_id: &JobId,
) -> PipelineResult<()> {
    store.insert(JobRecord::new(job_id.clone()));
    info!(job_id = %job_id, "Pipeline started");

    // Stage 1: scrape
    set_stage(store, job_id, JobStatus::Scraping, 10, "Scraping news sources");
    let articles = match collab.news.scrape().await {
        Ok(articles) => articles,
        Err(e) => return Err(fail(store, job_id, e)),
    };
    set_stage(
        store,
        job_id,
        JobStatus::Scraping,
        20,
        format!("Found {} articles", articles.len()),
    );

    // Stage 2: distill topics
    set_stage(store, job_id, JobStatus::Analyzing, 30, "Analyzing articles");
    let topics = match collab.distiller.distill(&articles).await {
        Ok(topics) => topics,
        Err(e) => return Err(fail(store, job_id, e)),
    };
    set_stage(
        store,
        job_id,
        JobStatus::Analyzing,
        40,
        format!("Identified {} topics", topics.len()),
    );

    // Stage 3: generate script
    set_stage(
        store,
        job_id,
        JobStatus::GeneratingScript,
        50,
        "Generating script",
    );
    let script = match collab.writer.write_script(&topics).await {
        Ok(script) => script,
        Err(e) => return Err(fail(store, job_id, e)),
    };
    set_stage(
        store,
        job_id,
        JobStatus::GeneratingScript,
        60,
        format!("Script ready: {}", script.title),
    );

    // Stage 4: render video
    set_stage(store, job_id, JobStatus::CreatingVideo, 70, "Rendering video");
    let video_path = match collab.renderer.render_video(&script).await {
        Ok(path) => path,
        Err(e) => return Err(fail(store, job_id, e)),
    };
    set_stage(store, job_id, JobStatus::CreatingVideo, 80, "Video rendered");

    // Stage 5: render thumbnail
    set_stage(
        store,
        job_id,
        JobStatus::CreatingThumbnail,
        90,
        "Rendering thumbnail",
    );
    let thumbnail_path = match collab.renderer.render_thumbnail(&script).await {
        Ok(path) => path,
        Err(e) => return Err(fail(store, job_id, e)),
    };
    set_stage(
        store,
        job_id,
        JobStatus::CreatingThumbnail,
        95,
        "Thumbnail rendered",
    );

    let outcome = JobOutcome::PendingApproval {
        video_filename: filename_of(&video_path),
        thumbnail_filename: filename_of(&thumbnail_path),
        video_path: video_path.display().to_string(),
        thumbnail_path: thumbnail_path.display().to_string(),
        script,
        ready_for_approval: true,
    };
    store.update(job_id, |rec| {
        rec.outcome = Some(outcome);
        rec.set_stage(JobStatus::Ready, 100, "Video ready for approval");
    });
    info!(job_id = %job_id, "Pipeline finished, awaiting approval");

    Ok(())
}

fn set_stage(
    store: &JobStore,
    job_id: &JobId,
    status: JobStatus,
    progress: u8,
    message: impl Into<String>,
) {
    store.update(job_id, |rec| rec.set_stage(status, progress, message.into()));
}

/// Record a collaborator failure and hand the error back for the launch-site
/// log line.
fn fail(store: &JobStore, job_id: &JobId, err: CollaboratorError) -> PipelineError {
    error!(job_id = %job_id, "Pipeline stage failed: {}", err);
    store.update(job_id, |rec| rec.fail(err.message()));
    PipelineError::Collaborator(err)
}

/// Derive a serving filename from a rendered artifact path.
fn filename_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_of_strips_directories() {
        assert_eq!(filename_of(Path::new("/out/v1.mp4")), "v1.mp4");
        assert_eq!(filename_of(Path::new("t1.png")), "t1.png");
    }
}
