//! Facade exposing the orchestration core to outer layers.

use std::sync::Arc;

use tracing::error;

use rcast_models::{JobId, JobRecord, PublishReceipt};

use crate::approval::approve_and_publish;
use crate::collaborators::Collaborators;
use crate::error::ApprovalResult;
use crate::pipeline::run_pipeline;
use crate::store::JobStore;

/// Owns the job store and the collaborator bundle; the single entry point
/// used by the HTTP layer and tests.
#[derive(Clone)]
pub struct JobService {
    store: Arc<JobStore>,
    collaborators: Arc<Collaborators>,
}

impl JobService {
    pub fn new(collaborators: Collaborators) -> Self {
        Self {
            store: Arc::new(JobStore::new()),
            collaborators: Arc::new(collaborators),
        }
    }

    /// Fire-and-forget launch of the create pipeline.
    ///
    /// The pending record is inserted synchronously before the task is
    /// spawned, so a status poll issued right after this returns can never
    /// see "not found". The caller does not block on completion; outcomes
    /// are retrieved later via [`JobService::get_status`].
    pub fn start_job(&self) -> JobId {
        let job_id = JobId::new();
        self.start_job_with_id(job_id.clone());
        job_id
    }

    /// Launch the pipeline under a caller-assigned job ID.
    ///
    /// IDs are opaque; a given ID must only ever be started once per
    /// process.
    pub fn start_job_with_id(&self, job_id: JobId) {
        self.store.insert(JobRecord::new(job_id.clone()));

        let store = Arc::clone(&self.store);
        let collab = Arc::clone(&self.collaborators);
        tokio::spawn(async move {
            if let Err(e) = run_pipeline(&store, &collab, &job_id).await {
                error!(job_id = %job_id, "Pipeline failed: {}", e);
                // The pipeline records its own failures; this covers the
                // case where it bailed out before writing a terminal state.
                store.update(&job_id, |rec| {
                    if !rec.is_terminal() {
                        rec.fail(e.to_string());
                    }
                });
            }
        });
    }

    /// Current record for a job, or `None` if the job was never started.
    pub fn get_status(&self, job_id: &JobId) -> Option<JobRecord> {
        self.store.get(job_id)
    }

    /// Approve a ready job and publish it. Awaited by the caller; failures
    /// are recorded into the store and re-raised.
    pub async fn approve(&self, job_id: &JobId) -> ApprovalResult<PublishReceipt> {
        approve_and_publish(&self.store, &self.collaborators, job_id).await
    }
}
