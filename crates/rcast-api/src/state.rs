//! Application state.

use std::sync::Arc;

use rcast_collab::collaborators_from_env;
use rcast_pipeline::JobService;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub jobs: Arc<JobService>,
}

impl AppState {
    /// Create application state with production collaborators from the
    /// environment.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let collaborators = collaborators_from_env()?;
        Ok(Self {
            config,
            jobs: Arc::new(JobService::new(collaborators)),
        })
    }
}
