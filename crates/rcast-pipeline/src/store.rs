//! In-process job record store.
//!
//! A process-wide map from job ID to [`JobRecord`]. The store is the only
//! shared mutable state between the pipeline task, the approval gate, and
//! status pollers, so every read-modify-write goes through [`JobStore::update`]
//! and is atomic per key. There is no iteration or deletion API; records live
//! for the lifetime of the process.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use rcast_models::{JobId, JobRecord};

/// Mutex-guarded map of job records.
#[derive(Debug, Default)]
pub struct JobStore {
    jobs: Mutex<HashMap<JobId, JobRecord>>,
}

impl JobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for a job.
    pub fn insert(&self, record: JobRecord) {
        let mut jobs = self.lock();
        jobs.insert(record.job_id.clone(), record);
    }

    /// Get a snapshot of a job's record. Absence is distinct from an error
    /// record: it means the job was never accepted.
    pub fn get(&self, job_id: &JobId) -> Option<JobRecord> {
        self.lock().get(job_id).cloned()
    }

    /// Atomically read-modify-write a job's record.
    ///
    /// Returns `None` if the job is unknown, otherwise the closure's result.
    /// The closure runs under the store lock and must not block.
    pub fn update<F, T>(&self, job_id: &JobId, f: F) -> Option<T>
    where
        F: FnOnce(&mut JobRecord) -> T,
    {
        let mut jobs = self.lock();
        jobs.get_mut(job_id).map(f)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<JobId, JobRecord>> {
        // A poisoned lock only means another writer panicked mid-update;
        // the map itself is still usable.
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcast_models::JobStatus;

    #[test]
    fn test_get_unknown_job_is_absent() {
        let store = JobStore::new();
        assert!(store.get(&JobId::from_string("nope")).is_none());
    }

    #[test]
    fn test_insert_then_get() {
        let store = JobStore::new();
        let job_id = JobId::from_string("job-1");
        store.insert(JobRecord::new(job_id.clone()));

        let record = store.get(&job_id).unwrap();
        assert_eq!(record.status, JobStatus::Pending);
        assert_eq!(record.progress, 0);
    }

    #[test]
    fn test_update_is_read_modify_write() {
        let store = JobStore::new();
        let job_id = JobId::from_string("job-1");
        store.insert(JobRecord::new(job_id.clone()));

        let updated = store.update(&job_id, |rec| {
            rec.set_stage(JobStatus::Scraping, 10, "Scraping news sources");
            rec.progress
        });
        assert_eq!(updated, Some(10));

        // A later update sees the earlier write
        store.update(&job_id, |rec| {
            assert_eq!(rec.status, JobStatus::Scraping);
            rec.set_stage(JobStatus::Scraping, 20, "Found 12 articles");
        });
        assert_eq!(store.get(&job_id).unwrap().progress, 20);
    }

    #[test]
    fn test_update_unknown_job_is_none() {
        let store = JobStore::new();
        let touched = store.update(&JobId::from_string("nope"), |_| ());
        assert!(touched.is_none());
    }

    #[test]
    fn test_concurrent_updates_do_not_lose_writes() {
        use std::sync::Arc;

        let store = Arc::new(JobStore::new());
        let job_id = JobId::from_string("job-1");
        store.insert(JobRecord::new(job_id.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let job_id = job_id.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        store.update(&job_id, |rec| {
                            rec.progress = (rec.progress + 1).min(100);
                        });
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 800 increments clamped at 100
        assert_eq!(store.get(&job_id).unwrap().progress, 100);
    }
}
