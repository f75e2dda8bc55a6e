//! Persistence interface boundary.
//!
//! The storage engine itself is an external collaborator; this module fixes
//! only its contract: insert stamps metadata and rejects duplicate job
//! numbers, fetch is keyed by job number, list is ordered and paginated.
//! [`MemoryStore`] is the reference implementation used in tests.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use thiserror::Error;

use crate::record::{InsertPayload, JobStatus, StoredRecord};

/// Failures at the storage boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record with the same job number already exists.
    #[error("job {job_number} already stored")]
    Duplicate { job_number: String },

    /// The storage backend failed.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persists and retrieves job records.
pub trait JobStore: Send + Sync {
    /// Store a validated payload. The store stamps createdAt/updatedAt and
    /// the initial status.
    fn insert(&self, payload: InsertPayload) -> Result<StoredRecord, StoreError>;

    /// Look up one record by its job number.
    fn fetch(&self, job_number: &str) -> Result<Option<StoredRecord>, StoreError>;

    /// Ordered page of records. Pages are 1-indexed.
    fn list(&self, page: u32, limit: u32) -> Result<Vec<StoredRecord>, StoreError>;
}

/// In-memory store, ordered by job number.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    jobs: Arc<Mutex<BTreeMap<String, StoredRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, StoredRecord>>, StoreError> {
        self.jobs
            .lock()
            .map_err(|_| StoreError::Backend("poisoned lock".to_string()))
    }
}

impl JobStore for MemoryStore {
    fn insert(&self, payload: InsertPayload) -> Result<StoredRecord, StoreError> {
        let mut jobs = self.lock()?;
        let key = payload.job_number.as_str().to_string();
        if jobs.contains_key(&key) {
            return Err(StoreError::Duplicate { job_number: key });
        }

        let now = Utc::now();
        let record = StoredRecord::new(payload, now, now, JobStatus::Active);
        jobs.insert(key, record.clone());
        Ok(record)
    }

    fn fetch(&self, job_number: &str) -> Result<Option<StoredRecord>, StoreError> {
        Ok(self.lock()?.get(job_number).cloned())
    }

    fn list(&self, page: u32, limit: u32) -> Result<Vec<StoredRecord>, StoreError> {
        let offset = (page.max(1) as usize - 1) * limit as usize;
        Ok(self
            .lock()?
            .values()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
