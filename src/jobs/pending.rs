// src/jobs/pending.rs
//! The single pending-apply record.
//!
//! Clicking "apply" hands the user off to the employer's site, so whether an
//! application actually happened is only learned by asking on return. The
//! record of that handoff lives in a guarded single slot: at most one exists,
//! and confirm/cancel consume it atomically, so the apply endpoint can be
//! called at most once per record. A file mirror keeps the record across
//! separate invocations of the jobs view; confirm and cancel delete it.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::types::Job;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApply {
    pub job: Job,
    pub confirmed: bool,
    pub started_at: DateTime<Utc>,
}

pub struct PendingApplySlot {
    path: PathBuf,
    slot: Mutex<Option<PendingApply>>,
}

impl PendingApplySlot {
    /// Open the slot, restoring a mirrored record if one is readable.
    pub fn open(path: PathBuf) -> Self {
        let initial = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<PendingApply>(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!("discarding unreadable pending-apply file: {e}");
                    None
                }
            },
            Err(_) => None,
        };
        PendingApplySlot {
            path,
            slot: Mutex::new(initial),
        }
    }

    /// Record an application handoff. Replaces any stale record so the slot
    /// never holds more than one.
    pub fn begin(&self, job: Job) -> Result<PendingApply> {
        let record = PendingApply {
            job,
            confirmed: false,
            started_at: Utc::now(),
        };
        self.persist(&record)?;
        *self.slot.lock().expect("pending slot poisoned") = Some(record.clone());
        Ok(record)
    }

    /// The unconfirmed record, if one is waiting.
    pub fn pending(&self) -> Option<PendingApply> {
        self.slot
            .lock()
            .expect("pending slot poisoned")
            .clone()
            .filter(|r| !r.confirmed)
    }

    /// Consume the record as confirmed. The caller marks the job applied
    /// server-side; a second confirm (or a racing focus check) finds the slot
    /// already empty.
    pub fn confirm(&self) -> Option<Job> {
        self.take()
    }

    /// Discard the record without marking anything applied.
    pub fn cancel(&self) -> Option<Job> {
        self.take()
    }

    fn take(&self) -> Option<Job> {
        let record = self.slot.lock().expect("pending slot poisoned").take()?;
        if let Err(e) = self.remove_mirror() {
            warn!("could not remove pending-apply file: {e}");
        }
        Some(record.job)
    }

    fn persist(&self, record: &PendingApply) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw =
            serde_json::to_string_pretty(record).map_err(|e| Error::Decode(e.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    fn remove_mirror(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
