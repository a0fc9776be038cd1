// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Recovery ledger: records from finished trackers plus an in-flight count.
//!
//! Each tracker holds a [`TrackerTicket`] for its whole life. The ticket is
//! taken before the tracker task is spawned and released when the task
//! finishes, so [`RecoveryLedger::wait_idle`] covers every tracker started
//! before it was called.

use et_core::RecoveryRecord;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

/// Append-only store of recovery records for one game session.
pub struct RecoveryLedger {
    session: u64,
    records: Mutex<Vec<RecoveryRecord>>,
    in_flight: watch::Sender<usize>,
}

impl RecoveryLedger {
    pub fn new(session: u64) -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            session,
            records: Mutex::new(Vec::new()),
            in_flight,
        }
    }

    /// Session this ledger belongs to.
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Register a tracker that is about to start.
    pub fn begin(self: &Arc<Self>) -> TrackerTicket {
        self.in_flight.send_modify(|n| *n += 1);
        TrackerTicket {
            ledger: Arc::clone(self),
        }
    }

    pub fn append(&self, record: RecoveryRecord) {
        self.records.lock().push(record);
    }

    /// Copy of the records appended so far.
    pub fn snapshot(&self) -> Vec<RecoveryRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Trackers that have started but not finished.
    pub fn pending(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Wait until no tracker is in flight.
    pub async fn wait_idle(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender lives as long as `self`, so this cannot fail
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    fn release(&self) {
        self.in_flight.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// Handle held by one running tracker.
///
/// Dropping the ticket without completing it (a panicked tracker task)
/// still releases its in-flight slot.
#[must_use = "a dropped ticket releases its tracker slot immediately"]
pub struct TrackerTicket {
    ledger: Arc<RecoveryLedger>,
}

impl TrackerTicket {
    /// Record the tracker's result and release its slot.
    pub fn complete(self, record: RecoveryRecord) {
        self.ledger.append(record);
    }
}

impl Drop for TrackerTicket {
    fn drop(&mut self) {
        self.ledger.release();
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
