//! Remote snapshots delivered through a channel.
//!
//! Whatever listens to the realtime document store pushes whole-document
//! snapshots into a [`SyncFeed`]; the owner of the [`AppState`] drains the feed
//! whenever it is ready. The conflict engine never sees the channel, only the
//! state it produces.

use std::sync::mpsc::{self, Receiver, Sender};

use serde_json::Value;

use crate::error::Result;
use crate::state::AppState;

/// A whole document as last seen on the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteSnapshot {
    /// The `schedules` document: date → day schedule.
    Schedules(Value),
    /// The `employees` document: `{ list, initialized }`.
    Employees(Value),
}

pub struct SyncFeed {
    tx: Sender<RemoteSnapshot>,
    rx: Receiver<RemoteSnapshot>,
}

impl Default for SyncFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncFeed {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// A handle for the listener side; may be moved to another thread.
    pub fn sender(&self) -> Sender<RemoteSnapshot> {
        self.tx.clone()
    }

    /// Apply every pending snapshot to `state`, oldest first.
    ///
    /// Returns how many snapshots were applied. Stops at the first snapshot
    /// that cannot be normalized; later ones stay queued.
    pub fn drain_into(&self, state: &mut AppState) -> Result<usize> {
        let mut applied = 0;
        for snapshot in self.rx.try_iter() {
            state.apply_remote(snapshot)?;
            applied += 1;
        }
        if applied > 0 {
            tracing::info!(applied, "applied remote snapshots");
        }
        Ok(applied)
    }
}
