// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// File selection coordinator for `<input type="file">`.
//
// State machine:
//
//   Idle --activation--> AwaitingResult --result | launch failure--> Idle
//
// At most one request is pending. A new activation replaces the stored
// completion handle without resolving the old one (last request wins). There
// is no timeout: an abandoned picker keeps the slot until superseded or until
// a late result arrives.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use webshell_core::ResourceLocator;

use crate::traits::{CompletionHandle, FileChooser, PickerRequest};

/// The in-flight file request.
struct PendingFileRequest {
    /// Log correlation only; never shown to the page.
    id: Uuid,
    handle: CompletionHandle,
}

/// Owns the single pending-request slot and reconciles picker results.
pub struct FileSelectionCoordinator {
    chooser: Arc<dyn FileChooser>,
    pending: Mutex<Option<PendingFileRequest>>,
}

impl FileSelectionCoordinator {
    pub fn new(chooser: Arc<dyn FileChooser>) -> Self {
        Self {
            chooser,
            pending: Mutex::new(None),
        }
    }

    /// Whether a request is waiting for the picker.
    pub fn is_awaiting_result(&self) -> bool {
        self.slot().is_some()
    }

    /// Store `handle` and open the native picker.
    ///
    /// Returns `false` when the picker could not be shown; in that case
    /// `handle` has already been resolved with "no selection".
    #[instrument(skip_all)]
    pub fn on_file_input_activated(&self, handle: CompletionHandle) -> bool {
        let id = Uuid::new_v4();
        {
            let mut slot = self.slot();
            if let Some(stale) = slot.replace(PendingFileRequest { id, handle }) {
                debug!(request_id = %stale.id, "superseded pending file request dropped unresolved");
            }
        }

        // The lock is not held while launching: a platform may deliver the
        // result synchronously from inside `launch_picker`.
        match self.chooser.launch_picker(&PickerRequest::any_single()) {
            Ok(()) => {
                info!(request_id = %id, "file picker launched");
                true
            }
            Err(e) => {
                error!(request_id = %id, error = %e, "file picker launch failed");
                // Only clear the slot if it still holds our request.
                let ours = {
                    let mut slot = self.slot();
                    match slot.as_ref() {
                        Some(p) if p.id == id => slot.take(),
                        _ => None,
                    }
                };
                if let Some(request) = ours {
                    (request.handle)(None);
                }
                false
            }
        }
    }

    /// Deliver the picker outcome to the pending request, if any.
    ///
    /// `None` is a cancellation. A result with nothing pending is a stale or
    /// duplicate delivery and is ignored.
    #[instrument(skip_all, fields(selected = selected.is_some()))]
    pub fn on_pick_result(&self, selected: Option<ResourceLocator>) {
        let Some(request) = self.slot().take() else {
            warn!("file picker result with no pending request ignored");
            return;
        };

        match selected {
            Some(locator) => {
                info!(request_id = %request.id, %locator, "file selected");
                (request.handle)(Some(vec![locator]));
            }
            None => {
                info!(request_id = %request.id, "file selection cancelled");
                (request.handle)(None);
            }
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<PendingFileRequest>> {
        // A panicking completion handle never runs under this lock, so a
        // poisoned slot still holds consistent data.
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
