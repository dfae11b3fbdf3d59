// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Process-wide "is the user logged in" flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared login flag.
///
/// Single writer (the bridge handler on `ROUTE_CHANGE`, from whatever thread
/// delivers the message), many readers (menu gate, layout). Clones share the
/// same flag.
#[derive(Debug, Clone)]
pub struct LoginState(Arc<AtomicBool>);

impl LoginState {
    /// Starts out logged in. The first `ROUTE_CHANGE` overwrites it, so the
    /// menu is briefly visible on a cold start before the page reports in.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    pub fn is_logged_in(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, logged_in: bool) {
        self.0.store(logged_in, Ordering::Release);
    }
}

impl Default for LoginState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_logged_in() {
        assert!(LoginState::new().is_logged_in());
    }

    #[test]
    fn clones_share_the_flag() {
        let a = LoginState::new();
        let b = a.clone();
        a.set(false);
        assert!(!b.is_logged_in());
        b.set(true);
        assert!(a.is_logged_in());
    }
}
