//! Per-invocation memory accounting handle.
//!
//! The accounting policy lives with the embedding engine; this module only
//! defines the surface a running UDF reports through, plus [`QuotaTracker`],
//! a byte-quota implementation used in production defaults and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::warn;

use crate::limits::UdfLimits;

/// A reservation was denied by the invocation's memory tracker.
#[derive(Debug, Clone, Error)]
#[error("allocation of {requested} bytes denied by memory tracker")]
pub struct AllocationFailure {
    pub requested: u64,
}

/// Memory accounting handle supplied by the embedding engine.
///
/// Every reservation must be reported synchronously and released exactly
/// once; the tracker cannot detect what it is never told about.
pub trait MemTracker: Send + Sync {
    /// Reserves `bytes`, returning false on denial.
    fn reserve(&self, bytes: u64) -> bool;

    /// Returns `bytes` previously reserved. False if the tracker cannot
    /// account for them.
    fn release(&self, bytes: u64) -> bool;

    /// Reserves `bytes`, mapping denial to a reportable error.
    fn charge(&self, bytes: u64) -> Result<(), AllocationFailure> {
        if self.reserve(bytes) {
            Ok(())
        } else {
            Err(AllocationFailure { requested: bytes })
        }
    }
}

/// Atomic byte-quota tracker for one UDF invocation.
#[derive(Debug)]
pub struct QuotaTracker {
    quota: u64,
    used: AtomicU64,
}

impl QuotaTracker {
    pub fn new(quota: u64) -> Self {
        Self {
            quota,
            used: AtomicU64::new(0),
        }
    }

    pub fn from_limits(limits: &UdfLimits) -> Self {
        Self::new(limits.memory_quota_bytes)
    }

    /// A tracker that accounts but never denies.
    pub fn unbounded() -> Self {
        Self::new(u64::MAX)
    }

    pub fn used(&self) -> u64 {
        self.used.load(Ordering::Relaxed)
    }
}

impl MemTracker for QuotaTracker {
    fn reserve(&self, bytes: u64) -> bool {
        let granted = self
            .used
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |used| {
                used.checked_add(bytes).filter(|&total| total <= self.quota)
            })
            .is_ok();
        if !granted {
            warn!(
                requested = bytes,
                used = self.used(),
                quota = self.quota,
                "memory reservation denied"
            );
        }
        granted
    }

    fn release(&self, bytes: u64) -> bool {
        self.used
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |used| {
                used.checked_sub(bytes)
            })
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_within_quota() {
        let tracker = QuotaTracker::new(100);
        assert!(tracker.reserve(60));
        assert!(tracker.reserve(40));
        assert_eq!(tracker.used(), 100);
    }

    #[test]
    fn test_reserve_over_quota_denied() {
        let tracker = QuotaTracker::new(100);
        assert!(tracker.reserve(80));
        assert!(!tracker.reserve(21));
        // The failed reservation left the accounting untouched.
        assert_eq!(tracker.used(), 80);
    }

    #[test]
    fn test_release_returns_bytes() {
        let tracker = QuotaTracker::new(100);
        assert!(tracker.reserve(100));
        assert!(tracker.release(50));
        assert!(tracker.reserve(50));
    }

    #[test]
    fn test_release_more_than_reserved_fails() {
        let tracker = QuotaTracker::new(100);
        assert!(tracker.reserve(10));
        assert!(!tracker.release(20));
        assert_eq!(tracker.used(), 10);
    }

    #[test]
    fn test_unbounded_tracker_accounts_but_never_denies() {
        let tracker = QuotaTracker::unbounded();
        assert!(tracker.reserve(u64::MAX / 2));
        assert!(tracker.reserve(u64::MAX / 2));
        assert!(tracker.used() >= u64::MAX - 1);
    }

    #[test]
    fn test_charge_maps_denial_to_error() {
        let tracker = QuotaTracker::new(10);
        assert!(tracker.charge(10).is_ok());
        let err = tracker.charge(1).unwrap_err();
        assert_eq!(err.requested, 1);
    }
}
