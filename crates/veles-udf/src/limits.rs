//! Resource limits for one UDF invocation.
//!
//! These defaults bound what a single invocation may consume. Embedders
//! override them through [`UdfLimits`], typically deserialized from the
//! client configuration file.

use serde::{Deserialize, Serialize};

/// Default per-invocation memory quota (8 MB).
pub const DEFAULT_MEMORY_QUOTA_BYTES: u64 = 8 * 1024 * 1024;

/// Default per-invocation execution budget (1 s).
pub const DEFAULT_EXECUTION_BUDGET_MS: u64 = 1_000;

/// Per-invocation resource limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UdfLimits {
    /// Bytes one invocation may hold reserved at a time.
    pub memory_quota_bytes: u64,
    /// Wall-clock budget for one invocation, in milliseconds.
    pub execution_budget_ms: u64,
}

impl Default for UdfLimits {
    fn default() -> Self {
        Self {
            memory_quota_bytes: DEFAULT_MEMORY_QUOTA_BYTES,
            execution_budget_ms: DEFAULT_EXECUTION_BUDGET_MS,
        }
    }
}
