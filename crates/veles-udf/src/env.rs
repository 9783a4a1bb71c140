//! Database-side execution host handle.
//!
//! The concrete host lives on the other side of the wire; a running UDF sees
//! only this narrow surface. Record operations belong to higher layers of the
//! client and are not part of this slice.

use tracing::{debug, error, info, trace, warn, Level};

/// Handle to the database-side execution host.
pub trait Environment: Send + Sync {
    /// Forwards a log line to the host.
    fn log(&self, level: Level, msg: &str);
}

/// Host handle that forwards log lines to the local `tracing` dispatcher.
/// Used where no live host connection exists, e.g. local UDF dry runs.
#[derive(Debug, Default)]
pub struct TracingEnvironment;

impl Environment for TracingEnvironment {
    fn log(&self, level: Level, msg: &str) {
        if level == Level::ERROR {
            error!(target: "veles::udf", "{msg}");
        } else if level == Level::WARN {
            warn!(target: "veles::udf", "{msg}");
        } else if level == Level::INFO {
            info!(target: "veles::udf", "{msg}");
        } else if level == Level::DEBUG {
            debug!(target: "veles::udf", "{msg}");
        } else {
            trace!(target: "veles::udf", "{msg}");
        }
    }
}
