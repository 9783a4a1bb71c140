//! The service bundle handed to one UDF invocation.
//!
//! A [`UdfContext`] borrows the three collaborators a running function needs
//! — the database-side host, the memory tracker, the deadline timer — and
//! owns none of them. Its lifetime is one invocation; the referents are
//! released by their own owners afterwards.

use tracing::debug;

use crate::env::Environment;
use crate::memtracker::MemTracker;
use crate::timer::Timer;

/// Accessor indirection for embeddings that virtualize context construction,
/// e.g. a test harness substituting instrumented collaborators without the
/// consuming code noticing.
pub trait ContextHooks: Send + Sync {
    fn environment(&self) -> &dyn Environment;
    fn memtracker(&self) -> &dyn MemTracker;
    fn timer(&self) -> &dyn Timer;
}

/// Borrowed collaborator bundle for one UDF invocation.
///
/// Accessors return the identical referent for the whole invocation; no
/// rebinding API exists.
pub struct UdfContext<'a> {
    env: &'a dyn Environment,
    memtracker: &'a dyn MemTracker,
    timer: &'a dyn Timer,
    hooks: Option<&'a dyn ContextHooks>,
}

impl<'a> UdfContext<'a> {
    pub fn new(
        env: &'a dyn Environment,
        memtracker: &'a dyn MemTracker,
        timer: &'a dyn Timer,
    ) -> Self {
        debug!("udf context created");
        Self {
            env,
            memtracker,
            timer,
            hooks: None,
        }
    }

    /// Like [`UdfContext::new`], but every accessor dispatches through
    /// `hooks` instead of the stored references.
    pub fn with_hooks(
        env: &'a dyn Environment,
        memtracker: &'a dyn MemTracker,
        timer: &'a dyn Timer,
        hooks: &'a dyn ContextHooks,
    ) -> Self {
        debug!("udf context created with accessor hooks");
        Self {
            env,
            memtracker,
            timer,
            hooks: Some(hooks),
        }
    }

    pub fn environment(&self) -> &'a dyn Environment {
        match self.hooks {
            Some(hooks) => hooks.environment(),
            None => self.env,
        }
    }

    pub fn memtracker(&self) -> &'a dyn MemTracker {
        match self.hooks {
            Some(hooks) => hooks.memtracker(),
            None => self.memtracker,
        }
    }

    pub fn timer(&self) -> &'a dyn Timer {
        match self.hooks {
            Some(hooks) => hooks.timer(),
            None => self.timer,
        }
    }
}
