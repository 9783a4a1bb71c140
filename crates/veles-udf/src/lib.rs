//! Veles client UDF plumbing.
//!
//! Everything one user-defined-function invocation needs around the value
//! model: a [`Stream`] conduit over values, in-memory source/sink adapters,
//! the borrowed [`UdfContext`] service bundle, and the collaborator handle
//! traits ([`Environment`], [`MemTracker`], [`Timer`]) the embedding engine
//! supplies. All of it is synchronous; blocking belongs to the concrete
//! source behind a stream, never to this crate.

pub mod context;
pub mod env;
pub mod limits;
pub mod memtracker;
pub mod source;
pub mod stream;
pub mod timer;

pub use context::{ContextHooks, UdfContext};
pub use env::{Environment, TracingEnvironment};
pub use limits::UdfLimits;
pub use memtracker::{AllocationFailure, MemTracker, QuotaTracker};
pub use source::{MemorySink, MemorySource, NullSource, StreamSource};
pub use stream::{Stream, StreamError, StreamItem};
pub use timer::{DeadlineTimer, Timer};
