//! Veles client core - the runtime value model used by the UDF execution path.
//!
//! This crate defines the polymorphic [`Value`] representation shared by the
//! client's user-defined-function plumbing. Every concrete variant carries a
//! [`Tag`] and binds one static [`Capabilities`] table; dispatch keys off the
//! tag, never off per-instance function pointers.

pub mod boolean;
pub mod error;
pub mod value;

pub use boolean::Boolean;
pub use error::TypeMismatch;
pub use value::{capabilities, Capabilities, Tag, Value};
