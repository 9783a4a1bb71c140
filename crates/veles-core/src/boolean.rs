//! The boolean variant.
//!
//! The simplest member of the variant catalogue, and the template every other
//! variant follows: a payload struct, one static [`Capabilities`] table, and
//! hook functions that downcast before touching the payload.

use std::any::Any;

use crate::value::{Capabilities, Tag, Value};

/// Payload of a boolean value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boolean {
    pub value: bool,
}

impl Boolean {
    /// Allocates a new owned boolean value. Each call yields a distinct
    /// instance; booleans are never shared implicitly.
    pub fn new(value: bool) -> Value {
        Value::from_parts(Tag::Boolean, Box::new(Boolean { value }))
    }

    /// Reads the payload of a boolean value, `None` for any other variant.
    pub fn get(value: &Value) -> Option<bool> {
        value.downcast_ref::<Boolean>().map(|b| b.value)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Boolean::new(b)
    }
}

pub(crate) static CAPS: Capabilities = Capabilities {
    size: std::mem::size_of::<Boolean>(),
    free: free_hook,
    hash: Some(hash_hook),
    tostring: Some(tostring_hook),
};

fn free_hook(payload: Box<dyn Any + Send>) {
    drop(payload);
}

/// 1 for true, 0 for false. Bucket placement only, not cryptographic.
fn hash_hook(payload: &dyn Any) -> u32 {
    payload
        .downcast_ref::<Boolean>()
        .map_or(0, |b| u32::from(b.value))
}

fn tostring_hook(payload: &dyn Any) -> Option<String> {
    let b = payload.downcast_ref::<Boolean>()?;
    // Capacity covers the longer literal with a spare byte.
    let mut s = String::with_capacity(6);
    s.push_str(if b.value { "true" } else { "false" });
    Some(s)
}
