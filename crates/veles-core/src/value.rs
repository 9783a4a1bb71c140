//! Tag-dispatched runtime values.
//!
//! A [`Value`] is a heap-owned payload plus a [`Tag`]. Operations on a value
//! (`hash`, `to_text`, `destroy`) look up the variant's static
//! [`Capabilities`] table by tag and dispatch through its hooks. The table is
//! bound once per variant, so instances stay minimal: one tag, one boxed
//! payload, no embedded function pointers.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

use crate::boolean;
use crate::error::TypeMismatch;

/// Discriminant identifying a value's variant.
///
/// The tag space covers the client's full catalogue, but only [`Tag::Boolean`]
/// has a registered capability table in this crate. Dispatch against a tag
/// without a table degrades to the documented defaults (`hash` = 0, `to_text`
/// = `None`) instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Nil,
    Boolean,
    Integer,
    String,
    List,
    Map,
}

impl Tag {
    pub fn type_name(&self) -> &'static str {
        match self {
            Tag::Nil => "nil",
            Tag::Boolean => "boolean",
            Tag::Integer => "integer",
            Tag::String => "string",
            Tag::List => "list",
            Tag::Map => "map",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Per-variant capability table.
///
/// One `'static` table exists per registered variant. `hash` and `tostring`
/// are independently optional; `free` is always bound for a registered tag.
pub struct Capabilities {
    /// Byte footprint of one instance of the variant's payload.
    pub size: usize,
    /// Releases the payload's storage. Invoked exactly once, by
    /// [`Value::free`] or a successful [`Value::destroy`].
    pub free: fn(Box<dyn Any + Send>),
    /// Bucket-placement hash. Absent hooks degrade to `0` at dispatch.
    pub hash: Option<fn(&dyn Any) -> u32>,
    /// Fresh, caller-owned textual rendering. `None` when the payload does
    /// not match the variant.
    pub tostring: Option<fn(&dyn Any) -> Option<String>>,
}

/// Capability table lookup for `tag`.
///
/// Returns `None` for tags whose variant is not registered here; adding a
/// variant means adding one arm and one static table, nothing else changes.
pub fn capabilities(tag: Tag) -> Option<&'static Capabilities> {
    match tag {
        Tag::Boolean => Some(&boolean::CAPS),
        _ => None,
    }
}

/// A polymorphic runtime value.
///
/// Values are always heap-owned after construction and move-only: releasing
/// one consumes it, so a double release is a compile error rather than
/// undefined behavior. Dropping a value without going through [`Value::free`]
/// still releases the payload.
pub struct Value {
    tag: Tag,
    payload: Box<dyn Any + Send>,
}

impl Value {
    /// Assembles a value from a tag and its boxed payload.
    ///
    /// Callers must pair the tag with a payload of the matching variant type;
    /// a mismatched pair makes every capability hook degrade to its default.
    pub fn from_parts(tag: Tag, payload: Box<dyn Any + Send>) -> Self {
        Self { tag, payload }
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Byte footprint of the concrete instance, or 0 when the tag has no
    /// registered table.
    pub fn size(&self) -> usize {
        capabilities(self.tag).map_or(0, |caps| caps.size)
    }

    /// Borrows the payload as its concrete variant type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Dispatches the variant's `hash` hook.
    ///
    /// Unregistered tags and variants without a hash hook return `0`; callers
    /// must tolerate collisions across such values.
    pub fn hash(&self) -> u32 {
        capabilities(self.tag)
            .and_then(|caps| caps.hash)
            .map_or(0, |hook| hook(self.payload.as_ref()))
    }

    /// Dispatches the variant's `tostring` hook.
    ///
    /// Returns a fresh owned string, or `None` when the variant does not
    /// support textual rendering.
    pub fn to_text(&self) -> Option<String> {
        capabilities(self.tag)
            .and_then(|caps| caps.tostring)
            .and_then(|hook| hook(self.payload.as_ref()))
    }

    /// Releases the value through its variant's `free` hook, checking the
    /// caller's static variant assumption first.
    ///
    /// On a tag mismatch the value is handed back un-freed inside the error,
    /// so logic written for one variant can never release another variant's
    /// storage.
    pub fn destroy(self, expected: Tag) -> Result<(), TypeMismatch> {
        if self.tag != expected {
            return Err(TypeMismatch {
                expected,
                found: self.tag,
                value: self,
            });
        }
        self.free();
        Ok(())
    }

    /// Releases the value through its variant's `free` hook without a tag
    /// check.
    pub fn free(self) {
        match capabilities(self.tag) {
            Some(caps) => (caps.free)(self.payload),
            None => drop(self.payload),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(text) => f.write_str(&text),
            None => write!(f, "<{}>", self.tag),
        }
    }
}
