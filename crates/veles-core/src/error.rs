//! Value model error types

use thiserror::Error;

use crate::value::{Tag, Value};

/// Dispatch reached a value whose runtime tag disagrees with the variant the
/// call site expected.
///
/// The value is handed back un-freed in `value`: a rejected dispatch never
/// releases or corrupts the payload.
#[derive(Debug, Error)]
#[error("type mismatch: expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: Tag,
    pub found: Tag,
    pub value: Value,
}
