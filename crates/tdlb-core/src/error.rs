//! Error types for `tdlb-core`.
//!
//! Everything here is an input-validation failure: it is reported before any
//! store interaction is attempted. Store-level failures live in the backend
//! crate; a missing row is `None`, never an error.

use thiserror::Error;

use crate::annotation::ValueKind;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field was missing or empty on an insert record.
  #[error("{entity}: required field {field:?} missing or empty")]
  MissingField {
    entity: &'static str,
    field:  &'static str,
  },

  /// An annotation record supplied none of the typed value fields.
  #[error("annotation {itype:?} supplies no typed value")]
  NoAnnotationValue { itype: String },

  /// An annotation record supplied more than one typed value field.
  #[error("annotation {itype:?} supplies more than one typed value")]
  MultipleAnnotationValues { itype: String },

  /// The annotation type is not present in the annotation-type registry.
  #[error("unknown annotation type: {0:?}")]
  UnknownAnnotationType(String),

  /// The supplied value's kind does not match the registry's declared kind.
  #[error("annotation {itype:?} expects a {expected} value, got {got}")]
  ValueKindMismatch {
    itype:    String,
    expected: ValueKind,
    got:      ValueKind,
  },

  /// A bulk mutator was handed a table or column name that is not a plain
  /// SQL identifier.
  #[error("invalid identifier for bulk operation: {0:?}")]
  InvalidIdentifier(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
