//! Typed annotations ("tdl_info") — key/value facts attached to a target.
//!
//! Each annotation type declares, in the `info_type` catalog, which of the
//! five value kinds it carries. The storage layer keeps one physical column
//! per kind; [`InfoValue`] is the in-memory tagged union that collapses to a
//! single column choice only at the write boundary.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Well-known annotation types ─────────────────────────────────────────────

/// Annotation types consumed by the downstream TDL classification.
pub const ITYPE_PUBMED_SCORE: &str = "JensenLab PubMed Score";
pub const ITYPE_AB_COUNT: &str = "Ab Count";
pub const ITYPE_EFL_GOA: &str = "Experimental MF/BP Leaf Term GOA";

// ─── ValueKind ───────────────────────────────────────────────────────────────

/// The declared kind of an annotation type; selects the storage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
  String,
  Integer,
  Number,
  Boolean,
  Date,
}

impl ValueKind {
  /// The `tdl_info` column holding values of this kind.
  pub fn column(self) -> &'static str {
    match self {
      Self::String => "string_value",
      Self::Integer => "integer_value",
      Self::Number => "number_value",
      Self::Boolean => "boolean_value",
      Self::Date => "date_value",
    }
  }

  /// Parse the `data_type` string stored in the `info_type` catalog.
  pub fn from_catalog(s: &str) -> Option<Self> {
    match s {
      "String" => Some(Self::String),
      "Integer" => Some(Self::Integer),
      "Number" => Some(Self::Number),
      "Boolean" => Some(Self::Boolean),
      "Date" => Some(Self::Date),
      _ => None,
    }
  }
}

impl fmt::Display for ValueKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Self::String => "String",
      Self::Integer => "Integer",
      Self::Number => "Number",
      Self::Boolean => "Boolean",
      Self::Date => "Date",
    };
    f.write_str(s)
  }
}

// ─── InfoValue ───────────────────────────────────────────────────────────────

/// The typed payload of one annotation row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InfoValue {
  String(String),
  Integer(i64),
  Number(f64),
  Boolean(bool),
  Date(NaiveDate),
}

impl InfoValue {
  pub fn kind(&self) -> ValueKind {
    match self {
      Self::String(_) => ValueKind::String,
      Self::Integer(_) => ValueKind::Integer,
      Self::Number(_) => ValueKind::Number,
      Self::Boolean(_) => ValueKind::Boolean,
      Self::Date(_) => ValueKind::Date,
    }
  }
}

// ─── Input / read shapes ─────────────────────────────────────────────────────

/// Insert shape for one annotation, mirroring the wire format handed over by
/// the upstream parsers: an annotation type plus five mutually-exclusive
/// optional value fields. Exactly one must be set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTdlInfo {
  pub itype:         String,
  pub string_value:  Option<String>,
  pub integer_value: Option<i64>,
  pub number_value:  Option<f64>,
  pub boolean_value: Option<bool>,
  pub date_value:    Option<NaiveDate>,
}

impl NewTdlInfo {
  pub fn string(itype: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      itype: itype.into(),
      string_value: Some(value.into()),
      ..Self::default()
    }
  }

  pub fn integer(itype: impl Into<String>, value: i64) -> Self {
    Self {
      itype: itype.into(),
      integer_value: Some(value),
      ..Self::default()
    }
  }

  pub fn number(itype: impl Into<String>, value: f64) -> Self {
    Self {
      itype: itype.into(),
      number_value: Some(value),
      ..Self::default()
    }
  }

  pub fn boolean(itype: impl Into<String>, value: bool) -> Self {
    Self {
      itype: itype.into(),
      boolean_value: Some(value),
      ..Self::default()
    }
  }

  pub fn date(itype: impl Into<String>, value: NaiveDate) -> Self {
    Self {
      itype: itype.into(),
      date_value: Some(value),
      ..Self::default()
    }
  }

  /// Collapse the five optional fields into one [`InfoValue`].
  ///
  /// Fails if the annotation type is empty, if no value field is set, or if
  /// more than one is set. No partial state is possible: this runs before
  /// any row is written.
  pub fn resolve_value(&self) -> Result<InfoValue> {
    if self.itype.is_empty() {
      return Err(Error::MissingField { entity: "tdl_info", field: "itype" });
    }

    let mut found: Option<InfoValue> = None;
    let candidates = [
      self.string_value.clone().map(InfoValue::String),
      self.integer_value.map(InfoValue::Integer),
      self.number_value.map(InfoValue::Number),
      self.boolean_value.map(InfoValue::Boolean),
      self.date_value.map(InfoValue::Date),
    ];
    for candidate in candidates.into_iter().flatten() {
      if found.is_some() {
        return Err(Error::MultipleAnnotationValues { itype: self.itype.clone() });
      }
      found = Some(candidate);
    }

    found.ok_or_else(|| Error::NoAnnotationValue { itype: self.itype.clone() })
  }
}

/// One reconstructed annotation row; keyed by annotation type on the parent
/// [`Target`](crate::target::Target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TdlInfo {
  pub id:    i64,
  pub value: InfoValue,
}
