//! Aliases and cross-references — external identifiers attached to a target.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Alias ───────────────────────────────────────────────────────────────────

/// Insert shape for one alias. The alias type is an open string; the loaders
/// currently write `"symbol"` and `"uniprot"` entries, which is what the
/// alias-union search relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlias {
  pub atype: String,
  pub value: String,
}

impl NewAlias {
  pub fn new(atype: impl Into<String>, value: impl Into<String>) -> Self {
    Self { atype: atype.into(), value: value.into() }
  }

  pub fn validate(&self) -> Result<()> {
    if self.atype.is_empty() {
      return Err(Error::MissingField { entity: "alias", field: "atype" });
    }
    if self.value.is_empty() {
      return Err(Error::MissingField { entity: "alias", field: "value" });
    }
    Ok(())
  }
}

/// One reconstructed alias row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alias {
  pub id:    i64,
  pub atype: String,
  pub value: String,
}

// ─── Cross-reference ─────────────────────────────────────────────────────────

/// Insert shape for one cross-reference. The reference type is drawn from,
/// but not restricted to, the cross-reference-type registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewXref {
  pub xtype: String,
  pub value: String,
  pub xtra:  Option<String>,
}

impl NewXref {
  pub fn new(xtype: impl Into<String>, value: impl Into<String>) -> Self {
    Self { xtype: xtype.into(), value: value.into(), xtra: None }
  }

  pub fn validate(&self) -> Result<()> {
    if self.xtype.is_empty() {
      return Err(Error::MissingField { entity: "xref", field: "xtype" });
    }
    if self.value.is_empty() {
      return Err(Error::MissingField { entity: "xref", field: "value" });
    }
    Ok(())
  }
}

/// One reconstructed cross-reference row; grouped by type on the parent
/// [`Target`](crate::target::Target).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Xref {
  pub id:    i64,
  pub value: String,
  pub xtra:  Option<String>,
}

/// Outcome of a cross-reference write. The store enforces a uniqueness
/// constraint on `(target, type, value)`; a rejected duplicate is a
/// documented no-op, never a failure, and never aborts a surrounding cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrefOutcome {
  Inserted,
  DuplicateIgnored,
}
