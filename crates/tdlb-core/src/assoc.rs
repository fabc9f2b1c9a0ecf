//! Gene-ontology associations, GeneRIF literature references, and per-year
//! PubMed scores.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Gene-ontology association ───────────────────────────────────────────────

/// Insert shape for one GO association.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGoa {
  pub go_id:       String,
  pub go_term:     Option<String>,
  pub evidence:    Option<String>,
  /// Evidence & Conclusion Ontology code backing `evidence`.
  pub goeco:       Option<String>,
  pub assigned_by: Option<String>,
}

impl NewGoa {
  pub fn new(go_id: impl Into<String>) -> Self {
    Self { go_id: go_id.into(), ..Self::default() }
  }

  pub fn validate(&self) -> Result<()> {
    if self.go_id.is_empty() {
      return Err(Error::MissingField { entity: "goa", field: "go_id" });
    }
    Ok(())
  }
}

/// One reconstructed GO association row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goa {
  pub id:          i64,
  pub go_id:       String,
  pub go_term:     Option<String>,
  pub evidence:    Option<String>,
  pub goeco:       Option<String>,
  pub assigned_by: Option<String>,
}

// ─── GeneRIF ─────────────────────────────────────────────────────────────────

/// Insert shape for one GeneRIF (literature reference with free text).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewGeneRif {
  pub text:       String,
  pub pubmed_ids: Option<Vec<i64>>,
  pub years:      Option<Vec<i32>>,
}

impl NewGeneRif {
  pub fn validate(&self) -> Result<()> {
    if self.text.is_empty() {
      return Err(Error::MissingField { entity: "generif", field: "text" });
    }
    Ok(())
  }
}

/// One reconstructed GeneRIF row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneRif {
  pub id:         i64,
  pub text:       String,
  pub pubmed_ids: Option<Vec<i64>>,
  pub years:      Option<Vec<i32>>,
}

// ─── PubMed score ────────────────────────────────────────────────────────────

/// Insert shape for one per-year text-mined publication score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPmScore {
  pub year:  i32,
  pub score: f64,
}

/// One reconstructed PubMed score row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmScore {
  pub id:    i64,
  pub year:  i32,
  pub score: f64,
}
