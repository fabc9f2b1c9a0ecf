//! Target — the root biological entity (a protein / gene product).
//!
//! A target row carries the identity columns; everything else hangs off it
//! in child tables and is reassembled on read into the same nested shape the
//! write cascade consumed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  activity::{CmpdActivity, DrugActivity},
  annotation::{NewTdlInfo, TdlInfo},
  assoc::{GeneRif, Goa, NewGoa, PmScore},
  xref::{Alias, NewAlias, NewXref, Xref},
  Error, Result,
};

// ─── NewTarget ───────────────────────────────────────────────────────────────

/// The nested insert shape consumed by the write cascade. Child collections
/// are written in the order they are declared here, each with the generated
/// target id injected as its foreign key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTarget {
  pub name:        String,
  pub description: String,
  /// Primary UniProt accession.
  pub uniprot:     String,
  pub up_version:  Option<i32>,
  pub geneid:      Option<i64>,
  pub sym:         Option<String>,
  pub family:      Option<String>,
  pub chr:         Option<String>,
  pub seq:         Option<String>,
  pub stringid:    Option<String>,

  #[serde(default)]
  pub aliases:   Vec<NewAlias>,
  #[serde(default)]
  pub xrefs:     Vec<NewXref>,
  #[serde(default)]
  pub tdl_infos: Vec<NewTdlInfo>,
  #[serde(default)]
  pub goas:      Vec<NewGoa>,
}

impl NewTarget {
  pub fn new(
    name: impl Into<String>,
    description: impl Into<String>,
    uniprot: impl Into<String>,
  ) -> Self {
    Self {
      name: name.into(),
      description: description.into(),
      uniprot: uniprot.into(),
      ..Self::default()
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.name.is_empty() {
      return Err(Error::MissingField { entity: "target", field: "name" });
    }
    if self.description.is_empty() {
      return Err(Error::MissingField { entity: "target", field: "description" });
    }
    if self.uniprot.is_empty() {
      return Err(Error::MissingField { entity: "target", field: "uniprot" });
    }
    Ok(())
  }
}

// ─── Target ──────────────────────────────────────────────────────────────────

/// The reconstructed nested shape. Child collections are `None` both when
/// they were not requested (`annot = false`) and when they are empty —
/// callers must treat "absent" and "empty" as equivalent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Target {
  pub id:          i64,
  pub name:        String,
  pub description: String,
  pub uniprot:     String,
  pub up_version:  Option<i32>,
  pub geneid:      Option<i64>,
  pub sym:         Option<String>,
  pub family:      Option<String>,
  pub chr:         Option<String>,
  pub seq:         Option<String>,
  pub stringid:    Option<String>,
  /// Derived target development level; computed downstream, nullable here.
  pub tdl:         Option<String>,

  /// Annotations keyed by annotation type.
  pub tdl_infos:       Option<BTreeMap<String, TdlInfo>>,
  pub aliases:         Option<Vec<Alias>>,
  /// Cross-references grouped by reference type.
  pub xrefs:           Option<BTreeMap<String, Vec<Xref>>>,
  pub goas:            Option<Vec<Goa>>,
  pub generifs:        Option<Vec<GeneRif>>,
  pub pmscores:        Option<Vec<PmScore>>,
  pub drug_activities: Option<Vec<DrugActivity>>,
  pub cmpd_activities: Option<Vec<CmpdActivity>>,
}

// ─── TDL-calculation projection ──────────────────────────────────────────────

/// The narrow projection handed to the downstream TDL classification: only
/// the fields that computation reads, traded against fewer round trips than
/// a full reconstruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdlCalcData {
  /// Base target row; child collections are not populated here.
  pub target:          Target,
  /// 'JensenLab PubMed Score' annotation value, if recorded.
  pub pubmed_score:    Option<f64>,
  /// 'Ab Count' annotation value, if recorded.
  pub ab_count:        Option<i64>,
  /// 'Experimental MF/BP Leaf Term GOA' annotation rows.
  pub efl_goas:        Vec<TdlInfo>,
  pub generifs:        Vec<GeneRif>,
  pub drug_activities: Vec<DrugActivity>,
  pub cmpd_activities: Vec<CmpdActivity>,
}
