//! Compound and drug activity records — measured or curated activities of a
//! chemical entity against a target.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Compound activity ───────────────────────────────────────────────────────

/// Insert shape for one compound activity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCmpdActivity {
  /// Source catalog, e.g. `"ChEMBL"` or `"Guide to Pharmacology"`.
  pub catype:           String,
  pub cmpd_id_in_src:   String,
  pub cmpd_name_in_src: Option<String>,
  pub smiles:           Option<String>,
  pub act_value:        Option<f64>,
  pub act_type:         Option<String>,
  pub reference:        Option<String>,
  pub pubmed_ids:       Option<Vec<i64>>,
  pub cmpd_pubchem_cid: Option<i64>,
}

impl NewCmpdActivity {
  pub fn validate(&self) -> Result<()> {
    if self.catype.is_empty() {
      return Err(Error::MissingField { entity: "cmpd_activity", field: "catype" });
    }
    if self.cmpd_id_in_src.is_empty() {
      return Err(Error::MissingField {
        entity: "cmpd_activity",
        field:  "cmpd_id_in_src",
      });
    }
    Ok(())
  }
}

/// One reconstructed compound activity row. Carries its owning target id so
/// the table-wide dumps used by the ETL pipelines stay self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmpdActivity {
  pub id:               i64,
  pub target_id:        i64,
  pub catype:           String,
  pub cmpd_id_in_src:   String,
  pub cmpd_name_in_src: Option<String>,
  pub smiles:           Option<String>,
  pub act_value:        Option<f64>,
  pub act_type:         Option<String>,
  pub reference:        Option<String>,
  pub pubmed_ids:       Option<Vec<i64>>,
  pub cmpd_pubchem_cid: Option<i64>,
}

// ─── Drug activity ───────────────────────────────────────────────────────────

/// Insert shape for one approved-drug activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDrugActivity {
  pub drug:             String,
  /// DrugCentral identifier.
  pub dcid:             i64,
  /// Whether this drug acts through this target's mechanism of action.
  pub has_moa:          bool,
  pub act_value:        Option<f64>,
  pub act_type:         Option<String>,
  pub action_type:      Option<String>,
  pub source:           Option<String>,
  pub reference:        Option<String>,
  pub smiles:           Option<String>,
  pub cmpd_chemblid:    Option<String>,
  pub cmpd_pubchem_cid: Option<i64>,
  pub nlm_drug_info:    Option<String>,
}

impl NewDrugActivity {
  pub fn new(drug: impl Into<String>, dcid: i64, has_moa: bool) -> Self {
    Self {
      drug: drug.into(),
      dcid,
      has_moa,
      act_value: None,
      act_type: None,
      action_type: None,
      source: None,
      reference: None,
      smiles: None,
      cmpd_chemblid: None,
      cmpd_pubchem_cid: None,
      nlm_drug_info: None,
    }
  }

  pub fn validate(&self) -> Result<()> {
    if self.drug.is_empty() {
      return Err(Error::MissingField { entity: "drug_activity", field: "drug" });
    }
    Ok(())
  }
}

/// One reconstructed drug activity row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugActivity {
  pub id:               i64,
  pub target_id:        i64,
  pub drug:             String,
  pub dcid:             i64,
  pub has_moa:          bool,
  pub act_value:        Option<f64>,
  pub act_type:         Option<String>,
  pub action_type:      Option<String>,
  pub source:           Option<String>,
  pub reference:        Option<String>,
  pub smiles:           Option<String>,
  pub cmpd_chemblid:    Option<String>,
  pub cmpd_pubchem_cid: Option<i64>,
  pub nlm_drug_info:    Option<String>,
}
