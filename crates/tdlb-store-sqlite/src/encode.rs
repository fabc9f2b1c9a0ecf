//! Encoding and decoding helpers between domain types and the plain
//! representations stored in SQLite columns.
//!
//! Dates are stored as `YYYY-MM-DD` strings, booleans as 0/1 integers, and
//! list-valued columns (PubMed ids, years) as compact JSON arrays.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::types::Value;
use tdlb_core::{
  activity::{CmpdActivity, DrugActivity},
  annotation::{InfoValue, TdlInfo, ValueKind},
  assoc::GeneRif,
  store::ColumnValue,
  target::Target,
};

use crate::{Error, Result};

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::Decode(format!("bad date {s:?}: {e}")))
}

// ─── JSON list columns ───────────────────────────────────────────────────────

pub fn encode_i64_list(ids: &[i64]) -> Result<String> {
  Ok(serde_json::to_string(ids)?)
}

pub fn decode_i64_list(s: &str) -> Result<Vec<i64>> {
  Ok(serde_json::from_str(s)?)
}

pub fn encode_i32_list(years: &[i32]) -> Result<String> {
  Ok(serde_json::to_string(years)?)
}

pub fn decode_i32_list(s: &str) -> Result<Vec<i32>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Parameter values ────────────────────────────────────────────────────────

/// Collapse an [`InfoValue`] to the single SQL value written into the column
/// its annotation type selects.
pub fn encode_info_value(value: &InfoValue) -> Value {
  match value {
    InfoValue::String(s) => Value::Text(s.clone()),
    InfoValue::Integer(i) => Value::Integer(*i),
    InfoValue::Number(n) => Value::Real(*n),
    InfoValue::Boolean(b) => Value::Integer(i64::from(*b)),
    InfoValue::Date(d) => Value::Text(encode_date(*d)),
  }
}

pub fn encode_column_value(value: ColumnValue) -> Value {
  match value {
    ColumnValue::Text(s) => Value::Text(s),
    ColumnValue::Integer(i) => Value::Integer(i),
    ColumnValue::Real(r) => Value::Real(r),
    ColumnValue::Null => Value::Null,
  }
}

// ─── Row mappers ─────────────────────────────────────────────────────────────

/// Column list for the base target row; keep in sync with
/// [`target_from_row`].
pub const TARGET_COLS: &str =
  "id, name, description, uniprot, up_version, geneid, sym, family, chr, \
   seq, stringid, tdl";

pub fn target_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Target> {
  Ok(Target {
    id:          row.get(0)?,
    name:        row.get(1)?,
    description: row.get(2)?,
    uniprot:     row.get(3)?,
    up_version:  row.get(4)?,
    geneid:      row.get(5)?,
    sym:         row.get(6)?,
    family:      row.get(7)?,
    chr:         row.get(8)?,
    seq:         row.get(9)?,
    stringid:    row.get(10)?,
    tdl:         row.get(11)?,
    ..Target::default()
  })
}

pub fn drug_activity_from_row(
  row: &rusqlite::Row<'_>,
) -> rusqlite::Result<DrugActivity> {
  Ok(DrugActivity {
    id:               row.get(0)?,
    target_id:        row.get(1)?,
    drug:             row.get(2)?,
    dcid:             row.get(3)?,
    has_moa:          row.get(4)?,
    act_value:        row.get(5)?,
    act_type:         row.get(6)?,
    action_type:      row.get(7)?,
    source:           row.get(8)?,
    reference:        row.get(9)?,
    smiles:           row.get(10)?,
    cmpd_chemblid:    row.get(11)?,
    cmpd_pubchem_cid: row.get(12)?,
    nlm_drug_info:    row.get(13)?,
  })
}

/// Raw strings read from a `tdl_info` row; the annotation-type registry
/// decides which value column holds the payload.
pub struct RawTdlInfo {
  pub id:            i64,
  pub itype:         String,
  pub string_value:  Option<String>,
  pub integer_value: Option<i64>,
  pub number_value:  Option<f64>,
  pub boolean_value: Option<bool>,
  pub date_value:    Option<String>,
}

impl RawTdlInfo {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      itype:         row.get(1)?,
      string_value:  row.get(2)?,
      integer_value: row.get(3)?,
      number_value:  row.get(4)?,
      boolean_value: row.get(5)?,
      date_value:    row.get(6)?,
    })
  }

  /// Resolve the payload column through the registry and produce the
  /// `(annotation type, annotation)` map entry.
  pub fn into_entry(
    self,
    info_types: &BTreeMap<String, ValueKind>,
  ) -> Result<(String, TdlInfo)> {
    let kind = info_types
      .get(&self.itype)
      .copied()
      .ok_or_else(|| tdlb_core::Error::UnknownAnnotationType(self.itype.clone()))?;

    let missing =
      || Error::Decode(format!("tdl_info {}: NULL {} column", self.id, kind.column()));

    let value = match kind {
      ValueKind::String => InfoValue::String(self.string_value.ok_or_else(missing)?),
      ValueKind::Integer => {
        InfoValue::Integer(self.integer_value.ok_or_else(missing)?)
      }
      ValueKind::Number => InfoValue::Number(self.number_value.ok_or_else(missing)?),
      ValueKind::Boolean => {
        InfoValue::Boolean(self.boolean_value.ok_or_else(missing)?)
      }
      ValueKind::Date => {
        InfoValue::Date(decode_date(&self.date_value.ok_or_else(missing)?)?)
      }
    };

    Ok((self.itype, TdlInfo { id: self.id, value }))
  }
}

/// Raw strings read from a `generif` row.
pub struct RawGeneRif {
  pub id:         i64,
  pub text:       String,
  pub pubmed_ids: Option<String>,
  pub years:      Option<String>,
}

impl RawGeneRif {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      text:       row.get(1)?,
      pubmed_ids: row.get(2)?,
      years:      row.get(3)?,
    })
  }

  pub fn into_generif(self) -> Result<GeneRif> {
    Ok(GeneRif {
      id:         self.id,
      text:       self.text,
      pubmed_ids: self.pubmed_ids.as_deref().map(decode_i64_list).transpose()?,
      years:      self.years.as_deref().map(decode_i32_list).transpose()?,
    })
  }
}

/// Raw strings read from a `cmpd_activity` row.
pub struct RawCmpdActivity {
  pub id:               i64,
  pub target_id:        i64,
  pub catype:           String,
  pub cmpd_id_in_src:   String,
  pub cmpd_name_in_src: Option<String>,
  pub smiles:           Option<String>,
  pub act_value:        Option<f64>,
  pub act_type:         Option<String>,
  pub reference:        Option<String>,
  pub pubmed_ids:       Option<String>,
  pub cmpd_pubchem_cid: Option<i64>,
}

impl RawCmpdActivity {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:               row.get(0)?,
      target_id:        row.get(1)?,
      catype:           row.get(2)?,
      cmpd_id_in_src:   row.get(3)?,
      cmpd_name_in_src: row.get(4)?,
      smiles:           row.get(5)?,
      act_value:        row.get(6)?,
      act_type:         row.get(7)?,
      reference:        row.get(8)?,
      pubmed_ids:       row.get(9)?,
      cmpd_pubchem_cid: row.get(10)?,
    })
  }

  pub fn into_activity(self) -> Result<CmpdActivity> {
    Ok(CmpdActivity {
      id:               self.id,
      target_id:        self.target_id,
      catype:           self.catype,
      cmpd_id_in_src:   self.cmpd_id_in_src,
      cmpd_name_in_src: self.cmpd_name_in_src,
      smiles:           self.smiles,
      act_value:        self.act_value,
      act_type:         self.act_type,
      reference:        self.reference,
      pubmed_ids:       self.pubmed_ids.as_deref().map(decode_i64_list).transpose()?,
      cmpd_pubchem_cid: self.cmpd_pubchem_cid,
    })
  }
}
