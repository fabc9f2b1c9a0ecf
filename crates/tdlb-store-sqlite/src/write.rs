//! Row-level writers and the target write cascade.
//!
//! Every writer here takes a plain [`rusqlite::Connection`] reference, so it
//! runs equally inside a caller-owned transaction (the cascade) or inside
//! the single-statement transaction the public writer methods open. This is
//! how "commit deferred to the caller" is expressed: transaction ownership
//! stays with whoever opened it, and `rusqlite::Transaction` rolls back on
//! drop, so no failure path can leave a partial write behind.

use std::collections::BTreeMap;

use rusqlite::{params, params_from_iter, types::Value, Connection};
use tdlb_core::{
  activity::{NewCmpdActivity, NewDrugActivity},
  annotation::{NewTdlInfo, ValueKind},
  assoc::{NewGeneRif, NewGoa, NewPmScore},
  target::NewTarget,
  xref::{NewAlias, NewXref, XrefOutcome},
};
use tracing::{debug, warn};

use crate::{
  encode::{encode_i32_list, encode_i64_list, encode_info_value},
  Error, Result,
};

// ─── Cascade ─────────────────────────────────────────────────────────────────

/// Insert a target and all child collections present on the input, in one
/// transaction. Returns the generated target id. Any failure after the
/// target row is inserted rolls everything back, so no orphaned partial
/// target can exist; the one tolerated non-failure is a duplicate
/// cross-reference, which continues the cascade.
pub(crate) fn cascade(
  conn: &mut Connection,
  input: &NewTarget,
  info_types: &BTreeMap<String, ValueKind>,
) -> Result<i64> {
  let tx = conn.transaction()?;

  let target_id = insert_target_row(&tx, input)?;
  for alias in &input.aliases {
    insert_alias_row(&tx, target_id, alias)?;
  }
  for xref in &input.xrefs {
    insert_xref_row(&tx, target_id, xref)?;
  }
  for info in &input.tdl_infos {
    insert_tdl_info_row(&tx, info_types, target_id, info)?;
  }
  for goa in &input.goas {
    insert_goa_row(&tx, target_id, goa)?;
  }

  tx.commit()?;
  Ok(target_id)
}

// ─── Single rows ─────────────────────────────────────────────────────────────

pub(crate) fn insert_target_row(conn: &Connection, input: &NewTarget) -> Result<i64> {
  input.validate()?;

  let mut cols = vec!["name", "description", "uniprot"];
  let mut values: Vec<Value> = vec![
    input.name.clone().into(),
    input.description.clone().into(),
    input.uniprot.clone().into(),
  ];
  if let Some(v) = input.up_version {
    cols.push("up_version");
    values.push(v.into());
  }
  if let Some(v) = input.geneid {
    cols.push("geneid");
    values.push(v.into());
  }
  for (col, field) in [
    ("sym", &input.sym),
    ("family", &input.family),
    ("chr", &input.chr),
    ("seq", &input.seq),
    ("stringid", &input.stringid),
  ] {
    if let Some(v) = field {
      cols.push(col);
      values.push(v.clone().into());
    }
  }

  let placeholders: Vec<String> = (1..=cols.len()).map(|i| format!("?{i}")).collect();
  let sql = format!(
    "INSERT INTO target ({}) VALUES ({})",
    cols.join(", "),
    placeholders.join(", ")
  );
  debug!(sql = %sql, params = ?values, "inserting target row");

  let params_dbg = format!("{values:?}");
  conn
    .execute(&sql, params_from_iter(values))
    .map_err(|e| Error::statement(sql, params_dbg, e))?;
  Ok(conn.last_insert_rowid())
}

pub(crate) fn insert_alias_row(
  conn: &Connection,
  target_id: i64,
  input: &NewAlias,
) -> Result<()> {
  input.validate()?;

  const SQL: &str = "INSERT INTO alias (target_id, atype, value) VALUES (?1, ?2, ?3)";
  conn
    .execute(SQL, params![target_id, input.atype, input.value])
    .map_err(|e| {
      Error::statement(SQL, format!("({target_id}, {:?}, {:?})", input.atype, input.value), e)
    })?;
  Ok(())
}

pub(crate) fn insert_xref_row(
  conn: &Connection,
  target_id: i64,
  input: &NewXref,
) -> Result<XrefOutcome> {
  input.validate()?;

  // OR IGNORE against the (xtype, target_id, value) unique index: a
  // duplicate is a documented no-op, never a cascade-aborting failure.
  const SQL: &str =
    "INSERT OR IGNORE INTO xref (target_id, xtype, value, xtra) VALUES (?1, ?2, ?3, ?4)";
  let changed = conn
    .execute(SQL, params![target_id, input.xtype, input.value, input.xtra])
    .map_err(|e| {
      Error::statement(SQL, format!("({target_id}, {:?}, {:?})", input.xtype, input.value), e)
    })?;

  if changed == 0 {
    warn!(
      target_id,
      xtype = %input.xtype,
      value = %input.value,
      "duplicate xref ignored"
    );
    Ok(XrefOutcome::DuplicateIgnored)
  } else {
    Ok(XrefOutcome::Inserted)
  }
}

pub(crate) fn insert_tdl_info_row(
  conn: &Connection,
  info_types: &BTreeMap<String, ValueKind>,
  target_id: i64,
  input: &NewTdlInfo,
) -> Result<()> {
  let value = input.resolve_value()?;
  let declared = info_types
    .get(&input.itype)
    .copied()
    .ok_or_else(|| tdlb_core::Error::UnknownAnnotationType(input.itype.clone()))?;
  if value.kind() != declared {
    return Err(
      tdlb_core::Error::ValueKindMismatch {
        itype:    input.itype.clone(),
        expected: declared,
        got:      value.kind(),
      }
      .into(),
    );
  }

  // The registry collapses the tagged value to one physical column.
  let sql = format!(
    "INSERT INTO tdl_info (target_id, itype, {}) VALUES (?1, ?2, ?3)",
    declared.column()
  );
  let encoded = encode_info_value(&value);
  debug!(sql = %sql, target_id, itype = %input.itype, "inserting annotation");

  conn
    .execute(&sql, params![target_id, input.itype, encoded])
    .map_err(|e| {
      Error::statement(sql.clone(), format!("({target_id}, {:?}, {value:?})", input.itype), e)
    })?;
  Ok(())
}

pub(crate) fn insert_goa_row(
  conn: &Connection,
  target_id: i64,
  input: &NewGoa,
) -> Result<()> {
  input.validate()?;

  const SQL: &str = "INSERT INTO goa \
     (target_id, go_id, go_term, evidence, goeco, assigned_by) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
  conn
    .execute(
      SQL,
      params![
        target_id,
        input.go_id,
        input.go_term,
        input.evidence,
        input.goeco,
        input.assigned_by
      ],
    )
    .map_err(|e| {
      Error::statement(SQL, format!("({target_id}, {:?})", input.go_id), e)
    })?;
  Ok(())
}

pub(crate) fn insert_generif_row(
  conn: &Connection,
  target_id: i64,
  input: &NewGeneRif,
) -> Result<()> {
  input.validate()?;

  let pubmed_ids = input
    .pubmed_ids
    .as_deref()
    .map(encode_i64_list)
    .transpose()?;
  let years = input.years.as_deref().map(encode_i32_list).transpose()?;

  const SQL: &str =
    "INSERT INTO generif (target_id, text, pubmed_ids, years) VALUES (?1, ?2, ?3, ?4)";
  conn
    .execute(SQL, params![target_id, input.text, pubmed_ids, years])
    .map_err(|e| Error::statement(SQL, format!("({target_id}, {:?})", input.text), e))?;
  Ok(())
}

pub(crate) fn insert_pmscore_row(
  conn: &Connection,
  target_id: i64,
  input: &NewPmScore,
) -> Result<()> {
  const SQL: &str =
    "INSERT INTO pmscore (target_id, year, score) VALUES (?1, ?2, ?3)";
  conn
    .execute(SQL, params![target_id, input.year, input.score])
    .map_err(|e| {
      Error::statement(SQL, format!("({target_id}, {}, {})", input.year, input.score), e)
    })?;
  Ok(())
}

pub(crate) fn insert_drug_activity_row(
  conn: &Connection,
  target_id: i64,
  input: &NewDrugActivity,
) -> Result<()> {
  input.validate()?;

  const SQL: &str = "INSERT INTO drug_activity \
     (target_id, drug, dcid, has_moa, act_value, act_type, action_type, \
      source, reference, smiles, cmpd_chemblid, cmpd_pubchem_cid, nlm_drug_info) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
  conn
    .execute(
      SQL,
      params![
        target_id,
        input.drug,
        input.dcid,
        input.has_moa,
        input.act_value,
        input.act_type,
        input.action_type,
        input.source,
        input.reference,
        input.smiles,
        input.cmpd_chemblid,
        input.cmpd_pubchem_cid,
        input.nlm_drug_info
      ],
    )
    .map_err(|e| Error::statement(SQL, format!("({target_id}, {:?})", input.drug), e))?;
  Ok(())
}

pub(crate) fn insert_cmpd_activity_row(
  conn: &Connection,
  target_id: i64,
  input: &NewCmpdActivity,
) -> Result<()> {
  input.validate()?;

  let pubmed_ids = input
    .pubmed_ids
    .as_deref()
    .map(encode_i64_list)
    .transpose()?;

  const SQL: &str = "INSERT INTO cmpd_activity \
     (target_id, catype, cmpd_id_in_src, cmpd_name_in_src, smiles, act_value, \
      act_type, reference, pubmed_ids, cmpd_pubchem_cid) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
  conn
    .execute(
      SQL,
      params![
        target_id,
        input.catype,
        input.cmpd_id_in_src,
        input.cmpd_name_in_src,
        input.smiles,
        input.act_value,
        input.act_type,
        input.reference,
        pubmed_ids,
        input.cmpd_pubchem_cid
      ],
    )
    .map_err(|e| {
      Error::statement(SQL, format!("({target_id}, {:?})", input.cmpd_id_in_src), e)
    })?;
  Ok(())
}
