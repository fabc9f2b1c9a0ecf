//! The `TargetStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `tdlb-store-sqlite`).
//! The loader pipelines and downstream consumers depend on this abstraction,
//! not on any concrete backend. It replaces the historical mixin composition
//! of create/read/update/delete method bundles with one capability interface.

use std::collections::BTreeMap;
use std::future::Future;

use crate::{
  activity::{CmpdActivity, DrugActivity, NewCmpdActivity, NewDrugActivity},
  annotation::{NewTdlInfo, ValueKind},
  assoc::{NewGeneRif, NewGoa, NewPmScore},
  target::{NewTarget, Target, TdlCalcData},
  xref::{NewAlias, NewXref, Xref, XrefOutcome},
  Error, Result,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Exactly one lookup criterion for [`TargetStore::find_target_ids`].
/// An unrecognized criterion is unrepresentable by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetCriterion {
  /// HGNC gene symbol. Honors the include-aliases flag.
  Symbol(String),
  /// Primary UniProt accession. Honors the include-aliases flag.
  Uniprot(String),
  /// Swiss-Prot entry name, e.g. `5HT1A_HUMAN`.
  Name(String),
  /// NCBI gene id.
  GeneId(i64),
  /// STRING identifier, e.g. `ENSP00000300161`.
  StringId(String),
}

/// A parameter value for the bulk mutators.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
  Text(String),
  Integer(i64),
  Real(f64),
  Null,
}

/// Check that a table or column name handed to a bulk mutator is a plain
/// SQL identifier. These names are interpolated into maintenance statements,
/// so anything else is rejected as invalid input.
pub fn validate_identifier(name: &str) -> Result<()> {
  let mut chars = name.chars();
  let head_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
  if head_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
    Ok(())
  } else {
    Err(Error::InvalidIdentifier(name.to_owned()))
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a TDLB target store backend.
///
/// One store owns one database session. Operations execute serially against
/// that session; callers that need throughput run multiple independent
/// stores, never share one across concurrent transactions.
///
/// All methods return `Send` futures so the trait can be used from
/// multi-threaded async runtimes.
pub trait TargetStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Write cascade ─────────────────────────────────────────────────────

  /// Insert a target and every child collection present on the input, all
  /// within one transaction. Any child failure rolls the whole cascade
  /// back — including the target row — except a duplicate cross-reference,
  /// which is a tolerated no-op. Returns the generated target id.
  fn insert_target(
    &self,
    input: NewTarget,
  ) -> impl Future<Output = Result<i64, Self::Error>> + Send + '_;

  // ── Single-row writers ────────────────────────────────────────────────

  fn insert_alias(
    &self,
    target_id: i64,
    input: NewAlias,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn insert_xref(
    &self,
    target_id: i64,
    input: NewXref,
  ) -> impl Future<Output = Result<XrefOutcome, Self::Error>> + Send + '_;

  /// Insert one annotation. The annotation type is resolved through the
  /// annotation-type registry to select the destination value column; an
  /// unknown type, a kind mismatch, or anything other than exactly one
  /// typed value on the input is rejected before any row is written.
  fn insert_tdl_info(
    &self,
    target_id: i64,
    input: NewTdlInfo,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn insert_goa(
    &self,
    target_id: i64,
    input: NewGoa,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn insert_generif(
    &self,
    target_id: i64,
    input: NewGeneRif,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn insert_pmscore(
    &self,
    target_id: i64,
    input: NewPmScore,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn insert_drug_activity(
    &self,
    target_id: i64,
    input: NewDrugActivity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn insert_cmpd_activity(
    &self,
    target_id: i64,
    input: NewCmpdActivity,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Read / reconstruct ────────────────────────────────────────────────

  /// Fetch a target by id. Returns `None` if absent. With `annot`, every
  /// child collection is fetched and reassembled; empty collections come
  /// back as `None`.
  fn get_target(
    &self,
    id: i64,
    annot: bool,
  ) -> impl Future<Output = Result<Option<Target>, Self::Error>> + Send + '_;

  /// Fetch only the fields the downstream TDL classification reads.
  fn get_target_for_tdl_calc(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<TdlCalcData>, Self::Error>> + Send + '_;

  /// All target ids, in id order.
  fn get_target_ids(
    &self,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + '_;

  /// Find target ids matching one criterion. For symbol and accession
  /// criteria, `incl_alias` additionally unions matches from the alias
  /// table; a target matching both ways appears exactly once. An empty
  /// result is an empty list, not an error.
  fn find_target_ids(
    &self,
    criterion: TargetCriterion,
    incl_alias: bool,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + '_;

  /// Find target ids owning a cross-reference of the given type and value.
  fn find_target_ids_by_xref<'a>(
    &'a self,
    xtype: &'a str,
    value: &'a str,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + 'a;

  /// Pfam, InterPro and PROSITE cross-references for one target, keyed by
  /// type. All three keys are always present, possibly with empty lists.
  fn get_domain_xrefs(
    &self,
    target_id: i64,
  ) -> impl Future<Output = Result<BTreeMap<String, Vec<Xref>>, Self::Error>> + Send + '_;

  /// Table-wide compound activity dump, optionally restricted to one
  /// source catalog.
  fn get_cmpd_activities<'a>(
    &'a self,
    catype: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<CmpdActivity>, Self::Error>> + Send + 'a;

  /// Table-wide drug activity dump.
  fn get_drug_activities(
    &self,
  ) -> impl Future<Output = Result<Vec<DrugActivity>, Self::Error>> + Send + '_;

  // ── Type registries ───────────────────────────────────────────────────

  /// The annotation-type registry: annotation type name to declared value
  /// kind, populated once from the `info_type` catalog and memoized for
  /// the life of the store.
  fn load_info_types(
    &self,
  ) -> impl Future<Output = Result<BTreeMap<String, ValueKind>, Self::Error>> + Send + '_;

  /// The cross-reference-type registry: distinct reference types observed
  /// in storage, populated once and memoized for the life of the store.
  fn load_xref_types(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Bulk mutators (maintenance only) ──────────────────────────────────

  /// Set one column of one row, by row id.
  fn set_column_by_id<'a>(
    &'a self,
    table: &'a str,
    column: &'a str,
    id: i64,
    value: ColumnValue,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Set a column to NULL on every row of a table (e.g. wiping computed
  /// TDL classifications before recomputation). Returns the row count.
  fn reset_column_for_all<'a>(
    &'a self,
    table: &'a str,
    column: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Delete rows matching one column predicate. Returns the row count.
  fn delete_where<'a>(
    &'a self,
    table: &'a str,
    column: &'a str,
    value: ColumnValue,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Wipe a table and reset its id sequence so a re-load starts from a
  /// clean numbering. A maintenance/reset operation, never part of normal
  /// load traffic. Returns the row count.
  fn delete_all_rows<'a>(
    &'a self,
    table: &'a str,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn identifier_accepts_plain_names() {
    for name in ["target", "tdl_info", "_tmp", "x1"] {
      assert!(validate_identifier(name).is_ok(), "{name}");
    }
  }

  #[test]
  fn identifier_rejects_injection_shapes() {
    for name in ["", "1target", "target; DROP TABLE x", "a-b", "a b", "t.\"c\""] {
      assert!(
        matches!(validate_identifier(name), Err(Error::InvalidIdentifier(_))),
        "{name}"
      );
    }
  }
}
