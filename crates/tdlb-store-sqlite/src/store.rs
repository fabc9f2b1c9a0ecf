//! [`SqliteStore`] — the SQLite implementation of [`TargetStore`].

use std::{collections::BTreeMap, path::Path, sync::Arc};

use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension as _};
use tracing::{debug, warn};

use tdlb_core::{
  activity::{CmpdActivity, DrugActivity, NewCmpdActivity, NewDrugActivity},
  annotation::{
    InfoValue, NewTdlInfo, TdlInfo, ValueKind, ITYPE_AB_COUNT, ITYPE_EFL_GOA,
    ITYPE_PUBMED_SCORE,
  },
  assoc::{GeneRif, Goa, NewGeneRif, NewGoa, NewPmScore, PmScore},
  store::{validate_identifier, ColumnValue, TargetCriterion, TargetStore},
  target::{NewTarget, Target, TdlCalcData},
  xref::{Alias, NewAlias, NewXref, Xref, XrefOutcome},
};

use crate::{
  encode::{
    drug_activity_from_row, encode_column_value, target_from_row, RawCmpdActivity,
    RawGeneRif, RawTdlInfo, TARGET_COLS,
  },
  registry::Registries,
  schema::SCHEMA,
  write, Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A TDLB target store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted and clones
/// share the same session and type registries.
#[derive(Clone)]
pub struct SqliteStore {
  conn:       tokio_rusqlite::Connection,
  registries: Arc<Registries>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, registries: Arc::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, registries: Arc::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Release the underlying session.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await
  }

  /// Run a closure against the connection's dedicated thread, recovering
  /// domain errors smuggled through the driver error type.
  async fn call<T, F>(&self, f: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut Connection) -> std::result::Result<T, tokio_rusqlite::Error>
      + Send
      + 'static,
  {
    self.conn.call(f).await.map_err(Error::from_call)
  }

  /// The annotation-type registry. Populated from the `info_type` catalog
  /// on first use; later calls return the memoized map without a query.
  pub(crate) async fn info_types(&self) -> Result<Arc<BTreeMap<String, ValueKind>>> {
    let map = self
      .registries
      .info_types
      .get_or_try_init(|| async {
        let rows: Vec<(String, String)> = self
          .call(|conn| {
            let mut stmt = conn.prepare("SELECT name, data_type FROM info_type")?;
            let rows = stmt
              .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
          })
          .await?;

        let mut map = BTreeMap::new();
        for (name, data_type) in rows {
          match ValueKind::from_catalog(&data_type) {
            Some(kind) => {
              map.insert(name, kind);
            }
            None => warn!(
              itype = %name,
              data_type = %data_type,
              "unknown data_type in info_type catalog; skipping"
            ),
          }
        }
        debug!(count = map.len(), "annotation-type registry populated");
        Ok::<_, Error>(Arc::new(map))
      })
      .await?;
    Ok(Arc::clone(map))
  }

  /// The cross-reference-type registry. Populated from the distinct types
  /// observed in storage on first use; memoized thereafter.
  pub(crate) async fn xref_types(&self) -> Result<Arc<Vec<String>>> {
    let types = self
      .registries
      .xref_types
      .get_or_try_init(|| async {
        let types: Vec<String> = self
          .call(|conn| {
            let mut stmt =
              conn.prepare("SELECT DISTINCT xtype FROM xref ORDER BY xtype")?;
            let types = stmt
              .query_map([], |row| row.get(0))?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(types)
          })
          .await?;
        debug!(count = types.len(), "xref-type registry populated");
        Ok::<_, Error>(Arc::new(types))
      })
      .await?;
    Ok(Arc::clone(types))
  }
}

// ─── Child-collection readers ────────────────────────────────────────────────

fn none_if_empty<T>(v: Vec<T>) -> Option<Vec<T>> {
  if v.is_empty() { None } else { Some(v) }
}

fn read_tdl_infos(
  conn: &Connection,
  info_types: &BTreeMap<String, ValueKind>,
  target_id: i64,
) -> Result<BTreeMap<String, TdlInfo>> {
  let mut stmt = conn.prepare(
    "SELECT id, itype, string_value, integer_value, number_value, \
            boolean_value, date_value \
     FROM tdl_info WHERE target_id = ?1 ORDER BY id",
  )?;
  let raws = stmt
    .query_map(params![target_id], RawTdlInfo::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut infos = BTreeMap::new();
  for raw in raws {
    let (itype, info) = raw.into_entry(info_types)?;
    infos.insert(itype, info);
  }
  Ok(infos)
}

fn read_aliases(conn: &Connection, target_id: i64) -> Result<Vec<Alias>> {
  let mut stmt = conn.prepare(
    "SELECT id, atype, value FROM alias WHERE target_id = ?1 ORDER BY id",
  )?;
  let aliases = stmt
    .query_map(params![target_id], |row| {
      Ok(Alias { id: row.get(0)?, atype: row.get(1)?, value: row.get(2)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(aliases)
}

fn read_xrefs(
  conn: &Connection,
  target_id: i64,
) -> Result<BTreeMap<String, Vec<Xref>>> {
  let mut stmt = conn.prepare(
    "SELECT id, xtype, value, xtra FROM xref \
     WHERE target_id = ?1 ORDER BY xtype, id",
  )?;
  let rows = stmt
    .query_map(params![target_id], |row| {
      Ok((
        row.get::<_, String>(1)?,
        Xref { id: row.get(0)?, value: row.get(2)?, xtra: row.get(3)? },
      ))
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut grouped: BTreeMap<String, Vec<Xref>> = BTreeMap::new();
  for (xtype, xref) in rows {
    grouped.entry(xtype).or_default().push(xref);
  }
  Ok(grouped)
}

fn read_goas(conn: &Connection, target_id: i64) -> Result<Vec<Goa>> {
  let mut stmt = conn.prepare(
    "SELECT id, go_id, go_term, evidence, goeco, assigned_by \
     FROM goa WHERE target_id = ?1 ORDER BY id",
  )?;
  let goas = stmt
    .query_map(params![target_id], |row| {
      Ok(Goa {
        id:          row.get(0)?,
        go_id:       row.get(1)?,
        go_term:     row.get(2)?,
        evidence:    row.get(3)?,
        goeco:       row.get(4)?,
        assigned_by: row.get(5)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(goas)
}

fn read_generifs(conn: &Connection, target_id: i64) -> Result<Vec<GeneRif>> {
  let mut stmt = conn.prepare(
    "SELECT id, text, pubmed_ids, years FROM generif \
     WHERE target_id = ?1 ORDER BY id",
  )?;
  let raws = stmt
    .query_map(params![target_id], RawGeneRif::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  // One accumulator per target, filled from this query alone.
  raws.into_iter().map(RawGeneRif::into_generif).collect()
}

fn read_pmscores(conn: &Connection, target_id: i64) -> Result<Vec<PmScore>> {
  let mut stmt = conn.prepare(
    "SELECT id, year, score FROM pmscore WHERE target_id = ?1 ORDER BY year",
  )?;
  let scores = stmt
    .query_map(params![target_id], |row| {
      Ok(PmScore { id: row.get(0)?, year: row.get(1)?, score: row.get(2)? })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(scores)
}

const DRUG_ACTIVITY_COLS: &str =
  "id, target_id, drug, dcid, has_moa, act_value, act_type, action_type, \
   source, reference, smiles, cmpd_chemblid, cmpd_pubchem_cid, nlm_drug_info";

fn read_drug_activities(conn: &Connection, target_id: i64) -> Result<Vec<DrugActivity>> {
  let sql = format!(
    "SELECT {DRUG_ACTIVITY_COLS} FROM drug_activity \
     WHERE target_id = ?1 ORDER BY id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let activities = stmt
    .query_map(params![target_id], drug_activity_from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(activities)
}

const CMPD_ACTIVITY_COLS: &str =
  "id, target_id, catype, cmpd_id_in_src, cmpd_name_in_src, smiles, \
   act_value, act_type, reference, pubmed_ids, cmpd_pubchem_cid";

fn read_cmpd_activities(conn: &Connection, target_id: i64) -> Result<Vec<CmpdActivity>> {
  let sql = format!(
    "SELECT {CMPD_ACTIVITY_COLS} FROM cmpd_activity \
     WHERE target_id = ?1 ORDER BY id"
  );
  let mut stmt = conn.prepare(&sql)?;
  let raws = stmt
    .query_map(params![target_id], RawCmpdActivity::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawCmpdActivity::into_activity).collect()
}

fn fetch_target_row(conn: &Connection, id: i64) -> Result<Option<Target>> {
  let sql = format!("SELECT {TARGET_COLS} FROM target WHERE id = ?1");
  Ok(
    conn
      .query_row(&sql, params![id], target_from_row)
      .optional()?,
  )
}

// ─── TargetStore impl ────────────────────────────────────────────────────────

impl TargetStore for SqliteStore {
  type Error = Error;

  // ── Write cascade ─────────────────────────────────────────────────────

  async fn insert_target(&self, input: NewTarget) -> Result<i64> {
    // Validate the root record before touching the store at all; child
    // records are validated by their row writers inside the transaction,
    // where a rejection rolls the whole cascade back.
    input.validate().map_err(Error::Input)?;

    let info_types = if input.tdl_infos.is_empty() {
      Arc::new(BTreeMap::new())
    } else {
      self.info_types().await?
    };

    self
      .call(move |conn| Ok(write::cascade(conn, &input, &info_types)?))
      .await
  }

  // ── Single-row writers ────────────────────────────────────────────────

  async fn insert_alias(&self, target_id: i64, input: NewAlias) -> Result<()> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_alias_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  async fn insert_xref(&self, target_id: i64, input: NewXref) -> Result<XrefOutcome> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        let outcome = write::insert_xref_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(outcome)
      })
      .await
  }

  async fn insert_tdl_info(&self, target_id: i64, input: NewTdlInfo) -> Result<()> {
    let info_types = self.info_types().await?;
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_tdl_info_row(&tx, &info_types, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  async fn insert_goa(&self, target_id: i64, input: NewGoa) -> Result<()> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_goa_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  async fn insert_generif(&self, target_id: i64, input: NewGeneRif) -> Result<()> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_generif_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  async fn insert_pmscore(&self, target_id: i64, input: NewPmScore) -> Result<()> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_pmscore_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  async fn insert_drug_activity(
    &self,
    target_id: i64,
    input: NewDrugActivity,
  ) -> Result<()> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_drug_activity_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  async fn insert_cmpd_activity(
    &self,
    target_id: i64,
    input: NewCmpdActivity,
  ) -> Result<()> {
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        write::insert_cmpd_activity_row(&tx, target_id, &input)?;
        tx.commit()?;
        Ok(())
      })
      .await
  }

  // ── Read / reconstruct ────────────────────────────────────────────────

  async fn get_target(&self, id: i64, annot: bool) -> Result<Option<Target>> {
    if !annot {
      return self.call(move |conn| Ok(fetch_target_row(conn, id)?)).await;
    }

    let info_types = self.info_types().await?;
    self
      .call(move |conn| {
        let Some(mut target) = fetch_target_row(conn, id)? else {
          return Ok(None);
        };

        let infos = read_tdl_infos(conn, &info_types, id)?;
        target.tdl_infos = if infos.is_empty() { None } else { Some(infos) };
        target.aliases = none_if_empty(read_aliases(conn, id)?);
        let xrefs = read_xrefs(conn, id)?;
        target.xrefs = if xrefs.is_empty() { None } else { Some(xrefs) };
        target.drug_activities = none_if_empty(read_drug_activities(conn, id)?);
        target.cmpd_activities = none_if_empty(read_cmpd_activities(conn, id)?);
        target.generifs = none_if_empty(read_generifs(conn, id)?);
        target.goas = none_if_empty(read_goas(conn, id)?);
        target.pmscores = none_if_empty(read_pmscores(conn, id)?);

        Ok(Some(target))
      })
      .await
  }

  async fn get_target_for_tdl_calc(&self, id: i64) -> Result<Option<TdlCalcData>> {
    self
      .call(move |conn| {
        let Some(target) = fetch_target_row(conn, id)? else {
          return Ok(None);
        };

        let drug_activities = read_drug_activities(conn, id)?;
        let cmpd_activities = read_cmpd_activities(conn, id)?;

        let pubmed_score: Option<f64> = conn
          .query_row(
            "SELECT number_value FROM tdl_info \
             WHERE itype = ?1 AND target_id = ?2",
            params![ITYPE_PUBMED_SCORE, id],
            |row| row.get(0),
          )
          .optional()?
          .flatten();

        let ab_count: Option<i64> = conn
          .query_row(
            "SELECT integer_value FROM tdl_info \
             WHERE itype = ?1 AND target_id = ?2",
            params![ITYPE_AB_COUNT, id],
            |row| row.get(0),
          )
          .optional()?
          .flatten();

        let mut stmt = conn.prepare(
          "SELECT id, string_value FROM tdl_info \
           WHERE itype = ?1 AND target_id = ?2 ORDER BY id",
        )?;
        let efl_rows = stmt
          .query_map(params![ITYPE_EFL_GOA, id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Option<String>>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let mut efl_goas = Vec::with_capacity(efl_rows.len());
        for (row_id, value) in efl_rows {
          let value = value.ok_or_else(|| {
            Error::Decode(format!("tdl_info {row_id}: NULL string_value column"))
          })?;
          efl_goas.push(TdlInfo { id: row_id, value: InfoValue::String(value) });
        }

        let generifs = read_generifs(conn, id)?;

        Ok(Some(TdlCalcData {
          target,
          pubmed_score,
          ab_count,
          efl_goas,
          generifs,
          drug_activities,
          cmpd_activities,
        }))
      })
      .await
  }

  async fn get_target_ids(&self) -> Result<Vec<i64>> {
    self
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id FROM target ORDER BY id")?;
        let ids = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
      })
      .await
  }

  async fn find_target_ids(
    &self,
    criterion: TargetCriterion,
    incl_alias: bool,
  ) -> Result<Vec<i64>> {
    // The UNION dedups: a target matching on both the primary column and
    // an alias appears exactly once.
    let (sql, params): (&str, Vec<Value>) = match criterion {
      TargetCriterion::Symbol(sym) if incl_alias => (
        "SELECT id FROM target WHERE sym = ?1 \
         UNION \
         SELECT target_id FROM alias WHERE atype = 'symbol' AND value = ?1",
        vec![sym.into()],
      ),
      TargetCriterion::Symbol(sym) => {
        ("SELECT id FROM target WHERE sym = ?1", vec![sym.into()])
      }
      TargetCriterion::Uniprot(acc) if incl_alias => (
        "SELECT id FROM target WHERE uniprot = ?1 \
         UNION \
         SELECT target_id FROM alias WHERE atype = 'uniprot' AND value = ?1",
        vec![acc.into()],
      ),
      TargetCriterion::Uniprot(acc) => {
        ("SELECT id FROM target WHERE uniprot = ?1", vec![acc.into()])
      }
      TargetCriterion::Name(name) => {
        ("SELECT id FROM target WHERE name = ?1", vec![name.into()])
      }
      TargetCriterion::GeneId(geneid) => {
        ("SELECT id FROM target WHERE geneid = ?1", vec![Value::Integer(geneid)])
      }
      TargetCriterion::StringId(sid) => {
        ("SELECT id FROM target WHERE stringid = ?1", vec![sid.into()])
      }
    };
    debug!(sql = %sql, params = ?params, "find_target_ids");

    self
      .call(move |conn| {
        let mut stmt = conn.prepare(sql)?;
        let ids = stmt
          .query_map(params_from_iter(params), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
      })
      .await
  }

  async fn find_target_ids_by_xref<'a>(
    &'a self,
    xtype: &'a str,
    value: &'a str,
  ) -> Result<Vec<i64>> {
    let xtype = xtype.to_owned();
    let value = value.to_owned();
    self
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT DISTINCT target_id FROM xref WHERE xtype = ?1 AND value = ?2",
        )?;
        let ids = stmt
          .query_map(params![xtype, value], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
      })
      .await
  }

  async fn get_domain_xrefs(
    &self,
    target_id: i64,
  ) -> Result<BTreeMap<String, Vec<Xref>>> {
    self
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, value, xtra FROM xref \
           WHERE target_id = ?1 AND xtype = ?2 ORDER BY id",
        )?;
        let mut xrefs = BTreeMap::new();
        for xtype in ["Pfam", "InterPro", "PROSITE"] {
          let rows = stmt
            .query_map(params![target_id, xtype], |row| {
              Ok(Xref { id: row.get(0)?, value: row.get(1)?, xtra: row.get(2)? })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          xrefs.insert(xtype.to_owned(), rows);
        }
        Ok(xrefs)
      })
      .await
  }

  async fn get_cmpd_activities<'a>(
    &'a self,
    catype: Option<&'a str>,
  ) -> Result<Vec<CmpdActivity>> {
    let catype = catype.map(str::to_owned);
    self
      .call(move |conn| {
        let raws = if let Some(catype) = catype {
          let sql = format!(
            "SELECT {CMPD_ACTIVITY_COLS} FROM cmpd_activity \
             WHERE catype = ?1 ORDER BY id"
          );
          let mut stmt = conn.prepare(&sql)?;
          stmt
            .query_map(params![catype], RawCmpdActivity::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let sql = format!("SELECT {CMPD_ACTIVITY_COLS} FROM cmpd_activity ORDER BY id");
          let mut stmt = conn.prepare(&sql)?;
          stmt
            .query_map([], RawCmpdActivity::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        let activities = raws
          .into_iter()
          .map(RawCmpdActivity::into_activity)
          .collect::<Result<Vec<_>>>()?;
        Ok(activities)
      })
      .await
  }

  async fn get_drug_activities(&self) -> Result<Vec<DrugActivity>> {
    self
      .call(|conn| {
        let sql = format!("SELECT {DRUG_ACTIVITY_COLS} FROM drug_activity ORDER BY id");
        let mut stmt = conn.prepare(&sql)?;
        let activities = stmt
          .query_map([], drug_activity_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(activities)
      })
      .await
  }

  // ── Type registries ───────────────────────────────────────────────────

  async fn load_info_types(&self) -> Result<BTreeMap<String, ValueKind>> {
    Ok(self.info_types().await?.as_ref().clone())
  }

  async fn load_xref_types(&self) -> Result<Vec<String>> {
    Ok(self.xref_types().await?.as_ref().clone())
  }

  // ── Bulk mutators ─────────────────────────────────────────────────────

  async fn set_column_by_id<'a>(
    &'a self,
    table: &'a str,
    column: &'a str,
    id: i64,
    value: ColumnValue,
  ) -> Result<()> {
    validate_identifier(table)?;
    validate_identifier(column)?;

    let sql = format!("UPDATE {table} SET {column} = ?1 WHERE id = ?2");
    let value = encode_column_value(value);
    self
      .call(move |conn| {
        let params_dbg = format!("({value:?}, {id})");
        conn
          .execute(&sql, params![value, id])
          .map_err(|e| Error::statement(sql.clone(), params_dbg, e))?;
        Ok(())
      })
      .await
  }

  async fn reset_column_for_all<'a>(
    &'a self,
    table: &'a str,
    column: &'a str,
  ) -> Result<usize> {
    validate_identifier(table)?;
    validate_identifier(column)?;

    let sql = format!("UPDATE {table} SET {column} = NULL");
    self
      .call(move |conn| {
        let rows = conn
          .execute(&sql, [])
          .map_err(|e| Error::statement(sql.clone(), "()", e))?;
        Ok(rows)
      })
      .await
  }

  async fn delete_where<'a>(
    &'a self,
    table: &'a str,
    column: &'a str,
    value: ColumnValue,
  ) -> Result<usize> {
    validate_identifier(table)?;
    validate_identifier(column)?;

    let sql = format!("DELETE FROM {table} WHERE {column} = ?1");
    let value = encode_column_value(value);
    self
      .call(move |conn| {
        let params_dbg = format!("({value:?})");
        let rows = conn
          .execute(&sql, params![value])
          .map_err(|e| Error::statement(sql.clone(), params_dbg, e))?;
        Ok(rows)
      })
      .await
  }

  async fn delete_all_rows<'a>(&'a self, table: &'a str) -> Result<usize> {
    validate_identifier(table)?;

    let table = table.to_owned();
    self
      .call(move |conn| {
        let tx = conn.transaction()?;
        let sql = format!("DELETE FROM {table}");
        let rows = tx
          .execute(&sql, [])
          .map_err(|e| Error::statement(sql.clone(), "()", e))?;

        // Reset the id sequence so a re-load starts from a clean numbering.
        // sqlite_sequence only exists once an AUTOINCREMENT table has rows.
        let seq_exists: bool = tx
          .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
            [],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if seq_exists {
          tx.execute("DELETE FROM sqlite_sequence WHERE name = ?1", params![table])?;
        }

        tx.commit()?;
        Ok(rows)
      })
      .await
  }
}
