//! Error type for `tdlb-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Input-validation failure from the core layer; no store interaction
  /// happened (or, inside a cascade, the transaction was rolled back).
  #[error("invalid input: {0}")]
  Input(#[from] tdlb_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A statement failed; carries the attempted SQL and rendered parameters
  /// for diagnosis.
  #[error("statement failed: {source} (sql: {sql}; params: {params})")]
  Statement {
    sql:    String,
    params: String,
    source: rusqlite::Error,
  },

  /// A stored value could not be decoded into its domain type.
  #[error("decode error: {0}")]
  Decode(String),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

impl Error {
  pub(crate) fn statement(
    sql: impl Into<String>,
    params: impl Into<String>,
    source: rusqlite::Error,
  ) -> Self {
    Self::Statement { sql: sql.into(), params: params.into(), source }
  }

  /// Recover a domain error smuggled through a `conn.call` closure.
  /// Closure bodies return [`tokio_rusqlite::Error::Other`] for domain
  /// failures (see the `From` impl below); everything else is a driver
  /// error.
  pub(crate) fn from_call(err: tokio_rusqlite::Error) -> Self {
    match err {
      tokio_rusqlite::Error::Other(boxed) => match boxed.downcast::<Error>() {
        Ok(e) => *e,
        Err(boxed) => Error::Database(tokio_rusqlite::Error::Other(boxed)),
      },
      other => Error::Database(other),
    }
  }
}

impl From<Error> for tokio_rusqlite::Error {
  fn from(e: Error) -> Self { tokio_rusqlite::Error::Other(Box::new(e)) }
}

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    Self::Database(tokio_rusqlite::Error::Rusqlite(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
