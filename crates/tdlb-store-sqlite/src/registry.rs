//! The two type registries owned by a store: annotation type name to value
//! kind, and the set of observed cross-reference types.
//!
//! Each is populated at most once per store, on first use, and never
//! re-queried. If the underlying catalog changes during the store's lifetime
//! the registry goes stale; that is an accepted limitation of the design,
//! not something the store repairs silently.

use std::{collections::BTreeMap, sync::Arc};

use tdlb_core::annotation::ValueKind;
use tokio::sync::OnceCell;

/// Init-once caches; shared across cheap clones of the store.
#[derive(Default)]
pub(crate) struct Registries {
  pub info_types: OnceCell<Arc<BTreeMap<String, ValueKind>>>,
  pub xref_types: OnceCell<Arc<Vec<String>>>,
}
