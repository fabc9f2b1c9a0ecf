//! Core types and trait definitions for the TDLB target store.
//!
//! This crate is deliberately free of database dependencies. Loaders and
//! downstream consumers depend on the [`store::TargetStore`] abstraction,
//! not on any concrete backend.

pub mod activity;
pub mod annotation;
pub mod assoc;
pub mod error;
pub mod store;
pub mod target;
pub mod xref;

pub use error::{Error, Result};
