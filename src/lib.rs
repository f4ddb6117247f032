//! msgbind - locale-resolved message catalogs bound from properties bundles
//!
//! A module declares the message identifiers it needs (a catalog); on first
//! use each identifier is bound to the text of the most specific bundle in the
//! active locale's fallback chain, and the resulting immutable table is shared
//! process-wide. Translations missing everywhere bind to visible sentinel text
//! instead of failing, so diagnostics never become a second point of failure.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface for catalog authors (check, show, init)
//! - `config`: Configuration file loading and parsing
//! - `core`: Locales, bundles, catalogs, the binder and the registry
//! - `error`: Library error type
//! - `issues`: Issue types reported by `msgbind check`

#[macro_use]
mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod issues;

pub use error::{Error, Result};
