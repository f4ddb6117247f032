//! Parsers for bundle resource files.
//!
//! - `properties`: `key=value` resources, one file per locale suffix

pub mod properties;
