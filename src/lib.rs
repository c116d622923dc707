//! Walk-in cooler/freezer refrigeration sizing and vendor comparison.
//!
//! - `domain`: capacity lookup, coil rule, vendor matching and pricing
//! - `infra`: CSV ingestion of capacity tables and vendor catalogs
//! - `util`: settings persistence, embedded assets and version info

pub mod domain;
pub mod infra;
pub mod util;
