//! Data layer: canonical roster and boss-table records, content filters,
//! import and validation, dataset registry. All file access lives here; the
//! engine only ever sees loaded records.

pub mod boss;
pub mod content;
pub mod digimon;
pub mod import;
pub mod registry;
pub mod validate;
