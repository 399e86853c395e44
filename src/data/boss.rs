//! Story boss table: the ordered list of boss fights that drives
//! progression gating and checkpoint seeds. Written by the boss-table
//! importer, loaded at runtime.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BOSS_TABLE_PATH: &str = "data/bosses.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boss {
    pub id: String,
    pub name: String,
    pub level: u32,
    /// Position in story order, starting at 0 (the tutorial fight).
    pub order: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Optional fights (DLC bosses) do not count toward completion.
    #[serde(default)]
    pub optional: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossTable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    pub bosses: Vec<Boss>,
}

impl BossTable {
    pub fn by_order(&self, order: u32) -> Option<&Boss> {
        self.bosses.iter().find(|boss| boss.order == order)
    }

    /// Highest required (non-optional) boss order, i.e. the end of the story.
    pub fn required_max_order(&self) -> Option<u32> {
        self.bosses
            .iter()
            .filter(|boss| !boss.optional)
            .map(|boss| boss.order)
            .max()
    }
}

/// Load the boss table from disk. Returns `None` if the file is missing or
/// malformed; callers degrade to "no table" rather than failing.
pub fn load_boss_table(path: impl AsRef<Path>) -> Option<BossTable> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> BossTable {
        BossTable {
            data_version: None,
            bosses: vec![
                Boss {
                    id: "chaosdramon".to_string(),
                    name: "Chaosdramon".to_string(),
                    level: 12,
                    order: 0,
                    location: None,
                    optional: false,
                },
                Boss {
                    id: "vulcanusmon".to_string(),
                    name: "Vulcanusmon".to_string(),
                    level: 30,
                    order: 10,
                    location: None,
                    optional: false,
                },
                Boss {
                    id: "parallelmon".to_string(),
                    name: "Parallelmon".to_string(),
                    level: 99,
                    order: 36,
                    location: None,
                    optional: true,
                },
            ],
        }
    }

    #[test]
    fn lookup_by_order() {
        let table = table();
        assert_eq!(table.by_order(10).map(|b| b.name.as_str()), Some("Vulcanusmon"));
        assert!(table.by_order(11).is_none());
    }

    #[test]
    fn required_max_ignores_optional_fights() {
        assert_eq!(table().required_max_order(), Some(10));
    }
}
