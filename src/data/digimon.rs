//! Canonical Digimon roster records. Written by the importer, loaded at
//! runtime by the CLI and server. The engine treats type, attribute, and
//! personality as opaque display data.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::tiers::Generation;

pub const DEFAULT_ROSTER_PATH: &str = "data/roster.json";

/// Unlock requirements attached to a roster entry. Every field is optional;
/// an absent field means "no requirement", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigivolutionRequirement {
    /// Stat thresholds (e.g. "ATK" -> 120). Opaque to selection.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub stats: HashMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_boss_order: Option<u32>,
    /// Free-text item name as scraped, e.g. "Digi-Egg of Courage".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_rank: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
}

impl DigivolutionRequirement {
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
            && self.min_boss_order.is_none()
            && self.required_item.is_none()
            && self.agent_rank.is_none()
            && self.skill.is_none()
    }
}

/// One roster entry, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digimon {
    /// Roster number, unique per dataset (e.g. "001").
    pub number: String,
    pub name: String,
    pub generation: Generation,
    #[serde(default)]
    pub attribute: String,
    #[serde(rename = "type", default)]
    pub digimon_type: String,
    #[serde(default)]
    pub base_personality: String,
    #[serde(default)]
    pub is_dlc: bool,
    #[serde(default)]
    pub is_post_game: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<DigivolutionRequirement>,
}

impl Digimon {
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        generation: Generation,
    ) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            generation,
            attribute: String::new(),
            digimon_type: String::new(),
            base_personality: String::new(),
            is_dlc: false,
            is_post_game: false,
            requirements: None,
        }
    }
}

/// On-disk roster file (TAMER schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_version: Option<String>,
    pub digimon: Vec<Digimon>,
}

pub fn load_roster_file(path: impl AsRef<Path>) -> Result<RosterFile, std::io::Error> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(std::io::Error::other)
}

pub fn load_roster(path: impl AsRef<Path>) -> Result<Vec<Digimon>, std::io::Error> {
    load_roster_file(path).map(|file| file.digimon)
}
