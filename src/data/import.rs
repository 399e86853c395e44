//! Roster import: turn a scraped CSV export into the canonical roster JSON.
//!
//! Expected header: `number,name,generation,attribute,type,personality` with
//! optional `required_item`, `min_boss_order`, and `agent_rank` columns.
//! Rows that cannot be resolved are reported, not fatal; duplicate numbers
//! keep the first occurrence.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::digimon::{Digimon, DigivolutionRequirement, RosterFile};
use crate::engine::tiers::Generation;

pub const DEFAULT_IMPORT_OUTPUT_PATH: &str = "data/roster.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedRow {
    pub record_index: usize,
    pub input_name: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub source_path: String,
    pub output_path: String,
    pub total_records: usize,
    pub imported_records: usize,
    pub duplicate_records: usize,
    pub unresolved_records: usize,
    pub unresolved: Vec<UnresolvedRow>,
}

#[derive(Debug)]
pub enum ImportError {
    Read(csv::Error),
    Row(csv::Error),
    Write(std::io::Error),
    Serialize(serde_json::Error),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(err) => write!(f, "failed to open roster CSV: {err}"),
            Self::Row(err) => write!(f, "failed to read roster CSV row: {err}"),
            Self::Write(err) => write!(f, "failed to persist roster output: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize roster output: {err}"),
        }
    }
}

impl std::error::Error for ImportError {}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    number: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    generation: String,
    #[serde(default)]
    attribute: String,
    #[serde(default, rename = "type")]
    digimon_type: String,
    #[serde(default)]
    personality: String,
    #[serde(default)]
    required_item: Option<String>,
    #[serde(default)]
    min_boss_order: Option<u32>,
    #[serde(default)]
    agent_rank: Option<u8>,
}

/// Import a CSV roster, writing canonical JSON to `output_path`.
pub fn import_roster_csv(
    source_path: &str,
    output_path: &str,
) -> Result<ImportReport, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(source_path)
        .map_err(ImportError::Read)?;

    let mut roster: Vec<Digimon> = Vec::new();
    let mut seen_numbers: HashSet<String> = HashSet::new();
    let mut unresolved: Vec<UnresolvedRow> = Vec::new();
    let mut duplicate_records = 0;
    let mut total_records = 0;

    for (record_index, row) in reader.deserialize::<RawRow>().enumerate() {
        total_records += 1;
        let row = row.map_err(ImportError::Row)?;

        if row.number.is_empty() || row.name.is_empty() {
            unresolved.push(UnresolvedRow {
                record_index,
                input_name: row.name.clone(),
                reason: "missing number or name".to_string(),
            });
            continue;
        }
        let Some(generation) = Generation::from_label(&row.generation) else {
            unresolved.push(UnresolvedRow {
                record_index,
                input_name: row.name.clone(),
                reason: format!("unknown generation '{}'", row.generation),
            });
            continue;
        };
        if !seen_numbers.insert(row.number.clone()) {
            duplicate_records += 1;
            eprintln!(
                "import: duplicate number '{}' at record {record_index}; keeping first",
                row.number
            );
            continue;
        }

        let requirements = build_requirements(&row);
        let mut digimon = Digimon::new(row.number, row.name, generation);
        digimon.attribute = row.attribute;
        digimon.digimon_type = row.digimon_type;
        digimon.base_personality = row.personality;
        digimon.requirements = requirements;
        roster.push(digimon);
    }

    let imported_records = roster.len();
    write_roster(output_path, roster)?;

    Ok(ImportReport {
        source_path: source_path.to_string(),
        output_path: output_path.to_string(),
        total_records,
        imported_records,
        duplicate_records,
        unresolved_records: unresolved.len(),
        unresolved,
    })
}

fn build_requirements(row: &RawRow) -> Option<DigivolutionRequirement> {
    let required_item = row
        .required_item
        .as_deref()
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string);
    let requirements = DigivolutionRequirement {
        required_item,
        min_boss_order: row.min_boss_order,
        agent_rank: row.agent_rank,
        ..DigivolutionRequirement::default()
    };
    (!requirements.is_empty()).then_some(requirements)
}

fn write_roster(output_path: &str, digimon: Vec<Digimon>) -> Result<(), ImportError> {
    if let Some(parent) = Path::new(output_path).parent() {
        fs::create_dir_all(parent).map_err(ImportError::Write)?;
    }
    let file = RosterFile {
        data_version: None,
        digimon,
    };
    let raw = serde_json::to_string_pretty(&file).map_err(ImportError::Serialize)?;
    fs::write(output_path, raw).map_err(ImportError::Write)
}
