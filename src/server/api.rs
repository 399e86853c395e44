//! JSON payload builders for the API routes. Data-backed payloads take the
//! roster as an argument so they stay pure and testable; route handlers own
//! the disk access.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::boss::BossTable;
use crate::data::digimon::Digimon;
use crate::engine::gating;
use crate::engine::selection::{Randomizer, RangeOptions};
use crate::engine::tiers::{effective_generation, Generation};
use crate::evolution::{find_shortest_paths, EvolutionGraph};

const MAX_TEAM_COUNT: usize = 100;

#[derive(Debug)]
pub enum ApiError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "tamer-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Parse query string for available_at=<boss order>.
fn parse_available_at(path: &str) -> Option<u32> {
    let query = path.split('?').nth(1).unwrap_or("");
    query.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some("available_at"), Some(value)) => value.trim().parse().ok(),
            _ => None,
        }
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct DigimonListItem {
    pub number: String,
    pub name: String,
    pub generation: Generation,
    pub effective_generation: Generation,
}

fn list_item(digimon: &Digimon) -> DigimonListItem {
    DigimonListItem {
        number: digimon.number.clone(),
        name: digimon.name.clone(),
        generation: digimon.generation,
        effective_generation: effective_generation(&digimon.number, digimon.generation),
    }
}

pub fn roster_payload(roster: &[Digimon], path: &str) -> Result<String, serde_json::Error> {
    let available_at = parse_available_at(path);
    let list: Vec<DigimonListItem> = roster
        .iter()
        .filter(|d| available_at.map_or(true, |order| gating::is_available(d, order)))
        .map(list_item)
        .collect();
    serde_json::to_string_pretty(&serde_json::json!({
        "count": list.len(),
        "digimon": list
    }))
}

pub fn bosses_payload(table: Option<&BossTable>) -> Result<String, serde_json::Error> {
    match table {
        Some(table) => serde_json::to_string_pretty(&serde_json::json!({
            "data_version": table.data_version,
            "bosses": table.bosses
        })),
        None => serde_json::to_string_pretty(&serde_json::json!({ "bosses": [] })),
    }
}

pub fn availability_payload(roster: &[Digimon]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&gating::availability_summary(roster))
}

#[derive(Debug, Clone, Deserialize)]
pub struct RandomizeRequest {
    pub max_generation: Generation,
    pub count: usize,
    #[serde(default)]
    pub seed: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub only_highest: bool,
    #[serde(default)]
    pub min_generation: Option<Generation>,
    #[serde(default)]
    pub include_non_standard: bool,
    #[serde(default)]
    pub boss_order: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RandomizeResponse {
    pub status: &'static str,
    /// Seed actually used; echoed so clients can pin reruns.
    pub seed: String,
    pub requested: usize,
    pub team: Vec<DigimonListItem>,
}

pub fn randomize_payload(roster: &[Digimon], body: &str) -> Result<String, ApiError> {
    let request: RandomizeRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    validate_count(request.count)?;

    let mut randomizer = match &request.seed {
        Some(seed) if !seed.trim().is_empty() => Randomizer::new(seed.clone()),
        _ => Randomizer::with_random_seed(),
    };
    let options = RangeOptions {
        only_highest: request.only_highest,
        min_generation: request.min_generation,
        include_non_standard: request.include_non_standard,
        boss_order: request.boss_order,
    };
    let team = randomizer.random_team_multi(
        roster,
        request.max_generation,
        request.count,
        &request.exclude,
        &options,
    );

    let response = RandomizeResponse {
        status: "ok",
        seed: randomizer.seed().to_string(),
        requested: request.count,
        team: team.iter().map(list_item).collect(),
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Parse)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerollMode {
    Slot,
    Team,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RerollRequest {
    /// Composed seed, required: rerolls must be reproducible across devices.
    pub seed: String,
    pub mode: RerollMode,
    pub max_generation: Generation,
    #[serde(default)]
    pub current_team: Vec<String>,
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub only_highest: bool,
    #[serde(default)]
    pub min_generation: Option<Generation>,
    #[serde(default)]
    pub include_non_standard: bool,
    #[serde(default)]
    pub boss_order: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RerollResponse {
    pub status: &'static str,
    pub seed: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<DigimonListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<Vec<DigimonListItem>>,
}

pub fn reroll_payload(roster: &[Digimon], body: &str) -> Result<String, ApiError> {
    let request: RerollRequest = serde_json::from_str(body).map_err(ApiError::Parse)?;
    if request.seed.trim().is_empty() {
        return Err(ApiError::Validation("seed must not be empty".to_string()));
    }

    let options = RangeOptions {
        only_highest: request.only_highest,
        min_generation: request.min_generation,
        include_non_standard: request.include_non_standard,
        boss_order: request.boss_order,
    };
    let mut randomizer = Randomizer::new(request.seed.clone());

    let response = match request.mode {
        RerollMode::Slot => {
            let replacement = randomizer.reroll_slot(
                roster,
                request.max_generation,
                &request.current_team,
                &options,
            );
            RerollResponse {
                status: "ok",
                seed: request.seed,
                replacement: replacement.as_ref().map(list_item),
                team: None,
            }
        }
        RerollMode::Team => {
            let count = request.count.unwrap_or(request.current_team.len().max(1));
            validate_count(count)?;
            let team = randomizer.reroll_team(
                roster,
                request.max_generation,
                count,
                &request.current_team,
                &options,
            );
            RerollResponse {
                status: "ok",
                seed: request.seed,
                replacement: None,
                team: Some(team.iter().map(list_item).collect()),
            }
        }
    };
    serde_json::to_string_pretty(&response).map_err(ApiError::Parse)
}

/// Shortest evolution paths between two names, from `?from=` and `?to=`.
pub fn evolution_payload(graph: &EvolutionGraph, path: &str) -> Result<String, ApiError> {
    let from = query_param(path, "from")
        .ok_or_else(|| ApiError::Validation("'from' query parameter is required".to_string()))?;
    let to = query_param(path, "to")
        .ok_or_else(|| ApiError::Validation("'to' query parameter is required".to_string()))?;

    let paths = find_shortest_paths(&from, &to, graph);
    serde_json::to_string_pretty(&serde_json::json!({
        "from": from,
        "to": to,
        "path_count": paths.len(),
        "paths": paths,
    }))
    .map_err(ApiError::Parse)
}

fn query_param(path: &str, name: &str) -> Option<String> {
    let query = path.split('?').nth(1)?;
    query.split('&').find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        match (parts.next(), parts.next()) {
            (Some(key), Some(value)) if key == name => Some(percent_decode(value)),
            _ => None,
        }
    })
}

fn percent_decode(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        match bytes[index] {
            b'+' => {
                decoded.push(b' ');
                index += 1;
            }
            b'%' if index + 2 < bytes.len() => {
                let hi = (bytes[index + 1] as char).to_digit(16);
                let lo = (bytes[index + 2] as char).to_digit(16);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => {
                        decoded.push((hi * 16 + lo) as u8);
                        index += 3;
                    }
                    _ => {
                        decoded.push(b'%');
                        index += 1;
                    }
                }
            }
            byte => {
                decoded.push(byte);
                index += 1;
            }
        }
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

fn validate_count(count: usize) -> Result<(), ApiError> {
    if count == 0 || count > MAX_TEAM_COUNT {
        return Err(ApiError::Validation(format!(
            "count must be between 1 and {MAX_TEAM_COUNT}"
        )));
    }
    Ok(())
}
