//! Content filters and the challenge-run blacklist.
//!
//! DLC and post-game entries are identified by roster number; the records
//! carry flags too, so both sources are honored. The blacklist covers
//! entries whose unlock conditions make them unfair picks for a blind
//! challenge run even when their generation is in range.

use crate::data::digimon::Digimon;

// Episode Pack 1 (458-463), Episode Pack 2 (464-468), Episode Pack 3 (469-473).
const DLC_DIGIMON_NUMBERS: &[&str] = &[
    "458", "459", "460", "461", "462", "463",
    "464", "465", "466", "467", "468",
    "469", "470", "471", "472", "473",
];

// Post-game exclusives (Chronomon Holy Mode, Chronomon Destroy Mode).
const POST_GAME_DIGIMON_NUMBERS: &[&str] = &["474", "475"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistCategory {
    Dlc,
    Armor,
    HighAgentRank,
    MegaPlus,
}

#[derive(Debug, Clone, Copy)]
pub struct BlacklistEntry {
    pub number: &'static str,
    pub name: &'static str,
    pub category: BlacklistCategory,
    pub requirement: &'static str,
}

pub const CHALLENGE_BLACKLIST: &[BlacklistEntry] = &[
    BlacklistEntry {
        number: "458",
        name: "BlitzGreymon",
        category: BlacklistCategory::Dlc,
        requirement: "DLC Episode Pack 1: Alternate Dimension",
    },
    BlacklistEntry {
        number: "459",
        name: "CresGarurumon",
        category: BlacklistCategory::Dlc,
        requirement: "DLC Episode Pack 1: Alternate Dimension",
    },
    BlacklistEntry {
        number: "460",
        name: "Omnimon Alter-S",
        category: BlacklistCategory::Dlc,
        requirement: "DLC Episode Pack 1: Alternate Dimension",
    },
    BlacklistEntry {
        number: "461",
        name: "Omnimon Alter-B",
        category: BlacklistCategory::Dlc,
        requirement: "DLC Episode Pack 1: Alternate Dimension",
    },
    BlacklistEntry {
        number: "462",
        name: "Omnimon Zwart Defeat",
        category: BlacklistCategory::Dlc,
        requirement: "DLC Episode Pack 1: Alternate Dimension",
    },
    BlacklistEntry {
        number: "463",
        name: "Parallelmon",
        category: BlacklistCategory::Dlc,
        requirement: "DLC Any Episode Pack",
    },
    BlacklistEntry {
        number: "422",
        name: "Rapidmon (Armor)",
        category: BlacklistCategory::Armor,
        requirement: "Armor evolution via Digi-Egg, high agent rank",
    },
    BlacklistEntry {
        number: "423",
        name: "Magnamon",
        category: BlacklistCategory::HighAgentRank,
        requirement: "Agent Rank 8+",
    },
    BlacklistEntry {
        number: "427",
        name: "Alphamon: Ouryuken",
        category: BlacklistCategory::MegaPlus,
        requirement: "Mega + tier, Agent Rank 9+",
    },
];

pub fn is_dlc_digimon(number: &str) -> bool {
    DLC_DIGIMON_NUMBERS.contains(&number)
}

pub fn is_post_game_digimon(number: &str) -> bool {
    POST_GAME_DIGIMON_NUMBERS.contains(&number)
}

/// Filter a roster by content preferences. Number tables and record flags
/// are both respected, so a roster imported without flags still filters.
pub fn filter_by_content(
    roster: &[Digimon],
    include_dlc: bool,
    include_post_game: bool,
) -> Vec<&Digimon> {
    roster
        .iter()
        .filter(|d| include_dlc || !(d.is_dlc || is_dlc_digimon(&d.number)))
        .filter(|d| include_post_game || !(d.is_post_game || is_post_game_digimon(&d.number)))
        .collect()
}

pub fn is_blacklisted_for_challenge_run(number: &str) -> bool {
    CHALLENGE_BLACKLIST.iter().any(|entry| entry.number == number)
}

pub fn blacklist_reason(number: &str) -> Option<&'static str> {
    CHALLENGE_BLACKLIST
        .iter()
        .find(|entry| entry.number == number)
        .map(|entry| entry.requirement)
}
