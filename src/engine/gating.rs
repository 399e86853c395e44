//! Progression gating: the minimum boss order a Digimon's unlock
//! requirements imply, and roster filtering against a story marker.
//!
//! Most entries carry no requirement and are always selectable. Entries with
//! a required item resolve through a static item table; unrecognized items
//! that still look like special unlock items fall back to the Vulcanusmon
//! milestone, where the game hands out Digi-Eggs and Spirits in bulk.

use serde::Serialize;

use crate::data::digimon::Digimon;

/// Boss order of the Vulcanusmon fight, after which Digi-Eggs and Spirits
/// become available.
pub const VULCANUSMON_BOSS_ORDER: u32 = 10;

/// Fallback milestone for special items without a table entry.
pub const DEFAULT_SPECIAL_ITEM_BOSS_ORDER: u32 = VULCANUSMON_BOSS_ORDER;

// Item names are matched lowercase. Substring matching below means a partial
// scrape like "digi-egg of courage x1" still resolves.
const ITEM_BOSS_ORDERS: &[(&str, u32)] = &[
    ("digi-egg of courage", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of friendship", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of love", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of sincerity", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of knowledge", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of reliability", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of hope", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of light", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of kindness", VULCANUSMON_BOSS_ORDER),
    ("digi-egg of miracles", VULCANUSMON_BOSS_ORDER),
    ("human spirit of fire", VULCANUSMON_BOSS_ORDER),
    ("human spirit of light", VULCANUSMON_BOSS_ORDER),
    ("human spirit of ice", VULCANUSMON_BOSS_ORDER),
    ("human spirit of wind", VULCANUSMON_BOSS_ORDER),
    ("human spirit of thunder", VULCANUSMON_BOSS_ORDER),
    ("human spirit of earth", VULCANUSMON_BOSS_ORDER),
    ("human spirit of wood", VULCANUSMON_BOSS_ORDER),
    ("human spirit of water", VULCANUSMON_BOSS_ORDER),
    ("human spirit of steel", VULCANUSMON_BOSS_ORDER),
    ("human spirit of darkness", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of fire", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of light", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of ice", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of wind", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of thunder", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of earth", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of wood", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of water", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of steel", VULCANUSMON_BOSS_ORDER),
    ("beast spirit of darkness", VULCANUSMON_BOSS_ORDER),
];

const SPECIAL_ITEM_PATTERNS: &[&str] = &[
    "digi-egg",
    "digimental",
    "spirit",
    "crest",
    "tag",
    "d-arc",
    "scanner",
];

// Values a scraped requirement column uses to mean "no item".
const BLANK_ITEM_SENTINELS: &[&str] = &["none", "n/a", "-"];

/// Minimum boss order before this Digimon may appear in a selection, or
/// `None` when it is ungated. An explicit requirement wins; otherwise the
/// required item is normalized and resolved through the item table.
pub fn min_boss_order(digimon: &Digimon) -> Option<u32> {
    let requirements = digimon.requirements.as_ref()?;

    if let Some(order) = requirements.min_boss_order {
        return Some(order);
    }

    let item = requirements.required_item.as_deref()?;
    let key = item.trim().to_lowercase();
    if is_blank_item(&key) {
        return None;
    }

    if let Some(&(_, order)) = ITEM_BOSS_ORDERS.iter().find(|(name, _)| *name == key) {
        return Some(order);
    }
    for &(name, order) in ITEM_BOSS_ORDERS {
        if key.contains(name) || name.contains(key.as_str()) {
            return Some(order);
        }
    }

    if is_special_item(&key) {
        return Some(DEFAULT_SPECIAL_ITEM_BOSS_ORDER);
    }
    None
}

fn is_blank_item(key: &str) -> bool {
    key.is_empty() || BLANK_ITEM_SENTINELS.contains(&key)
}

/// Whether an item name should gate availability at all. Known unlock-item
/// patterns qualify outright; any other non-blank name is treated as special
/// rather than silently ignored.
fn is_special_item(key: &str) -> bool {
    if SPECIAL_ITEM_PATTERNS
        .iter()
        .any(|pattern| key.contains(pattern))
    {
        return true;
    }
    !is_blank_item(key)
}

/// Eligibility under a progression marker: ungated, or already past the
/// required boss order.
pub fn is_available(digimon: &Digimon, current_boss_order: u32) -> bool {
    match min_boss_order(digimon) {
        None => true,
        Some(min) => current_boss_order >= min,
    }
}

pub fn filter_by_boss_progression(
    roster: &[Digimon],
    current_boss_order: u32,
) -> Vec<&Digimon> {
    roster
        .iter()
        .filter(|digimon| is_available(digimon, current_boss_order))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilitySummary {
    pub total: usize,
    pub with_requirements: usize,
    pub available_at_vulcanusmon: usize,
}

/// How much of a roster is gated, and how much of the gated share opens up
/// at the Vulcanusmon milestone.
pub fn availability_summary(roster: &[Digimon]) -> AvailabilitySummary {
    let mut with_requirements = 0;
    let mut available_at_vulcanusmon = 0;
    for digimon in roster {
        if let Some(min) = min_boss_order(digimon) {
            with_requirements += 1;
            if min <= VULCANUSMON_BOSS_ORDER {
                available_at_vulcanusmon += 1;
            }
        }
    }
    AvailabilitySummary {
        total: roster.len(),
        with_requirements,
        available_at_vulcanusmon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::digimon::{Digimon, DigivolutionRequirement};
    use crate::engine::tiers::Generation;

    fn gated(number: &str, requirements: DigivolutionRequirement) -> Digimon {
        let mut digimon = Digimon::new(number, "Testmon", Generation::Champion);
        digimon.requirements = Some(requirements);
        digimon
    }

    fn with_item(item: &str) -> Digimon {
        gated(
            "100",
            DigivolutionRequirement {
                required_item: Some(item.to_string()),
                ..DigivolutionRequirement::default()
            },
        )
    }

    #[test]
    fn explicit_requirement_wins_over_item() {
        let digimon = gated(
            "100",
            DigivolutionRequirement {
                min_boss_order: Some(12),
                required_item: Some("digi-egg of courage".to_string()),
                ..DigivolutionRequirement::default()
            },
        );
        assert_eq!(min_boss_order(&digimon), Some(12));
        assert!(!is_available(&digimon, 11));
        assert!(is_available(&digimon, 12));
    }

    #[test]
    fn item_lookup_is_case_insensitive() {
        assert_eq!(
            min_boss_order(&with_item("DIGI-EGG OF COURAGE")),
            Some(VULCANUSMON_BOSS_ORDER)
        );
        assert_eq!(
            min_boss_order(&with_item("  digi-egg of courage  ")),
            Some(VULCANUSMON_BOSS_ORDER)
        );
    }

    #[test]
    fn item_substring_matches_resolve() {
        assert_eq!(
            min_boss_order(&with_item("Digi-Egg of Courage x1")),
            Some(VULCANUSMON_BOSS_ORDER)
        );
        assert_eq!(
            min_boss_order(&with_item("human spirit of fire (obtained)")),
            Some(VULCANUSMON_BOSS_ORDER)
        );
    }

    #[test]
    fn unknown_special_item_gets_default_milestone() {
        assert_eq!(
            min_boss_order(&with_item("Crest of Courage")),
            Some(DEFAULT_SPECIAL_ITEM_BOSS_ORDER)
        );
        assert_eq!(
            min_boss_order(&with_item("Mystery Catalyst")),
            Some(DEFAULT_SPECIAL_ITEM_BOSS_ORDER)
        );
    }

    #[test]
    fn blank_item_sentinels_do_not_gate() {
        for sentinel in ["", "none", "N/A", "-", "  "] {
            assert_eq!(min_boss_order(&with_item(sentinel)), None, "{sentinel:?}");
        }
    }

    #[test]
    fn missing_requirements_are_ungated() {
        let digimon = Digimon::new("001", "Koromon", Generation::InTrainingI);
        assert_eq!(min_boss_order(&digimon), None);
        assert!(is_available(&digimon, 0));
    }

    #[test]
    fn filter_respects_marker() {
        let roster = vec![
            Digimon::new("001", "Koromon", Generation::InTrainingI),
            gated(
                "002",
                DigivolutionRequirement {
                    min_boss_order: Some(5),
                    ..DigivolutionRequirement::default()
                },
            ),
        ];
        let before: Vec<&str> = filter_by_boss_progression(&roster, 4)
            .iter()
            .map(|d| d.number.as_str())
            .collect();
        assert_eq!(before, vec!["001"]);
        let after = filter_by_boss_progression(&roster, 5);
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn summary_counts_gated_share() {
        let roster = vec![
            Digimon::new("001", "Koromon", Generation::InTrainingI),
            with_item("digi-egg of hope"),
            gated(
                "101",
                DigivolutionRequirement {
                    min_boss_order: Some(25),
                    ..DigivolutionRequirement::default()
                },
            ),
        ];
        let summary = availability_summary(&roster);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.with_requirements, 2);
        assert_eq!(summary.available_at_vulcanusmon, 1);
    }
}
