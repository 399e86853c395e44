use tamer::data::digimon::{Digimon, DigivolutionRequirement};
use tamer::engine::gating::{min_boss_order, VULCANUSMON_BOSS_ORDER};
use tamer::engine::selection::{Randomizer, RangeOptions};
use tamer::engine::tiers::Generation;

fn with_requirements(
    number: &str,
    name: &str,
    generation: Generation,
    requirements: DigivolutionRequirement,
) -> Digimon {
    let mut digimon = Digimon::new(number, name, generation);
    digimon.requirements = Some(requirements);
    digimon
}

fn mock_roster() -> Vec<Digimon> {
    vec![
        Digimon::new("003", "Agumon", Generation::Rookie),
        with_requirements(
            "100",
            "Gatedmon",
            Generation::Rookie,
            DigivolutionRequirement {
                min_boss_order: Some(12),
                ..DigivolutionRequirement::default()
            },
        ),
        with_requirements(
            "183",
            "Flamedramon",
            Generation::Rookie,
            DigivolutionRequirement {
                required_item: Some("DIGI-EGG OF COURAGE".to_string()),
                ..DigivolutionRequirement::default()
            },
        ),
    ]
}

fn options_at(boss_order: Option<u32>) -> RangeOptions {
    RangeOptions {
        boss_order,
        ..RangeOptions::default()
    }
}

#[test]
fn explicit_gate_boundary_is_inclusive() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("boundary");

    let before = randomizer.random_team_multi(
        &roster,
        Generation::Rookie,
        roster.len(),
        &[],
        &options_at(Some(11)),
    );
    assert!(before.iter().all(|d| d.number != "100"));

    let at = randomizer.random_team_multi(
        &roster,
        Generation::Rookie,
        roster.len(),
        &[],
        &options_at(Some(12)),
    );
    assert!(at.iter().any(|d| d.number == "100"));
}

#[test]
fn item_gate_is_case_insensitive() {
    let roster = mock_roster();
    let upper = &roster[2];
    let lower = with_requirements(
        "184",
        "Pegasusmon",
        Generation::Rookie,
        DigivolutionRequirement {
            required_item: Some("digi-egg of courage".to_string()),
            ..DigivolutionRequirement::default()
        },
    );
    assert_eq!(min_boss_order(upper), min_boss_order(&lower));
    assert_eq!(min_boss_order(upper), Some(VULCANUSMON_BOSS_ORDER));
}

#[test]
fn item_gated_entries_open_at_the_milestone() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("milestone");

    let before = randomizer.random_team_multi(
        &roster,
        Generation::Rookie,
        roster.len(),
        &[],
        &options_at(Some(VULCANUSMON_BOSS_ORDER - 1)),
    );
    assert!(before.iter().all(|d| d.number != "183"));

    let at = randomizer.random_team_multi(
        &roster,
        Generation::Rookie,
        roster.len(),
        &[],
        &options_at(Some(VULCANUSMON_BOSS_ORDER)),
    );
    assert!(at.iter().any(|d| d.number == "183"));
}

#[test]
fn absent_marker_skips_the_gate_entirely() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("ungated");
    let team = randomizer.random_team_multi(
        &roster,
        Generation::Rookie,
        roster.len(),
        &[],
        &options_at(None),
    );
    assert_eq!(team.len(), roster.len());
}

#[test]
fn gated_results_respect_the_marker_property() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("property");
    for marker in 0..15 {
        let team = randomizer.random_team_multi(
            &roster,
            Generation::Rookie,
            roster.len(),
            &[],
            &options_at(Some(marker)),
        );
        for digimon in &team {
            match min_boss_order(digimon) {
                None => {}
                Some(min) => assert!(
                    marker >= min,
                    "{} selected at marker {marker} despite gate {min}",
                    digimon.number
                ),
            }
        }
    }
}
