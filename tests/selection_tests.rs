use std::collections::HashSet;

use tamer::data::digimon::Digimon;
use tamer::engine::selection::{Randomizer, RangeOptions};
use tamer::engine::tiers::{effective_generation, Generation};

fn mock_roster() -> Vec<Digimon> {
    vec![
        Digimon::new("001", "Koromon", Generation::InTrainingI),
        Digimon::new("002", "Tsunomon", Generation::InTrainingII),
        Digimon::new("003", "Agumon", Generation::Rookie),
        Digimon::new("004", "Gabumon", Generation::Rookie),
        Digimon::new("050", "Agunimon-Like", Generation::Rookie),
        Digimon::new("051", "Guilmon", Generation::Rookie),
        Digimon::new("005", "Greymon", Generation::Champion),
        Digimon::new("006", "Garurumon", Generation::Champion),
        Digimon::new("007", "MetalGreymon", Generation::Ultimate),
        Digimon::new("009", "WarGreymon", Generation::Mega),
        Digimon::new("183", "Flamedramon", Generation::Armor),
        Digimon::new("423", "Magnamon", Generation::Armor),
        Digimon::new("305", "Aldamon", Generation::Hybrid),
        Digimon::new("039", "Lucemon", Generation::Rookie),
    ]
}

fn numbers(team: &[Digimon]) -> Vec<&str> {
    team.iter().map(|d| d.number.as_str()).collect()
}

#[test]
fn results_never_contain_duplicates() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("dupes");
    for count in 1..=roster.len() {
        let team = randomizer.random_team_multi(
            &roster,
            Generation::MegaPlus,
            count,
            &[],
            &RangeOptions {
                include_non_standard: true,
                ..RangeOptions::default()
            },
        );
        let unique: HashSet<&str> = team.iter().map(|d| d.number.as_str()).collect();
        assert_eq!(unique.len(), team.len());
    }
}

#[test]
fn exclusions_are_honored() {
    let roster = mock_roster();
    let exclude = vec!["003".to_string(), "004".to_string(), "050".to_string()];
    let mut randomizer = Randomizer::new("exclude");
    let team = randomizer.random_team(&roster, Generation::Rookie, 5, &exclude, None);
    assert_eq!(numbers(&team), vec!["051"]);
}

#[test]
fn requesting_more_than_available_returns_the_pool_in_roster_order() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("exhaustion");
    let team = randomizer.random_team(&roster, Generation::Champion, 3, &[], None);
    // Two champions in the roster; result is exactly the filtered pool,
    // original order, not three entries.
    assert_eq!(numbers(&team), vec!["005", "006"]);
}

#[test]
fn range_results_stay_within_the_allowed_band() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("band");
    let options = RangeOptions {
        min_generation: Some(Generation::Rookie),
        include_non_standard: true,
        ..RangeOptions::default()
    };
    let team =
        randomizer.random_team_multi(&roster, Generation::Champion, roster.len(), &[], &options);
    assert!(!team.is_empty());
    for digimon in &team {
        let effective = effective_generation(&digimon.number, digimon.generation);
        let index = effective.hierarchy_index().expect("standard effective tier");
        assert!(
            (Generation::Rookie.hierarchy_index().unwrap()
                ..=Generation::Champion.hierarchy_index().unwrap())
                .contains(&index),
            "{} resolved outside the band",
            digimon.number
        );
    }
}

#[test]
fn only_highest_restricts_to_the_max_generation() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("highest");
    let options = RangeOptions {
        only_highest: true,
        min_generation: Some(Generation::InTrainingI),
        ..RangeOptions::default()
    };
    let team =
        randomizer.random_team_multi(&roster, Generation::Rookie, roster.len(), &[], &options);
    assert!(team
        .iter()
        .all(|d| effective_generation(&d.number, d.generation) == Generation::Rookie));
    // Lucemon's declared Rookie is overridden to Ultimate, so it must be absent.
    assert!(team.iter().all(|d| d.number != "039"));
}

#[test]
fn side_tracks_are_excluded_without_the_flag() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("no-side-tracks");
    let team = randomizer.random_team_multi(
        &roster,
        Generation::MegaPlus,
        roster.len(),
        &[],
        &RangeOptions::default(),
    );
    assert!(team
        .iter()
        .all(|d| d.generation != Generation::Armor && d.generation != Generation::Hybrid));
}

#[test]
fn side_tracks_enter_at_their_equivalent_generation() {
    let roster = mock_roster();
    let mut randomizer = Randomizer::new("equivalents");
    let options = RangeOptions {
        include_non_standard: true,
        ..RangeOptions::default()
    };

    // Champion range: Flamedramon (Champion equivalent) is in, Magnamon
    // (Mega equivalent) and Aldamon (Ultimate equivalent) are out.
    let team = randomizer.random_team_multi(
        &roster,
        Generation::Champion,
        roster.len(),
        &[],
        &options,
    );
    let picked = numbers(&team);
    assert!(picked.contains(&"183"));
    assert!(!picked.contains(&"423"));
    assert!(!picked.contains(&"305"));

    let team = randomizer.random_team_multi(
        &roster,
        Generation::Mega,
        roster.len(),
        &[],
        &options,
    );
    let picked = numbers(&team);
    assert!(picked.contains(&"423"));
    assert!(picked.contains(&"305"));
}

#[test]
fn empty_pool_is_an_empty_result_not_an_error() {
    let roster = mock_roster();
    let everything: Vec<String> = roster.iter().map(|d| d.number.clone()).collect();
    let mut randomizer = Randomizer::new("empty");
    let team = randomizer.random_team_multi(
        &roster,
        Generation::MegaPlus,
        3,
        &everything,
        &RangeOptions::default(),
    );
    assert!(team.is_empty());
}

#[test]
fn reroll_team_excludes_every_current_member() {
    let roster = mock_roster();
    let current: Vec<String> = vec!["003".to_string(), "004".to_string()];
    let mut randomizer = Randomizer::new("team-reroll");
    let team = randomizer.reroll_team(
        &roster,
        Generation::Rookie,
        2,
        &current,
        &RangeOptions::default(),
    );
    assert_eq!(team.len(), 2);
    for digimon in &team {
        assert!(!current.contains(&digimon.number));
    }
}
