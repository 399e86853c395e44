//! Checkpoint flow for a challenge run: seeds are composed from the run's
//! base seed so every roll and reroll replays identically on any device.

use std::fmt;

use crate::challenge::{
    ChallengeConfig, ChallengeRunState, RerollEvent, RerollKind, TeamMember,
};
use crate::data::content;
use crate::data::digimon::Digimon;
use crate::engine::gating::VULCANUSMON_BOSS_ORDER;
use crate::engine::seeding;
use crate::engine::selection::{Randomizer, RangeOptions};
use crate::engine::tiers::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    RerollNotAllowed { boss_order: u32 },
    RerollLimitReached { limit: u32 },
    SlotOutOfRange { slot_index: usize, team_size: usize },
}

impl fmt::Display for ChallengeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RerollNotAllowed { boss_order } => {
                write!(f, "rerolls are not allowed at checkpoint {boss_order}")
            }
            Self::RerollLimitReached { limit } => {
                write!(f, "reroll limit of {limit} reached for this checkpoint")
            }
            Self::SlotOutOfRange {
                slot_index,
                team_size,
            } => write!(f, "slot {slot_index} out of range for team of {team_size}"),
        }
    }
}

impl std::error::Error for ChallengeError {}

/// Start a new run. Without a caller-provided base seed a fresh random one
/// is drawn; everything after that point is deterministic.
pub fn start_run(config: &ChallengeConfig, base_seed: Option<String>) -> ChallengeRunState {
    let now = chrono::Utc::now().to_rfc3339();
    ChallengeRunState {
        challenge_id: config.id.clone(),
        seed: base_seed.unwrap_or_else(seeding::random_seed),
        current_boss_order: 0,
        current_generation: unlocked_generation(config, 0),
        team: Vec::new(),
        reroll_history: Vec::new(),
        created_at: now.clone(),
        updated_at: now,
    }
}

/// Highest generation unlocked at a boss order: the last checkpoint at or
/// below the marker, or the lowest standard generation before any checkpoint.
pub fn unlocked_generation(config: &ChallengeConfig, boss_order: u32) -> Generation {
    config
        .evolution_checkpoints
        .iter()
        .filter(|checkpoint| checkpoint.boss_order <= boss_order)
        .max_by_key(|checkpoint| checkpoint.boss_order)
        .map(|checkpoint| checkpoint.unlocked_generation)
        .unwrap_or(Generation::InTrainingI)
}

pub fn checkpoint_allows_reroll(config: &ChallengeConfig, boss_order: u32) -> bool {
    config
        .evolution_checkpoints
        .iter()
        .filter(|checkpoint| checkpoint.boss_order <= boss_order)
        .max_by_key(|checkpoint| checkpoint.boss_order)
        .is_some_and(|checkpoint| checkpoint.allow_reroll)
}

/// Move the run marker to a newly defeated boss.
pub fn advance_boss(config: &ChallengeConfig, state: &mut ChallengeRunState, boss_order: u32) {
    state.current_boss_order = boss_order;
    state.current_generation = unlocked_generation(config, boss_order);
    state.updated_at = chrono::Utc::now().to_rfc3339();
}

/// Roll the team for the current checkpoint, replacing any previous team.
pub fn roll_team(
    config: &ChallengeConfig,
    state: &mut ChallengeRunState,
    roster: &[Digimon],
) -> Vec<Digimon> {
    let seed = seeding::compose_boss_seed(&state.seed, state.current_boss_order);
    let mut randomizer = Randomizer::new(seed);
    let pool = challenge_roster(roster);
    let team = randomizer.random_team_multi(
        &pool,
        state.current_generation,
        config.settings.team_size,
        &[],
        &range_options(state.current_boss_order),
    );
    set_team(state, &team);
    team
}

/// Reroll one slot under the checkpoint's composed reroll seed.
pub fn reroll_slot_at(
    config: &ChallengeConfig,
    state: &mut ChallengeRunState,
    roster: &[Digimon],
    slot_index: usize,
) -> Result<Option<Digimon>, ChallengeError> {
    check_reroll_budget(config, state)?;
    if slot_index >= state.team.len() {
        return Err(ChallengeError::SlotOutOfRange {
            slot_index,
            team_size: state.team.len(),
        });
    }

    let reroll_count = rerolls_at_checkpoint(state, RerollKind::Slot);
    let seed = seeding::compose_slot_reroll_seed(
        &state.seed,
        state.current_boss_order,
        reroll_count,
    );
    let current_numbers = team_numbers(state);
    let mut randomizer = Randomizer::new(seed.clone());
    let pool = challenge_roster(roster);
    let replacement = randomizer.reroll_slot(
        &pool,
        state.current_generation,
        &current_numbers,
        &range_options(state.current_boss_order),
    );

    if let Some(replacement) = &replacement {
        let mut new_numbers = current_numbers.clone();
        new_numbers[slot_index] = replacement.number.clone();
        state.team[slot_index].digimon_number = replacement.number.clone();
        state.team[slot_index].rolled_at_checkpoint = state.current_boss_order;
        record_reroll(state, RerollKind::Slot, current_numbers, new_numbers, seed);
    }
    Ok(replacement)
}

/// Reroll the whole team under the checkpoint's composed team-reroll seed.
pub fn reroll_team_at(
    config: &ChallengeConfig,
    state: &mut ChallengeRunState,
    roster: &[Digimon],
) -> Result<Vec<Digimon>, ChallengeError> {
    check_reroll_budget(config, state)?;

    let reroll_count = rerolls_at_checkpoint(state, RerollKind::Team);
    let seed = seeding::compose_team_reroll_seed(
        &state.seed,
        state.current_boss_order,
        reroll_count,
    );
    let current_numbers = team_numbers(state);
    let mut randomizer = Randomizer::new(seed.clone());
    let pool = challenge_roster(roster);
    let team = randomizer.reroll_team(
        &pool,
        state.current_generation,
        config.settings.team_size,
        &current_numbers,
        &range_options(state.current_boss_order),
    );

    if !team.is_empty() {
        let new_numbers: Vec<String> = team.iter().map(|d| d.number.clone()).collect();
        set_team(state, &team);
        record_reroll(state, RerollKind::Team, current_numbers, new_numbers, seed);
    }
    Ok(team)
}

fn range_options(boss_order: u32) -> RangeOptions {
    RangeOptions {
        // Side-tracks join the pool once their unlock items exist at all;
        // per-entry gating still applies through the marker.
        include_non_standard: boss_order >= VULCANUSMON_BOSS_ORDER,
        boss_order: Some(boss_order),
        ..RangeOptions::default()
    }
}

fn challenge_roster(roster: &[Digimon]) -> Vec<Digimon> {
    roster
        .iter()
        .filter(|d| !content::is_blacklisted_for_challenge_run(&d.number))
        .cloned()
        .collect()
}

fn check_reroll_budget(
    config: &ChallengeConfig,
    state: &ChallengeRunState,
) -> Result<(), ChallengeError> {
    if !checkpoint_allows_reroll(config, state.current_boss_order) {
        return Err(ChallengeError::RerollNotAllowed {
            boss_order: state.current_boss_order,
        });
    }
    if let Some(limit) = config.settings.max_rerolls_per_checkpoint {
        let used = state
            .reroll_history
            .iter()
            .filter(|event| event.checkpoint == state.current_boss_order)
            .count() as u32;
        if used >= limit {
            return Err(ChallengeError::RerollLimitReached { limit });
        }
    }
    Ok(())
}

fn rerolls_at_checkpoint(state: &ChallengeRunState, kind: RerollKind) -> u32 {
    state
        .reroll_history
        .iter()
        .filter(|event| event.checkpoint == state.current_boss_order && event.kind == kind)
        .count() as u32
}

fn team_numbers(state: &ChallengeRunState) -> Vec<String> {
    state
        .team
        .iter()
        .map(|member| member.digimon_number.clone())
        .collect()
}

fn set_team(state: &mut ChallengeRunState, team: &[Digimon]) {
    state.team = team
        .iter()
        .enumerate()
        .map(|(slot_index, digimon)| TeamMember {
            digimon_number: digimon.number.clone(),
            slot_index,
            rolled_at_checkpoint: state.current_boss_order,
        })
        .collect();
    state.updated_at = chrono::Utc::now().to_rfc3339();
}

fn record_reroll(
    state: &mut ChallengeRunState,
    kind: RerollKind,
    previous_team: Vec<String>,
    new_team: Vec<String>,
    seed: String,
) {
    state.reroll_history.push(RerollEvent {
        timestamp: chrono::Utc::now().to_rfc3339(),
        checkpoint: state.current_boss_order,
        kind,
        previous_team,
        new_team,
        seed,
    });
    state.updated_at = chrono::Utc::now().to_rfc3339();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tiers::Generation;

    fn roster() -> Vec<Digimon> {
        let mut roster: Vec<Digimon> = (0..8)
            .map(|i| {
                Digimon::new(
                    format!("{:03}", i + 1),
                    format!("Rookie{i}"),
                    Generation::Rookie,
                )
            })
            .collect();
        roster.push(Digimon::new("050", "Greymon", Generation::Champion));
        roster
    }

    fn run() -> (ChallengeConfig, ChallengeRunState) {
        let config = ChallengeConfig::standard();
        let state = start_run(&config, Some("fixed-seed".to_string()));
        (config, state)
    }

    #[test]
    fn checkpoints_unlock_in_order() {
        let config = ChallengeConfig::standard();
        assert_eq!(unlocked_generation(&config, 0), Generation::Rookie);
        assert_eq!(unlocked_generation(&config, 4), Generation::Champion);
        assert_eq!(unlocked_generation(&config, 30), Generation::MegaPlus);
    }

    #[test]
    fn same_base_seed_reproduces_the_run() {
        let roster = roster();
        let (config, mut first) = run();
        let (_, mut second) = run();
        let team_a = roll_team(&config, &mut first, &roster);
        let team_b = roll_team(&config, &mut second, &roster);
        assert_eq!(team_a, team_b);
        assert_eq!(team_a.len(), config.settings.team_size);
    }

    #[test]
    fn rerolls_blocked_before_first_reroll_checkpoint() {
        let roster = roster();
        let (config, mut state) = run();
        roll_team(&config, &mut state, &roster);
        let result = reroll_team_at(&config, &mut state, &roster);
        assert_eq!(
            result,
            Err(ChallengeError::RerollNotAllowed { boss_order: 0 })
        );
    }

    #[test]
    fn reroll_budget_is_enforced() {
        let roster = roster();
        let (config, mut state) = run();
        advance_boss(&config, &mut state, 3);
        roll_team(&config, &mut state, &roster);

        for _ in 0..3 {
            reroll_team_at(&config, &mut state, &roster).expect("within budget");
        }
        let result = reroll_team_at(&config, &mut state, &roster);
        assert_eq!(result, Err(ChallengeError::RerollLimitReached { limit: 3 }));
    }

    #[test]
    fn slot_reroll_replaces_only_that_slot() {
        let roster = roster();
        let (config, mut state) = run();
        advance_boss(&config, &mut state, 3);
        roll_team(&config, &mut state, &roster);
        let before = team_numbers(&state);

        let replacement = reroll_slot_at(&config, &mut state, &roster, 1)
            .expect("reroll allowed")
            .expect("pool not empty");
        let after = team_numbers(&state);

        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
        assert_eq!(after[1], replacement.number);
        assert!(!before.contains(&replacement.number));
        assert_eq!(state.reroll_history.len(), 1);
    }

    #[test]
    fn slot_reroll_out_of_range_is_an_error() {
        let roster = roster();
        let (config, mut state) = run();
        advance_boss(&config, &mut state, 3);
        roll_team(&config, &mut state, &roster);
        let result = reroll_slot_at(&config, &mut state, &roster, 9);
        assert_eq!(
            result,
            Err(ChallengeError::SlotOutOfRange {
                slot_index: 9,
                team_size: 3
            })
        );
    }
}
