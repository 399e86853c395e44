//! Challenge-run orchestration: configs, run state, and the checkpoint
//! roll/reroll flow that composes seeds and drives the selection engine.

pub mod run;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::engine::tiers::Generation;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRule {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Boss-order milestone at which a generation band unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionCheckpoint {
    pub boss_order: u32,
    pub unlocked_generation: Generation,
    pub allow_reroll: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeSettings {
    pub team_size: usize,
    pub hard_mode_required: bool,
    pub allow_duplicates: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rerolls_per_checkpoint: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rules: Vec<ChallengeRule>,
    pub evolution_checkpoints: Vec<EvolutionCheckpoint>,
    pub settings: ChallengeSettings,
}

impl ChallengeConfig {
    /// The standard random-team challenge: three-slot party, tier bands
    /// unlocking along the boss order, three rerolls per checkpoint.
    pub fn standard() -> Self {
        Self {
            id: "random-team".to_string(),
            name: "Random Team Challenge".to_string(),
            description: "Play through the story with randomly assigned partners, \
                          rerolled at evolution checkpoints."
                .to_string(),
            rules: vec![
                ChallengeRule {
                    id: "team-lock".to_string(),
                    title: "Locked team".to_string(),
                    description: "Only rolled partners may fight required bosses."
                        .to_string(),
                },
                ChallengeRule {
                    id: "no-duplicates".to_string(),
                    title: "No duplicates".to_string(),
                    description: "A partner may appear in at most one slot.".to_string(),
                },
            ],
            evolution_checkpoints: vec![
                EvolutionCheckpoint {
                    boss_order: 0,
                    unlocked_generation: Generation::Rookie,
                    allow_reroll: false,
                },
                EvolutionCheckpoint {
                    boss_order: 3,
                    unlocked_generation: Generation::Champion,
                    allow_reroll: true,
                },
                EvolutionCheckpoint {
                    boss_order: 9,
                    unlocked_generation: Generation::Ultimate,
                    allow_reroll: true,
                },
                EvolutionCheckpoint {
                    boss_order: 15,
                    unlocked_generation: Generation::Mega,
                    allow_reroll: true,
                },
                EvolutionCheckpoint {
                    boss_order: 25,
                    unlocked_generation: Generation::MegaPlus,
                    allow_reroll: true,
                },
            ],
            settings: ChallengeSettings {
                team_size: 3,
                hard_mode_required: true,
                allow_duplicates: false,
                max_rerolls_per_checkpoint: Some(3),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub digimon_number: String,
    pub slot_index: usize,
    pub rolled_at_checkpoint: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RerollKind {
    Slot,
    Team,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerollEvent {
    pub timestamp: String,
    pub checkpoint: u32,
    pub kind: RerollKind,
    pub previous_team: Vec<String>,
    pub new_team: Vec<String>,
    pub seed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRunState {
    pub challenge_id: String,
    /// Base seed; per-action seeds are composed from it.
    pub seed: String,
    pub current_boss_order: u32,
    pub current_generation: Generation,
    pub team: Vec<TeamMember>,
    pub reroll_history: Vec<RerollEvent>,
    pub created_at: String,
    pub updated_at: String,
}
