//! Team selection and reroll on top of the seeded generator, the tier
//! model, and the progression gate.
//!
//! Every operation builds an eligible pool (exclusions out, tier filter on
//! the *effective* generation, progression gate when a marker is supplied)
//! and then samples it. A pool is a duplicate-free subset of the roster, so
//! no result can repeat an identifier.
//!
//! Reroll primitives never reseed: given a pinned seed they are pure
//! functions of generator state, which is what makes rerolls reproducible
//! across devices. The `spontaneous_*` wrappers are the only operations that
//! draw fresh entropy.

use crate::data::digimon::Digimon;
use crate::engine::gating;
use crate::engine::rng::SeededRandom;
use crate::engine::seeding;
use crate::engine::tiers::{allowed_generations, effective_generation, Generation};

/// Modifiers for range-mode selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeOptions {
    /// Collapse the allowed range to the max generation alone.
    pub only_highest: bool,
    /// Floor of the allowed range; out-of-range floors fall back to the
    /// full range.
    pub min_generation: Option<Generation>,
    /// Admit Armor/Hybrid members at their equivalent generation.
    pub include_non_standard: bool,
    /// Progression marker. Absent means the gate is skipped entirely.
    pub boss_order: Option<u32>,
}

/// Seeded selection service. Owns one generator; installing a new seed is
/// the only way to reset determinism mid-session.
#[derive(Debug, Clone)]
pub struct Randomizer {
    rng: SeededRandom,
    seed: String,
}

impl Randomizer {
    pub fn new(seed: impl Into<String>) -> Self {
        let seed = seed.into();
        Self {
            rng: SeededRandom::new(&seed),
            seed,
        }
    }

    pub fn with_random_seed() -> Self {
        Self::new(seeding::random_seed())
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Install a new seed, fully replacing generator state.
    pub fn set_seed(&mut self, seed: impl Into<String>) {
        self.seed = seed.into();
        self.rng = SeededRandom::new(&self.seed);
    }

    /// Select up to `count` Digimon of a single generation. A standard
    /// target matches on effective generation (side-tracks excluded); a
    /// side-track target matches that family on its declared generation.
    pub fn random_team(
        &mut self,
        roster: &[Digimon],
        generation: Generation,
        count: usize,
        exclude: &[String],
        boss_order: Option<u32>,
    ) -> Vec<Digimon> {
        let pool: Vec<&Digimon> = roster
            .iter()
            .filter(|d| !exclude.contains(&d.number))
            .filter(|d| single_tier_eligible(d, generation))
            .filter(|d| progression_eligible(d, boss_order))
            .collect();
        self.take_from_pool(&pool, count)
    }

    /// Select up to `count` Digimon from all generations up to and including
    /// `max_generation`, subject to the range modifiers.
    pub fn random_team_multi(
        &mut self,
        roster: &[Digimon],
        max_generation: Generation,
        count: usize,
        exclude: &[String],
        options: &RangeOptions,
    ) -> Vec<Digimon> {
        let pool = build_range_pool(roster, max_generation, exclude, options);
        self.take_from_pool(&pool, count)
    }

    /// Replace a single slot: one pick from the range pool with the current
    /// team excluded. `None` when nothing is eligible.
    pub fn reroll_slot(
        &mut self,
        roster: &[Digimon],
        max_generation: Generation,
        current_team: &[String],
        options: &RangeOptions,
    ) -> Option<Digimon> {
        let pool = build_range_pool(roster, max_generation, current_team, options);
        self.rng.pick_one(&pool).map(|d| (*d).clone())
    }

    /// Roll a replacement team with the current members excluded.
    pub fn reroll_team(
        &mut self,
        roster: &[Digimon],
        max_generation: Generation,
        count: usize,
        current_team: &[String],
        options: &RangeOptions,
    ) -> Vec<Digimon> {
        self.random_team_multi(roster, max_generation, count, current_team, options)
    }

    /// Reroll a slot under a brand-new random seed. The only slot operation
    /// that draws entropy; callers wanting reproducibility pin a composed
    /// seed and use `reroll_slot`.
    pub fn spontaneous_reroll_slot(
        &mut self,
        roster: &[Digimon],
        max_generation: Generation,
        current_team: &[String],
        options: &RangeOptions,
    ) -> Option<Digimon> {
        self.set_seed(seeding::random_seed());
        self.reroll_slot(roster, max_generation, current_team, options)
    }

    /// Reroll the whole team under a brand-new random seed.
    pub fn spontaneous_reroll_team(
        &mut self,
        roster: &[Digimon],
        max_generation: Generation,
        count: usize,
        current_team: &[String],
        options: &RangeOptions,
    ) -> Vec<Digimon> {
        self.set_seed(seeding::random_seed());
        self.reroll_team(roster, max_generation, count, current_team, options)
    }

    /// Shuffle-and-truncate, except when the request covers the whole pool:
    /// then the pool is returned as-is, in roster order, without consuming
    /// draws. Consumers render that stable order when a band is exhausted.
    fn take_from_pool(&mut self, pool: &[&Digimon], count: usize) -> Vec<Digimon> {
        if pool.is_empty() {
            return Vec::new();
        }
        if count >= pool.len() {
            return pool.iter().map(|d| (*d).clone()).collect();
        }
        let mut shuffled = self.rng.shuffle(pool);
        shuffled.truncate(count);
        shuffled.into_iter().cloned().collect()
    }
}

fn build_range_pool<'a>(
    roster: &'a [Digimon],
    max_generation: Generation,
    exclude: &[String],
    options: &RangeOptions,
) -> Vec<&'a Digimon> {
    let allowed = allowed_generations(
        max_generation,
        options.min_generation,
        options.only_highest,
    );
    roster
        .iter()
        .filter(|d| !exclude.contains(&d.number))
        .filter(|d| range_tier_eligible(d, &allowed, options.include_non_standard))
        .filter(|d| progression_eligible(d, options.boss_order))
        .collect()
}

fn single_tier_eligible(digimon: &Digimon, generation: Generation) -> bool {
    if generation.is_standard() {
        digimon.generation.is_standard()
            && effective_generation(&digimon.number, digimon.generation) == generation
    } else {
        digimon.generation == generation
    }
}

fn range_tier_eligible(
    digimon: &Digimon,
    allowed: &[Generation],
    include_non_standard: bool,
) -> bool {
    if digimon.generation.is_standard() {
        allowed.contains(&effective_generation(&digimon.number, digimon.generation))
    } else if allowed.contains(&digimon.generation) {
        // The side-track family itself is the selection target.
        true
    } else {
        include_non_standard
            && allowed.contains(&effective_generation(&digimon.number, digimon.generation))
    }
}

fn progression_eligible(digimon: &Digimon, boss_order: Option<u32>) -> bool {
    match boss_order {
        None => true,
        Some(order) => gating::is_available(digimon, order),
    }
}
