//! Deterministic selection engine: seeded generator, tier model,
//! progression gate, and the selection/reroll operations built on them.
//! Synchronous and allocation-light; callers own seed lifecycle and
//! persistence.

pub mod gating;
pub mod rng;
pub mod seeding;
pub mod selection;
pub mod tiers;

pub use selection::{Randomizer, RangeOptions};
pub use tiers::Generation;
