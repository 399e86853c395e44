//! Seed composition for challenge runs.
//!
//! The engine never composes seeds itself; callers build one from the run's
//! base seed, the boss-order marker, and (for rerolls) a monotonically
//! increasing counter. Repeating the same logical action on the same run
//! therefore always reproduces the same seed string, on any device.

const SEED_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SEED_LENGTH: usize = 24;

/// Seed for the initial team roll at a boss checkpoint.
pub fn compose_boss_seed(base: &str, boss_order: u32) -> String {
    format!("{base}-boss-{boss_order}")
}

/// Seed for the k-th single-slot reroll at a boss checkpoint.
pub fn compose_slot_reroll_seed(base: &str, boss_order: u32, reroll_count: u32) -> String {
    format!("{base}-boss-{boss_order}-reroll-{reroll_count}")
}

/// Seed for the k-th full-team reroll at a boss checkpoint.
pub fn compose_team_reroll_seed(base: &str, boss_order: u32, reroll_count: u32) -> String {
    format!("{base}-boss-{boss_order}-rerollall-{reroll_count}")
}

/// A fresh alphanumeric base seed from OS entropy. Falls back to a clock mix
/// when the entropy source is unavailable; base-seed quality only affects
/// run-to-run variety, never reproducibility within a run.
pub fn random_seed() -> String {
    let mut buf = [0_u8; SEED_LENGTH];
    if getrandom::getrandom(&mut buf).is_err() {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or(0);
        for (index, byte) in buf.iter_mut().enumerate() {
            *byte = (nanos >> ((index % 16) * 8)) as u8 ^ index as u8;
        }
    }
    buf.iter()
        .map(|byte| SEED_ALPHABET[usize::from(*byte) % SEED_ALPHABET.len()] as char)
        .collect()
}
