//! Competitor pool generation.

use crate::{name_generator::NameGenerator, rng::StreamRng};
use serde::{Deserialize, Serialize};

pub const MIN_CONDITION: u8 = 1;
pub const MAX_CONDITION: u8 = 100;

/// A racing horse. Immutable once generated; schedules and results
/// hold their own copies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Competitor {
    pub name:      String,
    pub condition: u8, // 1..=100
    pub color:     String,
}

/// Produce `count` competitors with distinct names, a condition in
/// [1, 100] and a `#RRGGBB` colour.
pub fn generate_competitors(count: usize, rng: &mut StreamRng) -> Vec<Competitor> {
    let roster: Vec<Competitor> = (0..count)
        .map(|i| Competitor {
            name:      NameGenerator::horse_name(i),
            condition: rng.between(MIN_CONDITION, MAX_CONDITION),
            color:     NameGenerator::silk_color(rng),
        })
        .collect();
    log::debug!("roster: generated {} competitors", roster.len());
    roster
}
