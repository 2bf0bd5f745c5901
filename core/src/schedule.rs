//! Race schedule: one heat per round, drawn at random from the pool.
//!
//! Each round draws from the FULL pool independently of every other
//! round. A competitor may race several rounds or none at all.

use crate::{
    error::{DerbyError, DerbyResult},
    rng::StreamRng,
    roster::Competitor,
    types::{Lane, RoundIndex},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One lane of a heat. Holds its own copy of the competitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatEntry {
    pub lane:       Lane,
    pub competitor: Competitor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    rounds: BTreeMap<RoundIndex, Vec<HeatEntry>>,
}

impl Schedule {
    /// Heat for `round`, ordered by lane.
    pub fn heat(&self, round: RoundIndex) -> Option<&[HeatEntry]> {
        self.rounds.get(&round).map(Vec::as_slice)
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoundIndex, &[HeatEntry])> {
        self.rounds.iter().map(|(round, heat)| (*round, heat.as_slice()))
    }

    /// How many heats each competitor was drawn into, keyed by name.
    /// Competitors never drawn do not appear.
    pub fn appearances(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for heat in self.rounds.values() {
            for entry in heat {
                *counts.entry(entry.competitor.name.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

pub struct ScheduleBuilder;

impl ScheduleBuilder {
    /// Build `rounds` heats of `lanes_per_round` lanes each. The pool is
    /// never mutated.
    pub fn build(
        pool: &[Competitor],
        rounds: usize,
        lanes_per_round: usize,
        rng: &mut StreamRng,
    ) -> DerbyResult<Schedule> {
        if pool.len() < lanes_per_round {
            log::warn!(
                "schedule: pool of {} is smaller than {lanes_per_round} lanes",
                pool.len()
            );
            return Err(DerbyError::Configuration(format!(
                "pool of {} competitors is smaller than {lanes_per_round} lanes per round",
                pool.len()
            )));
        }

        let mut schedule = Schedule::default();
        for round in 0..rounds {
            schedule.rounds.insert(round, Self::draw_heat(pool, lanes_per_round, rng));
        }

        log::debug!(
            "schedule: built {rounds} rounds x {lanes_per_round} lanes from pool of {}",
            pool.len()
        );
        Ok(schedule)
    }

    /// Draw without replacement from a fresh working copy of the pool,
    /// filling lanes in increasing order.
    fn draw_heat(pool: &[Competitor], lanes: usize, rng: &mut StreamRng) -> Vec<HeatEntry> {
        let mut remaining: Vec<&Competitor> = pool.iter().collect();
        (0..lanes)
            .map(|lane| {
                let picked = remaining.swap_remove(rng.index_below(remaining.len()));
                HeatEntry { lane, competitor: picked.clone() }
            })
            .collect()
    }
}
