//! Per-round finishing order.

use crate::{
    error::{DerbyError, DerbyResult},
    roster::Competitor,
    types::RoundIndex,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishEntry {
    /// 0-based arrival order within the round.
    pub finish_rank: usize,
    pub competitor:  Competitor,
}

impl FinishEntry {
    /// "1ST", "2ND", ...
    pub fn place_label(&self) -> String {
        ordinal_label(self.finish_rank + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsLedger {
    lane_count: usize,
    rounds:     BTreeMap<RoundIndex, Vec<FinishEntry>>,
}

impl ResultsLedger {
    pub fn new(lane_count: usize) -> Self {
        Self { lane_count, rounds: BTreeMap::new() }
    }

    /// Append the next arrival for `round`. Rank is the arrival position;
    /// callers must record in actual finish order.
    pub fn record_finish(
        &mut self,
        round: RoundIndex,
        competitor: Competitor,
    ) -> DerbyResult<&FinishEntry> {
        let entries = self.rounds.entry(round).or_default();
        if entries.len() >= self.lane_count {
            log::warn!("ledger: round {round} is full, rejecting {}", competitor.name);
            return Err(DerbyError::Overflow { round, lanes: self.lane_count });
        }
        if entries.iter().any(|e| e.competitor.name == competitor.name) {
            log::warn!("ledger: {} already finished round {round}", competitor.name);
            return Err(DerbyError::InvalidInput(format!(
                "{} already recorded in round {round}",
                competitor.name
            )));
        }

        let finish_rank = entries.len();
        log::debug!("ledger: round {round} rank {finish_rank} -> {}", competitor.name);
        entries.push(FinishEntry { finish_rank, competitor });
        Ok(&entries[finish_rank])
    }

    /// Finishes recorded so far for `round`, in arrival order.
    pub fn round_results(&self, round: RoundIndex) -> &[FinishEntry] {
        self.rounds.get(&round).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn winner(&self, round: RoundIndex) -> Option<&Competitor> {
        self.round_results(round).first().map(|e| &e.competitor)
    }

    pub fn is_round_complete(&self, round: RoundIndex) -> bool {
        self.round_results(round).len() == self.lane_count
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoundIndex, &[FinishEntry])> {
        self.rounds.iter().map(|(round, entries)| (*round, entries.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
    }
}

/// English ordinal in upper case: 1ST, 2ND, 3RD, 4TH, 11TH, 21ST, 112TH.
pub fn ordinal_label(n: usize) -> String {
    let suffix = match (n % 100, n % 10) {
        (11..=13, _) => "TH",
        (_, 1) => "ST",
        (_, 2) => "ND",
        (_, 3) => "RD",
        _ => "TH",
    };
    format!("{n}{suffix}")
}
