//! Session event log.
//!
//! Every successful state-changing operation appends one event.
//! Position updates are not logged.

use crate::types::{Millis, RoundIndex};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RaceEvent {
    SessionStarted {
        seed:   u64,
        rounds: usize,
        lanes:  usize,
    },
    RaceStarted {
        round: RoundIndex,
    },
    RacePaused {
        round: RoundIndex,
    },
    RaceResumed {
        round:      RoundIndex,
        paused_for: Millis,
    },
    FinishRecorded {
        round:       RoundIndex,
        finish_rank: usize,
        name:        String,
    },
    RoundAdvanced {
        from: RoundIndex,
        to:   RoundIndex,
    },
    SessionFinished {
        last_round: RoundIndex,
    },
}

impl RaceEvent {
    /// Stable name of the variant, matching its serde tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            RaceEvent::SessionStarted { .. } => "session_started",
            RaceEvent::RaceStarted { .. }    => "race_started",
            RaceEvent::RacePaused { .. }     => "race_paused",
            RaceEvent::RaceResumed { .. }    => "race_resumed",
            RaceEvent::FinishRecorded { .. } => "finish_recorded",
            RaceEvent::RoundAdvanced { .. }  => "round_advanced",
            RaceEvent::SessionFinished { .. } => "session_finished",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq:   u64,
    pub at_ms: Millis,
    pub event: RaceEvent,
}
