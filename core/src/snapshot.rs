//! Read-only view of a session, serialisable for a presentation layer.

use crate::{
    clock::{ClockPhase, RaceClock},
    ledger::ResultsLedger,
    roster::Competitor,
    schedule::Schedule,
    types::{Millis, RoundIndex, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id:    SessionId,
    pub seed:          u64,
    pub current_round: RoundIndex,
    pub is_racing:     bool,
    pub phase:         ClockPhase,
    pub running_ms:    Millis,
    pub clock:         RaceClock,
    pub competitors:   Vec<Competitor>,
    pub schedule:      Schedule,
    pub results:       ResultsLedger,
}
