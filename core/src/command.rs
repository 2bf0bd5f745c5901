use serde::{Deserialize, Serialize};

/// Operations a presentation layer may invoke on a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum RaceCommand {
    NewSession,
    StartRace,
    PauseRace,
    ContinueRace,
    UpdatePositions { positions: Vec<f64> },
    FinishRace,
    /// Record the named competitor of the current heat as the next
    /// arrival.
    RecordFinish { name: String },
}
