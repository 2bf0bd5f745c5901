//! Race clock: start/pause/resume timestamps, accumulated pause offset
//! and per-lane positions for the heat currently on track.
//!
//! The clock never reads the time itself; every transition takes `now`.

use crate::{
    error::{DerbyError, DerbyResult},
    types::Millis,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceClock {
    pub start_time:  Option<Millis>,
    pub paused_at:   Option<Millis>,
    /// Total time spent paused since the last `start`. The animation
    /// driver subtracts this from wall time.
    pub elapsed_ms:  Millis,
    pub is_finished: bool,
    pub positions:   Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockPhase {
    Idle,
    Armed,
    Paused,
    Finished,
}

impl RaceClock {
    pub fn new(lanes: usize) -> Self {
        Self {
            start_time:  None,
            paused_at:   None,
            elapsed_ms:  0,
            is_finished: false,
            positions:   vec![0.0; lanes],
        }
    }

    pub fn lanes(&self) -> usize {
        self.positions.len()
    }

    /// (Re)arm for a round. Valid from any phase. Positions are left
    /// alone; `rearm` also zeroes them.
    pub fn start(&mut self, now: Millis) {
        self.start_time = Some(now);
        self.paused_at = None;
        self.elapsed_ms = 0;
        self.is_finished = false;
        log::debug!("clock: armed at {now}");
    }

    /// `start` plus all lanes back to the gate.
    pub fn rearm(&mut self, now: Millis) {
        self.positions.iter_mut().for_each(|p| *p = 0.0);
        self.start(now);
    }

    /// Repeated calls overwrite the pause instant.
    pub fn pause(&mut self, now: Millis) {
        self.paused_at = Some(now);
        log::debug!("clock: paused at {now}");
    }

    /// No-op unless paused.
    pub fn resume(&mut self, now: Millis) {
        if let Some(paused_at) = self.paused_at.take() {
            self.elapsed_ms += now - paused_at;
            log::debug!("clock: resumed at {now}, pause offset now {}ms", self.elapsed_ms);
        }
    }

    /// Replace all positions at once. On a length mismatch the old
    /// positions are kept.
    pub fn update_positions(&mut self, positions: Vec<f64>) -> DerbyResult<()> {
        if positions.len() != self.positions.len() {
            log::warn!(
                "clock: rejected position update of length {} (expected {})",
                positions.len(),
                self.positions.len()
            );
            return Err(DerbyError::InvalidInput(format!(
                "expected {} positions, got {}",
                self.positions.len(),
                positions.len()
            )));
        }
        self.positions = positions;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.is_finished = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn phase(&self) -> ClockPhase {
        if self.is_finished {
            ClockPhase::Finished
        } else if self.paused_at.is_some() {
            ClockPhase::Paused
        } else if self.start_time.is_some() {
            ClockPhase::Armed
        } else {
            ClockPhase::Idle
        }
    }

    /// Running time since `start`, excluding paused intervals
    /// (including a pause still in progress). Zero if never armed.
    pub fn running_ms(&self, now: Millis) -> Millis {
        let Some(start) = self.start_time else { return 0 };
        let open_pause = self.paused_at.map_or(0, |p| now - p);
        (now - start - self.elapsed_ms - open_pause).max(0)
    }
}
