//! The race session. Owns every piece of per-session state and is the
//! only thing that moves between rounds.
//!
//! LIFECYCLE:
//!   1. `new`          generates the competitor pool (once).
//!   2. `new_session`  draws a schedule and resets round, clock, results
//!                     and the racing flag. Calling it again starts over.
//!   3. per round:     start_race → (pause_race / continue_race)*
//!                     → update_positions* → record_finish* → finish_race
//!   4. `finish_race` on the last round marks the clock finished. That is
//!      terminal until the next `new_session`.
//!
//! RULES:
//!   - `finish_race` is the only mutator of `current_round`.
//!   - A failed operation leaves all state as it was.
//!   - All randomness flows through the session's RngBank.

use crate::{
    clock::RaceClock,
    command::RaceCommand,
    config::RaceConfig,
    error::{DerbyError, DerbyResult},
    event::{EventLogEntry, RaceEvent},
    ledger::{FinishEntry, ResultsLedger},
    rng::{RngBank, StreamRng, StreamSlot},
    roster::{generate_competitors, Competitor},
    schedule::{HeatEntry, Schedule, ScheduleBuilder},
    snapshot::SessionSnapshot,
    time::TimeSource,
    types::{Millis, RoundIndex, SessionId},
};

pub struct RaceSession {
    pub session_id: SessionId,
    config:         RaceConfig,
    rng_bank:       RngBank,
    schedule_rng:   StreamRng,
    time:           Box<dyn TimeSource>,
    competitors:    Vec<Competitor>,
    schedule:       Option<Schedule>,
    current_round:  RoundIndex,
    is_racing:      bool,
    clock:          RaceClock,
    results:        ResultsLedger,
    events:         Vec<EventLogEntry>,
}

impl RaceSession {
    /// Generate the competitor pool. No schedule exists yet; call
    /// `new_session` (or use `build`) before racing.
    pub fn new(config: RaceConfig, time: Box<dyn TimeSource>) -> DerbyResult<Self> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let rng_bank = RngBank::new(seed);

        let mut roster_rng = rng_bank.for_stream(StreamSlot::Roster);
        let competitors = generate_competitors(config.pool_size, &mut roster_rng);

        Ok(Self {
            session_id:    uuid::Uuid::new_v4().to_string(),
            schedule_rng:  rng_bank.for_stream(StreamSlot::Schedule),
            clock:         RaceClock::new(config.lanes_per_round),
            results:       ResultsLedger::new(config.lanes_per_round),
            competitors,
            schedule:      None,
            current_round: 0,
            is_racing:     false,
            events:        Vec::new(),
            rng_bank,
            config,
            time,
        })
    }

    /// Fully wired session with a schedule already drawn.
    /// Call this instead of new() + new_session().
    pub fn build(config: RaceConfig, time: Box<dyn TimeSource>) -> DerbyResult<Self> {
        let mut session = Self::new(config, time)?;
        session.new_session()?;
        Ok(session)
    }

    // ── Session lifecycle ───────────────────────────────────────

    /// Draw a fresh schedule and reset all per-session state.
    pub fn new_session(&mut self) -> DerbyResult<()> {
        let schedule = ScheduleBuilder::build(
            &self.competitors,
            self.config.rounds,
            self.config.lanes_per_round,
            &mut self.schedule_rng,
        )?;

        let now = self.time.now_ms();
        self.schedule = Some(schedule);
        self.session_id = uuid::Uuid::new_v4().to_string();
        self.current_round = 0;
        self.is_racing = false;
        self.clock.rearm(now);
        self.results.clear();
        self.events.clear();

        log::info!(
            "session {}: new schedule, {} rounds x {} lanes (seed {})",
            self.session_id,
            self.config.rounds,
            self.config.lanes_per_round,
            self.rng_bank.seed()
        );
        self.emit(RaceEvent::SessionStarted {
            seed:   self.rng_bank.seed(),
            rounds: self.config.rounds,
            lanes:  self.config.lanes_per_round,
        });
        Ok(())
    }

    // ── Race control ────────────────────────────────────────────

    pub fn start_race(&mut self) -> DerbyResult<()> {
        self.require_schedule()?;
        if self.clock.is_finished {
            log::warn!("session {}: start_race after the last round", self.session_id);
            return Err(DerbyError::InvalidInput(
                "all rounds are finished; start a new session".into(),
            ));
        }

        let now = self.time.now_ms();
        self.is_racing = true;
        self.clock.start(now);
        log::info!("session {}: round {} started", self.session_id, self.current_round);
        self.emit(RaceEvent::RaceStarted { round: self.current_round });
        Ok(())
    }

    /// No-op before a schedule exists or once the last round is finished.
    pub fn pause_race(&mut self) {
        if self.schedule.is_none() || self.clock.is_finished {
            log::warn!("session {}: pause_race ignored, no race to pause", self.session_id);
            return;
        }
        let now = self.time.now_ms();
        self.clock.pause(now);
        self.emit(RaceEvent::RacePaused { round: self.current_round });
    }

    /// No-op unless the clock is paused.
    pub fn continue_race(&mut self) {
        let Some(paused_at) = self.clock.paused_at else { return };
        let now = self.time.now_ms();
        self.clock.resume(now);
        self.emit(RaceEvent::RaceResumed {
            round:      self.current_round,
            paused_for: now - paused_at,
        });
    }

    pub fn update_positions(&mut self, positions: Vec<f64>) -> DerbyResult<()> {
        self.clock.update_positions(positions)
    }

    /// Close the current round: advance and re-arm, or on the last round
    /// mark the session finished. Always clears the racing flag.
    pub fn finish_race(&mut self) -> DerbyResult<()> {
        self.require_schedule()?;
        let last_round = self.config.rounds - 1;

        if self.current_round < last_round {
            let from = self.current_round;
            self.current_round += 1;
            let now = self.time.now_ms();
            self.clock.rearm(now);
            log::info!("session {}: round {from} -> {}", self.session_id, self.current_round);
            self.emit(RaceEvent::RoundAdvanced { from, to: self.current_round });
        } else if !self.clock.is_finished {
            self.clock.finish();
            log::info!("session {}: all {} rounds finished", self.session_id, self.config.rounds);
            self.emit(RaceEvent::SessionFinished { last_round });
        }

        self.is_racing = false;
        Ok(())
    }

    /// Record `competitor` as the next arrival of the current round. It
    /// must be racing in the current heat and not already recorded.
    pub fn record_finish(&mut self, competitor: &Competitor) -> DerbyResult<&FinishEntry> {
        let round = self.current_round;
        let in_heat = self
            .current_heat()?
            .iter()
            .any(|entry| entry.competitor == *competitor);
        if !in_heat {
            log::warn!("session {}: {} is not in round {round}", self.session_id, competitor.name);
            return Err(DerbyError::UnknownCompetitor { name: competitor.name.clone(), round });
        }

        let entry = self.results.record_finish(round, competitor.clone())?.clone();
        self.emit(RaceEvent::FinishRecorded {
            round,
            finish_rank: entry.finish_rank,
            name:        entry.competitor.name.clone(),
        });
        Ok(&self.results.round_results(round)[entry.finish_rank])
    }

    /// `record_finish` for the current-heat competitor called `name`.
    pub fn record_finish_by_name(&mut self, name: &str) -> DerbyResult<&FinishEntry> {
        let round = self.current_round;
        let competitor = self
            .current_heat()?
            .iter()
            .find(|entry| entry.competitor.name == name)
            .map(|entry| entry.competitor.clone())
            .ok_or_else(|| DerbyError::UnknownCompetitor { name: name.to_string(), round })?;
        self.record_finish(&competitor)
    }

    /// Dispatch a presentation-layer command.
    pub fn apply(&mut self, command: RaceCommand) -> DerbyResult<()> {
        match command {
            RaceCommand::NewSession => self.new_session(),
            RaceCommand::StartRace => self.start_race(),
            RaceCommand::PauseRace => {
                self.pause_race();
                Ok(())
            }
            RaceCommand::ContinueRace => {
                self.continue_race();
                Ok(())
            }
            RaceCommand::UpdatePositions { positions } => self.update_positions(positions),
            RaceCommand::FinishRace => self.finish_race(),
            RaceCommand::RecordFinish { name } => self.record_finish_by_name(&name).map(|_| ()),
        }
    }

    // ── Queries ─────────────────────────────────────────────────

    pub fn config(&self) -> &RaceConfig { &self.config }
    pub fn seed(&self) -> u64 { self.rng_bank.seed() }
    pub fn current_round(&self) -> RoundIndex { self.current_round }
    pub fn is_racing(&self) -> bool { self.is_racing }
    pub fn clock(&self) -> &RaceClock { &self.clock }
    pub fn positions(&self) -> &[f64] { &self.clock.positions }
    pub fn elapsed_ms(&self) -> Millis { self.clock.elapsed_ms }
    pub fn is_paused(&self) -> bool { self.clock.is_paused() }
    pub fn is_finished(&self) -> bool { self.clock.is_finished }
    pub fn competitors(&self) -> &[Competitor] { &self.competitors }
    pub fn schedule(&self) -> Option<&Schedule> { self.schedule.as_ref() }
    pub fn results(&self) -> &ResultsLedger { &self.results }
    pub fn events(&self) -> &[EventLogEntry] { &self.events }

    pub fn current_heat(&self) -> DerbyResult<&[HeatEntry]> {
        self.require_schedule()?
            .heat(self.current_round)
            .ok_or(DerbyError::NoSchedule)
    }

    pub fn current_results(&self) -> &[FinishEntry] {
        self.results.round_results(self.current_round)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let now = self.time.now_ms();
        SessionSnapshot {
            session_id:    self.session_id.clone(),
            seed:          self.rng_bank.seed(),
            current_round: self.current_round,
            is_racing:     self.is_racing,
            phase:         self.clock.phase(),
            running_ms:    self.clock.running_ms(now),
            clock:         self.clock.clone(),
            competitors:   self.competitors.clone(),
            schedule:      self.schedule.clone().unwrap_or_default(),
            results:       self.results.clone(),
        }
    }

    fn require_schedule(&self) -> DerbyResult<&Schedule> {
        self.schedule.as_ref().ok_or(DerbyError::NoSchedule)
    }

    fn emit(&mut self, event: RaceEvent) {
        log::debug!("session {}: event {}", self.session_id, event.type_name());
        self.events.push(EventLogEntry {
            seq:   self.events.len() as u64,
            at_ms: self.time.now_ms(),
            event,
        });
    }
}
