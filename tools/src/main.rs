//! derby-runner: headless race runner.
//!
//! Usage:
//!   derby-runner --seed 12345
//!   derby-runner --config race.json
//!   derby-runner --seed 12345 --ipc-mode

use anyhow::Result;
use derby_core::{
    command::RaceCommand,
    config::RaceConfig,
    ledger::ordinal_label,
    rng::{RngBank, StreamRng, StreamSlot},
    session::RaceSession,
    time::{ManualTimeSource, SystemTimeSource},
};
use std::env;
use std::io::{self, BufRead, Write};

/// Track length in position units; a lane crossing it has finished.
const TRACK_LENGTH: f64 = 100.0;
/// Simulated wall time per auto-driver step.
const STEP_MS: i64 = 100;
/// Per-step probability that a lane loses half its stride.
const STUMBLE_CHANCE: f64 = 0.02;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: RaceCommand },
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let mut config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => RaceConfig::load(&w[1])?,
        None => RaceConfig::default(),
    };
    if let Some(seed) = parse_arg::<u64>(&args, "--seed") {
        config.seed = Some(seed);
    }

    if ipc_mode {
        let mut session = RaceSession::build(config, Box::new(SystemTimeSource))?;
        run_ipc_loop(&mut session)
    } else {
        run_auto(config)
    }
}

fn run_ipc_loop(session: &mut RaceSession) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("ipc: unparseable command: {e}");
                writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&session.snapshot())?)?;
            }
            IpcCommand::Command { command } => match session.apply(command) {
                Ok(()) => writeln!(stdout, "{}", serde_json::to_string(&session.snapshot())?)?,
                Err(e) => writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?,
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

/// Run every round of one session to completion on a simulated clock.
fn run_auto(config: RaceConfig) -> Result<()> {
    let time = ManualTimeSource::starting_at(0);
    let mut session = RaceSession::build(config, Box::new(time.clone()))?;
    let mut pace = RngBank::new(session.seed()).for_stream(StreamSlot::Pace);

    println!("Derby: derby-runner");
    println!("  session:  {}", session.session_id);
    println!("  seed:     {}", session.seed());
    println!("  rounds:   {}", session.config().rounds);
    println!("  lanes:    {}", session.config().lanes_per_round);
    println!();

    while !session.is_finished() {
        let round = session.current_round();
        session.start_race()?;
        let race_ms = drive_heat(&mut session, &time, &mut pace)?;

        println!("=== ROUND {} ({:.1}s) ===", round + 1, race_ms as f64 / 1000.0);
        for entry in session.current_results() {
            println!(
                "  {:>4}  {:<20} cond {:>3}  {}",
                ordinal_label(entry.finish_rank + 1),
                entry.competitor.name,
                entry.competitor.condition,
                entry.competitor.color
            );
        }
        println!();
        session.finish_race()?;
    }

    println!("=== WINNERS ===");
    for (round, _) in session.results().iter() {
        if let Some(winner) = session.results().winner(round) {
            println!("  round {}: {}", round + 1, winner.name);
        }
    }
    Ok(())
}

/// Advance lanes with a condition-weighted random walk until every lane
/// crosses the line, recording arrivals in order. Returns the race time.
fn drive_heat(
    session: &mut RaceSession,
    time: &ManualTimeSource,
    pace: &mut StreamRng,
) -> Result<i64> {
    let heat: Vec<_> = session.current_heat()?.to_vec();
    let mut positions = vec![0.0; heat.len()];
    let mut finished = vec![false; heat.len()];
    let mut elapsed = 0;

    while finished.iter().any(|f| !f) {
        time.advance(STEP_MS);
        elapsed += STEP_MS;
        for (pos, entry) in positions.iter_mut().zip(&heat) {
            let form = f64::from(entry.competitor.condition) / 100.0;
            let mut stride = 0.5 + form * 0.6 + pace.next_f64() * 0.8;
            if pace.chance(STUMBLE_CHANCE) {
                stride *= 0.5;
            }
            *pos += stride;
        }
        session.update_positions(positions.clone())?;

        // Lanes crossing on the same step arrive furthest-first.
        let mut crossed: Vec<usize> = (0..heat.len())
            .filter(|&lane| !finished[lane] && positions[lane] >= TRACK_LENGTH)
            .collect();
        crossed.sort_by(|&a, &b| positions[b].total_cmp(&positions[a]));
        for lane in crossed {
            finished[lane] = true;
            session.record_finish(&heat[lane].competitor)?;
        }
    }
    Ok(elapsed)
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
