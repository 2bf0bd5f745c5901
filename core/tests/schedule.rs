//! Schedule generation tests.

use derby_core::{
    error::DerbyError,
    rng::{RngBank, StreamRng, StreamSlot},
    roster::{generate_competitors, Competitor},
    schedule::{Schedule, ScheduleBuilder},
};
use std::collections::HashSet;

fn pool(size: usize, seed: u64) -> Vec<Competitor> {
    generate_competitors(size, &mut RngBank::new(seed).for_stream(StreamSlot::Roster))
}

fn schedule_rng(seed: u64) -> StreamRng {
    RngBank::new(seed).for_stream(StreamSlot::Schedule)
}

fn assert_well_formed(schedule: &Schedule, rounds: usize, lanes: usize) {
    assert_eq!(schedule.round_count(), rounds, "Wrong number of rounds");
    for round in 0..rounds {
        let heat = schedule.heat(round).expect("every round has a heat");
        assert_eq!(heat.len(), lanes, "Round {round} has {} lanes", heat.len());

        let lane_set: Vec<usize> = heat.iter().map(|e| e.lane).collect();
        assert_eq!(lane_set, (0..lanes).collect::<Vec<_>>(), "Round {round} lanes not 0..{lanes}");

        let names: HashSet<&str> = heat.iter().map(|e| e.competitor.name.as_str()).collect();
        assert_eq!(names.len(), lanes, "Round {round} repeats a competitor");
    }
}

#[test]
fn twenty_horses_six_rounds_eight_lanes() {
    let horses = pool(20, 1);
    let schedule = ScheduleBuilder::build(&horses, 6, 8, &mut schedule_rng(1)).unwrap();
    assert_well_formed(&schedule, 6, 8);

    let pool_names: HashSet<&str> = horses.iter().map(|h| h.name.as_str()).collect();
    for (_, heat) in schedule.iter() {
        for entry in heat {
            assert!(pool_names.contains(entry.competitor.name.as_str()));
        }
    }
}

#[test]
fn pool_smaller_than_lanes_is_a_configuration_error() {
    let horses = pool(5, 2);
    let result = ScheduleBuilder::build(&horses, 1, 8, &mut schedule_rng(2));
    assert!(
        matches!(result, Err(DerbyError::Configuration(_))),
        "Expected ConfigurationError, got {result:?}"
    );
}

#[test]
fn pool_equal_to_lanes_uses_everyone_each_round() {
    let horses = pool(10, 3);
    let schedule = ScheduleBuilder::build(&horses, 4, 10, &mut schedule_rng(3)).unwrap();
    assert_well_formed(&schedule, 4, 10);
    for (name, count) in schedule.appearances() {
        assert_eq!(count, 4, "{name} should race every round");
    }
}

#[test]
fn repeated_builds_keep_the_same_shape() {
    let horses = pool(20, 4);
    let mut rng = schedule_rng(4);
    let first = ScheduleBuilder::build(&horses, 6, 10, &mut rng).unwrap();
    let second = ScheduleBuilder::build(&horses, 6, 10, &mut rng).unwrap();
    assert_well_formed(&first, 6, 10);
    assert_well_formed(&second, 6, 10);
    assert_ne!(first, second, "Consecutive draws from one stream should differ");
}

#[test]
fn build_does_not_mutate_the_pool() {
    let horses = pool(20, 5);
    let before = horses.clone();
    ScheduleBuilder::build(&horses, 6, 10, &mut schedule_rng(5)).unwrap();
    assert_eq!(horses, before);
}

#[test]
fn heats_hold_their_own_copies() {
    let mut horses = pool(20, 6);
    let schedule = ScheduleBuilder::build(&horses, 2, 10, &mut schedule_rng(6)).unwrap();
    let snapshot = schedule.clone();

    for horse in &mut horses {
        horse.name.push_str(" (renamed)");
        horse.condition = 1;
    }

    assert_eq!(schedule, snapshot, "Mutating the pool must not touch the schedule");
    for (_, heat) in schedule.iter() {
        assert!(heat.iter().all(|e| !e.competitor.name.ends_with("(renamed)")));
    }
}

#[test]
fn rounds_draw_independently_from_the_full_pool() {
    // Independent per-round draws do not balance appearances exactly.
    let horses = pool(20, 7);
    let schedule = ScheduleBuilder::build(&horses, 50, 10, &mut schedule_rng(7)).unwrap();
    let appearances = schedule.appearances();
    let total: usize = appearances.values().sum();
    assert_eq!(total, 500);
    let max = appearances.values().copied().max().unwrap_or(0);
    let min = horses
        .iter()
        .map(|h| appearances.get(h.name.as_str()).copied().unwrap_or(0))
        .min()
        .unwrap_or(0);
    assert!(max > min, "Independent draws should not balance exactly (min {min}, max {max})");
}
