//! derby-core: state and sequencing for a multi-round horse race.
//!
//! Rendering, animation and persistence live elsewhere; this crate only
//! owns the schedule, the round clock and the results.

pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod ledger;
pub mod name_generator;
pub mod rng;
pub mod roster;
pub mod schedule;
pub mod session;
pub mod snapshot;
pub mod time;
pub mod types;
