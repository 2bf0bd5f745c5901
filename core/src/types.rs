//! Shared primitive types used across the entire race core.

/// Wall-clock instant in milliseconds since the Unix epoch.
pub type Millis = i64;

/// Zero-based round index into the schedule and the results ledger.
pub type RoundIndex = usize;

/// Zero-based lane (track position) within a heat.
pub type Lane = usize;

/// The canonical session identifier.
pub type SessionId = String;
