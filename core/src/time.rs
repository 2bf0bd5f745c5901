//! Where "now" comes from.

use crate::types::Millis;
use std::{cell::Cell, rc::Rc};

pub trait TimeSource {
    /// Current instant in epoch milliseconds.
    fn now_ms(&self) -> Millis;
}

/// Host wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_ms(&self) -> Millis {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Explicitly advanced clock. Clones share the same instant, so a test
/// can keep a handle while the session owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualTimeSource {
    now: Rc<Cell<Millis>>,
}

impl ManualTimeSource {
    pub fn starting_at(now: Millis) -> Self {
        Self { now: Rc::new(Cell::new(now)) }
    }

    pub fn advance(&self, ms: Millis) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, now: Millis) {
        self.now.set(now);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_ms(&self) -> Millis {
        self.now.get()
    }
}
