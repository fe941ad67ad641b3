//! Named counters.
//!
//! Values are `u64` with wrapping arithmetic: decrementing a zero counter
//! yields `u64::MAX`. This is caller-visible behavior, not an error.

use std::fmt;

use meas_core::BoundedName;

/// Handle to a counter registered in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CounterId(pub(crate) u64);

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "counter#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    Counting,
    /// Increments and decrements are ignored; `set` still applies.
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Counter {
    id: CounterId,
    name: BoundedName,
    value: u64,
    state: CounterState,
}

impl Counter {
    pub(crate) fn new(id: CounterId, initial: u64, name: &str) -> Self {
        Self {
            id,
            name: BoundedName::new(name),
            value: initial,
            state: CounterState::Counting,
        }
    }

    pub fn id(&self) -> CounterId {
        self.id
    }

    pub fn name(&self) -> &BoundedName {
        &self.name
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn state(&self) -> CounterState {
        self.state
    }

    /// Overwrite the value and return it.
    pub fn set(&mut self, value: u64) -> u64 {
        self.value = value;
        self.value
    }

    pub fn increment(&mut self) -> u64 {
        self.step(u64::wrapping_add, "increment")
    }

    pub fn decrement(&mut self) -> u64 {
        self.step(u64::wrapping_sub, "decrement")
    }

    fn step(&mut self, op: fn(u64, u64) -> u64, action: &'static str) -> u64 {
        match self.state {
            CounterState::Counting => self.value = op(self.value, 1),
            CounterState::Stopped => {
                tracing::debug!(id = %self.id, action, value = self.value, "counter stopped; step ignored");
            }
        }
        self.value
    }

    pub fn stop(&mut self) {
        self.state = CounterState::Stopped;
    }

    pub fn resume(&mut self) {
        self.state = CounterState::Counting;
    }
}
