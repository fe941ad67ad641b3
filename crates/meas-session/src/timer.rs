//! Named interval timers.
//!
//! State machine: `Running` -> `stop` -> `Stopped` -> `restart` -> `Running`.
//! Stopping a stopped timer is rejected and keeps the recorded interval.
//! Restarting keeps the last interval until the next stop.

use std::fmt;

use meas_core::error::{MeasError, Result};
use meas_core::BoundedName;

use crate::ticks::TickSource;

/// Handle to a timer registered in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub(crate) u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Running,
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Timer {
    id: TimerId,
    name: BoundedName,
    state: TimerState,
    start_tick: u64,
    end_tick: u64,
    elapsed_ticks: u64,
}

impl Timer {
    pub(crate) fn started(id: TimerId, name: &str, ticks: &dyn TickSource) -> Self {
        Self {
            id,
            name: BoundedName::new(name),
            state: TimerState::Running,
            start_tick: ticks.read_ticks(),
            end_tick: 0,
            elapsed_ticks: 0,
        }
    }

    /// Rename and start again from the current tick.
    pub(crate) fn restart(&mut self, name: &str, ticks: &dyn TickSource) {
        self.name = BoundedName::new(name);
        self.state = TimerState::Running;
        self.start_tick = ticks.read_ticks();
    }

    /// Capture the end tick and return the elapsed ticks (wrapping).
    pub(crate) fn stop(&mut self, ticks: &dyn TickSource) -> Result<u64> {
        if self.state == TimerState::Stopped {
            return Err(MeasError::AlreadyStopped(format!("{} ({})", self.id, self.name)));
        }
        self.end_tick = ticks.read_ticks();
        self.elapsed_ticks = self.end_tick.wrapping_sub(self.start_tick);
        self.state = TimerState::Stopped;
        Ok(self.elapsed_ticks)
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    pub fn name(&self) -> &BoundedName {
        &self.name
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn start_tick(&self) -> u64 {
        self.start_tick
    }

    pub fn end_tick(&self) -> u64 {
        self.end_tick
    }

    /// Ticks between the last start and stop; 0 until the first stop.
    pub fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }
}
