//! meas session library entry.
//!
//! This crate wires config, tick sources, counters, timers, resource
//! accounting and report rendering into one [`Session`]. It is intended to be
//! consumed by instrumented applications, by the `meas-demo` binary, and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod counter;
pub mod report;
pub mod resources;
pub mod session;
pub mod ticks;
pub mod timer;

pub use counter::{Counter, CounterId, CounterState};
pub use report::{ItemId, ReportItem, Sections, ValueFormat};
pub use resources::{ResourceUsage, Scope};
pub use session::Session;
pub use ticks::{ManualTicks, TickSource, TickSourceKind, GETJIFFIES_SYSCALL};
pub use timer::{Timer, TimerId, TimerState};
