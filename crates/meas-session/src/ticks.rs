//! Tick sources backing session timers.
//!
//! A session picks its source once, at construction, from
//! [`TickPreference`](crate::config::TickPreference):
//! - `JiffiesSyscall`: a low-overhead clock-tick syscall only present on
//!   patched kernels, at the fixed number [`GETJIFFIES_SYSCALL`].
//! - `ProcessTimes`: the portable `times()` call, in `sysconf(_SC_CLK_TCK)` units.
//!
//! Timers only ever call [`TickSource::read_ticks`]. Both OS counters may wrap;
//! elapsed intervals are computed with wrapping subtraction.

use std::cell::Cell;
use std::io;
use std::rc::Rc;

use meas_core::error::{MeasError, Result};

use crate::config::{TickPreference, TicksSection};

/// Which clock a [`TickSource`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickSourceKind {
    JiffiesSyscall,
    ProcessTimes,
    Manual,
}

impl TickSourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TickSourceKind::JiffiesSyscall => "jiffies_syscall",
            TickSourceKind::ProcessTimes => "process_times",
            TickSourceKind::Manual => "manual",
        }
    }
}

/// Monotonic tick counter for the life of the process.
pub trait TickSource {
    fn read_ticks(&self) -> u64;

    fn kind(&self) -> TickSourceKind;
}

/// Number of the patched-kernel `getjiffies` syscall. It lies outside every
/// range the mainline kernel assigns, so an unpatched kernel answers `ENOSYS`.
pub const GETJIFFIES_SYSCALL: i64 = 500;

/// Patched-kernel jiffies syscall. Only obtainable through [`JiffiesSyscall::probe`].
#[derive(Debug, Clone, Copy)]
pub struct JiffiesSyscall(());

impl JiffiesSyscall {
    /// Return the source if [`GETJIFFIES_SYSCALL`] answers without error.
    pub fn probe() -> Option<Self> {
        match raw_syscall(GETJIFFIES_SYSCALL) {
            Ok(_) => Some(Self(())),
            Err(e) => {
                tracing::debug!(number = GETJIFFIES_SYSCALL, error = %e, "jiffies syscall not available");
                None
            }
        }
    }
}

impl TickSource for JiffiesSyscall {
    fn read_ticks(&self) -> u64 {
        match raw_syscall(GETJIFFIES_SYSCALL) {
            Ok(ticks) => ticks,
            Err(e) => {
                tracing::warn!(error = %e, "jiffies syscall failed; reading 0");
                0
            }
        }
    }

    fn kind(&self) -> TickSourceKind {
        TickSourceKind::JiffiesSyscall
    }
}

#[cfg(target_os = "linux")]
fn raw_syscall(number: i64) -> io::Result<u64> {
    let ret = unsafe { libc::syscall(number as libc::c_long) };
    if ret < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(ret as u64)
}

#[cfg(not(target_os = "linux"))]
fn raw_syscall(_number: i64) -> io::Result<u64> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}

/// Elapsed clock ticks from `times()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessTimes;

impl TickSource for ProcessTimes {
    fn read_ticks(&self) -> u64 {
        let mut buf: libc::tms = unsafe { std::mem::zeroed() };
        let ticks = unsafe { libc::times(&mut buf) };
        if ticks == !(0 as libc::clock_t) {
            tracing::warn!(error = %io::Error::last_os_error(), "times() failed; reading 0");
            return 0;
        }
        ticks as u64
    }

    fn kind(&self) -> TickSourceKind {
        TickSourceKind::ProcessTimes
    }
}

/// Clock ticks per second for [`ProcessTimes`] readings.
pub fn ticks_per_second() -> Option<u64> {
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    (hz > 0).then_some(hz as u64)
}

/// Caller-driven tick source; clones share one counter.
#[derive(Debug, Clone, Default)]
pub struct ManualTicks {
    now: Rc<Cell<u64>>,
}

impl ManualTicks {
    pub fn new(start: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, ticks: u64) {
        self.now.set(ticks);
    }

    pub fn advance(&self, ticks: u64) {
        self.now.set(self.now.get().wrapping_add(ticks));
    }
}

impl TickSource for ManualTicks {
    fn read_ticks(&self) -> u64 {
        self.now.get()
    }

    fn kind(&self) -> TickSourceKind {
        TickSourceKind::Manual
    }
}

/// Build the tick source requested by `cfg`.
pub fn select(cfg: &TicksSection) -> Result<Box<dyn TickSource>> {
    match cfg.source {
        TickPreference::Auto => Ok(match JiffiesSyscall::probe() {
            Some(src) => Box::new(src),
            None => Box::new(ProcessTimes),
        }),
        TickPreference::JiffiesSyscall => JiffiesSyscall::probe()
            .map(|src| Box::new(src) as Box<dyn TickSource>)
            .ok_or_else(|| {
                MeasError::ResourceQuery(format!(
                    "jiffies syscall {GETJIFFIES_SYSCALL} not available"
                ))
            }),
        TickPreference::ProcessTimes => Ok(Box::new(ProcessTimes)),
    }
}
