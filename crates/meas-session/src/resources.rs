//! OS resource accounting (`getrusage`) snapshots.
//!
//! Every query goes to the OS; nothing is cached here. The session keeps the
//! last successful snapshot so callers can inspect it after an accessor call.

use std::io;
use std::time::Duration;

use meas_core::error::{MeasError, Result};

/// Which population a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The calling process.
    SelfProcess,
    /// Terminated and waited-for children.
    Children,
    /// The calling thread (Linux only).
    Thread,
}

impl Scope {
    fn who(self) -> Result<libc::c_int> {
        match self {
            Scope::SelfProcess => Ok(libc::RUSAGE_SELF),
            Scope::Children => Ok(libc::RUSAGE_CHILDREN),
            #[cfg(target_os = "linux")]
            Scope::Thread => Ok(libc::RUSAGE_THREAD),
            #[cfg(not(target_os = "linux"))]
            Scope::Thread => Err(MeasError::ResourceQuery(
                "thread scope is not supported on this platform".into(),
            )),
        }
    }
}

/// One `getrusage` result. Sizes are in kilobytes (or kilobyte-ticks for the
/// integral fields), as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceUsage {
    pub user_time: Duration,
    pub system_time: Duration,
    pub max_resident: i64,
    pub shared_memory: i64,
    pub data_size: i64,
    pub stack_size: i64,
    pub minor_faults: i64,
    pub major_faults: i64,
    pub swaps: i64,
    pub signals: i64,
    pub block_input: i64,
    pub block_output: i64,
    pub voluntary_switches: i64,
    pub involuntary_switches: i64,
}

impl ResourceUsage {
    /// Voluntary plus involuntary context switches.
    pub fn context_switches(&self) -> i64 {
        self.voluntary_switches + self.involuntary_switches
    }

    fn from_raw(raw: &libc::rusage) -> Self {
        Self {
            user_time: duration(raw.ru_utime),
            system_time: duration(raw.ru_stime),
            max_resident: raw.ru_maxrss as i64,
            shared_memory: raw.ru_ixrss as i64,
            data_size: raw.ru_idrss as i64,
            stack_size: raw.ru_isrss as i64,
            minor_faults: raw.ru_minflt as i64,
            major_faults: raw.ru_majflt as i64,
            swaps: raw.ru_nswap as i64,
            signals: raw.ru_nsignals as i64,
            block_input: raw.ru_inblock as i64,
            block_output: raw.ru_oublock as i64,
            voluntary_switches: raw.ru_nvcsw as i64,
            involuntary_switches: raw.ru_nivcsw as i64,
        }
    }
}

fn duration(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
}

/// Query the OS for a fresh snapshot.
pub fn query(scope: Scope) -> Result<ResourceUsage> {
    let who = scope.who()?;
    let mut raw: libc::rusage = unsafe { std::mem::zeroed() };
    let rc = unsafe { libc::getrusage(who, &mut raw) };
    if rc < 0 {
        return Err(MeasError::ResourceQuery(format!(
            "getrusage({scope:?}): {}",
            io::Error::last_os_error()
        )));
    }
    Ok(ResourceUsage::from_raw(&raw))
}
