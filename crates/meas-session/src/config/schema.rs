use serde::Deserialize;

use meas_core::error::{MeasError, Result};
use meas_core::name::MAX_NAME_CHARS;
use meas_core::text::DEFAULT_GROWTH_QUANTUM;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MeasConfig {
    pub version: u32,

    #[serde(default)]
    pub ticks: TicksSection,

    #[serde(default)]
    pub report: ReportSection,
}

impl Default for MeasConfig {
    fn default() -> Self {
        Self {
            version: 1,
            ticks: TicksSection::default(),
            report: ReportSection::default(),
        }
    }
}

impl MeasConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MeasError::UnsupportedVersion);
        }
        self.report.validate()?;
        Ok(())
    }
}

/// Which clock backs every timer of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPreference {
    /// Probe the jiffies syscall once, fall back to `times()`.
    #[default]
    Auto,
    /// Require the patched-kernel jiffies syscall.
    JiffiesSyscall,
    /// Always use `times()`.
    ProcessTimes,
}

/// The jiffies syscall number is fixed ([`crate::ticks::GETJIFFIES_SYSCALL`]);
/// only the choice of source is configurable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TicksSection {
    #[serde(default)]
    pub source: TickPreference,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportSection {
    #[serde(default = "default_growth_quantum")]
    pub growth_quantum: usize,

    #[serde(default = "default_name_width")]
    pub name_width: usize,
}

impl Default for ReportSection {
    fn default() -> Self {
        Self {
            growth_quantum: default_growth_quantum(),
            name_width: default_name_width(),
        }
    }
}

impl ReportSection {
    pub fn validate(&self) -> Result<()> {
        if !(64..=1_048_576).contains(&self.growth_quantum) {
            return Err(MeasError::BadConfig(
                "report.growth_quantum must be between 64 and 1048576".into(),
            ));
        }
        if !(MAX_NAME_CHARS + 1..=128).contains(&self.name_width) {
            return Err(MeasError::BadConfig(format!(
                "report.name_width must be between {} and 128",
                MAX_NAME_CHARS + 1
            )));
        }
        Ok(())
    }
}

fn default_growth_quantum() -> usize {
    DEFAULT_GROWTH_QUANTUM
}
fn default_name_width() -> usize {
    MAX_NAME_CHARS + 1
}
