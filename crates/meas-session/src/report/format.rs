//! Closed set of numeric renderings for user report items.

use std::str::FromStr;

use meas_core::error::{MeasError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueFormat {
    /// Signed decimal.
    #[default]
    Decimal,
    /// Decimal of the two's-complement bit pattern.
    Unsigned,
    LowerHex,
    UpperHex,
    Octal,
}

impl ValueFormat {
    pub fn render(self, value: i64) -> String {
        match self {
            ValueFormat::Decimal => value.to_string(),
            ValueFormat::Unsigned => (value as u64).to_string(),
            ValueFormat::LowerHex => format!("{value:x}"),
            ValueFormat::UpperHex => format!("{value:X}"),
            ValueFormat::Octal => format!("{value:o}"),
        }
    }

    /// Map a single-integer printf conversion (`"%d"`, `" %ld\n"`, `"%x"`, ...)
    /// onto a format. Surrounding whitespace is ignored; anything else, such as
    /// literal text, width flags or a second conversion, is rejected.
    pub fn from_printf(conversion: &str) -> Result<Self> {
        match conversion.trim() {
            "%d" | "%i" | "%ld" | "%li" | "%lld" | "%lli" => Ok(ValueFormat::Decimal),
            "%u" | "%lu" | "%llu" => Ok(ValueFormat::Unsigned),
            "%x" | "%lx" | "%llx" => Ok(ValueFormat::LowerHex),
            "%X" | "%lX" | "%llX" => Ok(ValueFormat::UpperHex),
            "%o" | "%lo" | "%llo" => Ok(ValueFormat::Octal),
            _ => Err(MeasError::ContractViolation(format!(
                "unsupported value format {conversion:?}"
            ))),
        }
    }
}

impl FromStr for ValueFormat {
    type Err = MeasError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_printf(s)
    }
}
