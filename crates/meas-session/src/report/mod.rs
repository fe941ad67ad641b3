//! Plain-text session reports.
//!
//! A report is a fixed-width table built into a [`TextBuffer`]: banner,
//! generation timestamp, then the selected sections in a fixed order
//! (timers, counters, user items). Rows keep registration order.
//!
//! [`TextBuffer`]: meas_core::TextBuffer

pub mod format;
pub(crate) mod render;

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use meas_core::BoundedName;

pub use format::ValueFormat;

/// Section selection bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sections(u8);

impl Sections {
    pub const NONE: Sections = Sections(0);
    pub const TIMERS: Sections = Sections(0x01);
    pub const COUNTERS: Sections = Sections(0x02);
    pub const USER_ITEMS: Sections = Sections(0x04);
    pub const ALL: Sections = Sections(0x07);

    /// Build from raw bits; unknown bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Sections(bits & Self::ALL.0)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Sections) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Sections {
    type Output = Sections;

    fn bitor(self, rhs: Sections) -> Sections {
        Sections(self.0 | rhs.0)
    }
}

impl BitOrAssign for Sections {
    fn bitor_assign(&mut self, rhs: Sections) {
        self.0 |= rhs.0;
    }
}

/// Handle to a user report item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub(crate) u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// Free-form measurement added by the caller.
#[derive(Debug, Clone)]
pub struct ReportItem {
    id: ItemId,
    name: BoundedName,
    format: ValueFormat,
    value: i64,
}

impl ReportItem {
    pub(crate) fn new(id: ItemId, name: &str, format: ValueFormat, value: i64) -> Self {
        Self {
            id,
            name: BoundedName::new(name),
            format,
            value,
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &BoundedName {
        &self.name
    }

    pub fn format(&self) -> ValueFormat {
        self.format
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Value as it appears in the report.
    pub fn rendered_value(&self) -> String {
        self.format.render(self.value)
    }
}
