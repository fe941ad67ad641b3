//! Report layout. Every line goes through `TextBuffer::append`, so a failed
//! growth stops rendering with `AllocationFailed`.

use meas_core::error::Result;
use meas_core::{OwnedList, TextBuffer};

use crate::counter::Counter;
use crate::timer::Timer;

use super::{ReportItem, Sections};

const BANNER: [&str; 4] = [
    "****************************************************************\n",
    "* libmeas - A measurement system for critical embedded systems *\n",
    "*                       ANALYSIS REPORT                        *\n",
    "****************************************************************\n\n",
];

const RULE: &str = "================================================================\n";
const TRAILER: &str = "----------------------------------------------------------------\n\n";

/// Borrowed view over the session state a report reads.
pub(crate) struct ReportView<'a> {
    pub timers: &'a OwnedList<Timer>,
    pub counters: &'a OwnedList<Counter>,
    pub items: &'a OwnedList<ReportItem>,
    pub name_width: usize,
}

pub(crate) fn render(
    out: &mut TextBuffer,
    view: &ReportView<'_>,
    sections: Sections,
    generated_at: &str,
) -> Result<()> {
    for line in BANNER {
        out.append(line)?;
    }
    out.append(&format!(" Generated on {generated_at}\n\n"))?;

    if sections.contains(Sections::TIMERS) {
        let rows = view
            .timers
            .iter()
            .map(|t| (t.name().as_str(), t.elapsed_ticks().to_string()));
        section(out, view.name_width, " TIMERS ", ("TIMER NAME", "NUMBER OF TICKS"), rows)?;
    }

    if sections.contains(Sections::COUNTERS) {
        let rows = view
            .counters
            .iter()
            .map(|c| (c.name().as_str(), c.value().to_string()));
        section(out, view.name_width, " COUNTERS ", ("COUNTER NAME", "VALUE"), rows)?;
    }

    if sections.contains(Sections::USER_ITEMS) {
        let rows = view
            .items
            .iter()
            .map(|i| (i.name().as_str(), i.rendered_value()));
        section(out, view.name_width, " USER ITEMS ", ("ITEM NAME", "VALUE"), rows)?;
    }

    Ok(())
}

fn section<'a, I>(
    out: &mut TextBuffer,
    width: usize,
    title: &str,
    columns: (&str, &str),
    rows: I,
) -> Result<()>
where
    I: Iterator<Item = (&'a str, String)>,
{
    out.append(&format!("{title:=^64}\n"))?;
    out.append(&row(width, columns.0, columns.1))?;
    out.append(RULE)?;
    for (name, value) in rows {
        out.append(&row(width, name, &value))?;
    }
    out.append(TRAILER)
}

/// ` <name padded to width>   <value>`
fn row(width: usize, name: &str, value: &str) -> String {
    format!(" {name:<width$}   {value}\n")
}
