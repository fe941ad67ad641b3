//! Measurement session: the single owner of every counter, timer, report item
//! and the current report.
//!
//! Entities are addressed through copyable ids. An id whose entity was removed
//! yields `UnknownHandle`, never a panic. A session is meant for one thread;
//! nothing here locks.

use std::io::Write;

use time::macros::format_description;
use time::OffsetDateTime;

use meas_core::error::{MeasError, Result};
use meas_core::{OwnedList, TextBuffer};

use crate::config::MeasConfig;
use crate::counter::{Counter, CounterId};
use crate::report::render::{self, ReportView};
use crate::report::{ItemId, ReportItem, Sections, ValueFormat};
use crate::resources::{self, ResourceUsage, Scope};
use crate::ticks::{self, TickSource, TickSourceKind};
use crate::timer::{Timer, TimerId};

pub struct Session {
    config: MeasConfig,
    ticks: Box<dyn TickSource>,
    counters: OwnedList<Counter>,
    timers: OwnedList<Timer>,
    report_items: OwnedList<ReportItem>,
    resources: Option<ResourceUsage>,
    report: Option<TextBuffer>,
    next_id: u64,
}

impl Session {
    /// Session with default config (tick source probed once here).
    pub fn new() -> Result<Self> {
        Self::with_config(MeasConfig::default())
    }

    pub fn with_config(config: MeasConfig) -> Result<Self> {
        let ticks = ticks::select(&config.ticks)?;
        Self::with_tick_source(config, ticks)
    }

    /// Session reading time from an explicit source. Every constructor ends
    /// here, so this is where `config` is validated.
    pub fn with_tick_source(config: MeasConfig, ticks: Box<dyn TickSource>) -> Result<Self> {
        config.validate()?;
        tracing::info!(tick_source = ticks.kind().as_str(), "measurement session initialized");
        Ok(Self {
            config,
            ticks,
            counters: OwnedList::new(),
            timers: OwnedList::new(),
            report_items: OwnedList::new(),
            resources: None,
            report: None,
            next_id: 1,
        })
    }

    /// Release everything the session owns.
    pub fn close(self) {
        tracing::debug!(
            counters = self.counters.len(),
            timers = self.timers.len(),
            items = self.report_items.len(),
            "measurement session closed"
        );
    }

    pub fn config(&self) -> &MeasConfig {
        &self.config
    }

    pub fn tick_source_kind(&self) -> TickSourceKind {
        self.ticks.kind()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ----- counters -----

    /// Register a counter starting at `initial`.
    pub fn create_counter(&mut self, initial: u64, name: &str) -> CounterId {
        let id = CounterId(self.next_id());
        self.counters.push_back(Counter::new(id, initial, name));
        tracing::debug!(%id, name, initial, "counter registered");
        id
    }

    pub fn counter(&self, id: CounterId) -> Option<&Counter> {
        self.counters.find(|c| c.id() == id)
    }

    fn counter_mut(&mut self, id: CounterId) -> Result<&mut Counter> {
        self.counters
            .find_mut(|c| c.id() == id)
            .ok_or_else(|| MeasError::UnknownHandle(id.to_string()))
    }

    /// Current value; reading never changes the counter.
    pub fn counter_value(&self, id: CounterId) -> Result<u64> {
        self.counter(id)
            .map(Counter::value)
            .ok_or_else(|| MeasError::UnknownHandle(id.to_string()))
    }

    pub fn set_counter(&mut self, id: CounterId, value: u64) -> Result<u64> {
        Ok(self.counter_mut(id)?.set(value))
    }

    pub fn increment(&mut self, id: CounterId) -> Result<u64> {
        Ok(self.counter_mut(id)?.increment())
    }

    /// Decrement by one; zero wraps to `u64::MAX`.
    pub fn decrement(&mut self, id: CounterId) -> Result<u64> {
        Ok(self.counter_mut(id)?.decrement())
    }

    pub fn stop_counter(&mut self, id: CounterId) -> Result<()> {
        self.counter_mut(id)?.stop();
        Ok(())
    }

    pub fn resume_counter(&mut self, id: CounterId) -> Result<()> {
        self.counter_mut(id)?.resume();
        Ok(())
    }

    pub fn remove_counter(&mut self, id: CounterId) -> Result<Counter> {
        self.counters
            .remove_first(|c| c.id() == id)
            .map_err(|_| MeasError::UnknownHandle(id.to_string()))
    }

    pub fn counters(&self) -> impl Iterator<Item = &Counter> {
        self.counters.iter()
    }

    pub fn counter_count(&self) -> usize {
        self.counters.len()
    }

    // ----- timers -----

    /// Register a new timer and start it.
    pub fn start_timer(&mut self, name: &str) -> TimerId {
        let id = TimerId(self.next_id());
        let timer = Timer::started(id, name, self.ticks.as_ref());
        tracing::debug!(%id, name, start = timer.start_tick(), "timer started");
        self.timers.push_back(timer);
        id
    }

    /// Restart an existing timer in place under `name`.
    pub fn restart_timer(&mut self, id: TimerId, name: &str) -> Result<()> {
        let ticks = self.ticks.as_ref();
        let timer = self
            .timers
            .find_mut(|t| t.id() == id)
            .ok_or_else(|| MeasError::UnknownHandle(id.to_string()))?;
        timer.restart(name, ticks);
        tracing::debug!(%id, name, start = timer.start_tick(), "timer restarted");
        Ok(())
    }

    /// Stop a running timer and return its elapsed ticks.
    pub fn stop_timer(&mut self, id: TimerId) -> Result<u64> {
        let ticks = self.ticks.as_ref();
        let timer = self
            .timers
            .find_mut(|t| t.id() == id)
            .ok_or_else(|| MeasError::UnknownHandle(id.to_string()))?;
        timer.stop(ticks).inspect_err(|e| {
            tracing::warn!(%id, error = %e, "timer stop rejected");
        })
    }

    pub fn timer(&self, id: TimerId) -> Option<&Timer> {
        self.timers.find(|t| t.id() == id)
    }

    pub fn remove_timer(&mut self, id: TimerId) -> Result<Timer> {
        self.timers
            .remove_first(|t| t.id() == id)
            .map_err(|_| MeasError::UnknownHandle(id.to_string()))
    }

    pub fn timers(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    pub fn timer_count(&self) -> usize {
        self.timers.len()
    }

    // ----- report items -----

    pub fn add_report_item(&mut self, name: &str, format: ValueFormat, value: i64) -> ItemId {
        let id = ItemId(self.next_id());
        self.report_items
            .push_back(ReportItem::new(id, name, format, value));
        tracing::debug!(%id, name, value, "report item added");
        id
    }

    pub fn remove_report_item(&mut self, id: ItemId) -> Result<ReportItem> {
        self.report_items
            .remove_first(|i| i.id() == id)
            .map_err(|_| MeasError::UnknownHandle(id.to_string()))
    }

    pub fn report_items(&self) -> impl Iterator<Item = &ReportItem> {
        self.report_items.iter()
    }

    pub fn item_count(&self) -> usize {
        self.report_items.len()
    }

    // ----- resources -----

    /// Fresh snapshot for `scope`, kept as the session's last snapshot.
    /// On failure the previous snapshot is left in place.
    pub fn sample_resources(&mut self, scope: Scope) -> Result<&ResourceUsage> {
        match resources::query(scope) {
            Ok(usage) => Ok(&*self.resources.insert(usage)),
            Err(e) => {
                tracing::warn!(?scope, error = %e, "resource query failed");
                Err(e)
            }
        }
    }

    /// Last successful snapshot, if any.
    pub fn last_resources(&self) -> Option<&ResourceUsage> {
        self.resources.as_ref()
    }

    pub fn user_time(&mut self, scope: Scope) -> Result<std::time::Duration> {
        Ok(self.sample_resources(scope)?.user_time)
    }

    pub fn system_time(&mut self, scope: Scope) -> Result<std::time::Duration> {
        Ok(self.sample_resources(scope)?.system_time)
    }

    pub fn max_resident(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.max_resident)
    }

    pub fn shared_memory(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.shared_memory)
    }

    pub fn data_size(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.data_size)
    }

    pub fn stack_size(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.stack_size)
    }

    /// Major page faults.
    pub fn page_faults(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.major_faults)
    }

    pub fn swaps(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.swaps)
    }

    pub fn signals(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.signals)
    }

    pub fn block_input(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.block_input)
    }

    pub fn block_output(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.block_output)
    }

    pub fn context_switches(&mut self, scope: Scope) -> Result<i64> {
        Ok(self.sample_resources(scope)?.context_switches())
    }

    // ----- report -----

    /// Render a new report stamped with the local time (UTC if the local
    /// offset cannot be determined). Replaces any previous report.
    pub fn generate_report(&mut self, sections: Sections) -> Result<()> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.generate_report_at(sections, now)
    }

    pub fn generate_report_at(&mut self, sections: Sections, at: OffsetDateTime) -> Result<()> {
        self.report = None;

        let stamp = at
            .format(format_description!(
                "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [year]"
            ))
            .map_err(|e| MeasError::Clock(format!("timestamp format failed: {e}")))?;

        let view = ReportView {
            timers: &self.timers,
            counters: &self.counters,
            items: &self.report_items,
            name_width: self.config.report.name_width,
        };
        let mut out = TextBuffer::with_quantum(self.config.report.growth_quantum);
        render::render(&mut out, &view, sections, &stamp)?;

        tracing::debug!(
            sections = sections.bits(),
            bytes = out.len(),
            capacity = out.capacity(),
            "report generated"
        );
        self.report = Some(out);
        Ok(())
    }

    /// Current report text, if one has been generated.
    pub fn report_text(&self) -> Option<&str> {
        self.report.as_ref().map(TextBuffer::as_str)
    }

    /// Copy the current report verbatim to `sink`; no-op without a report.
    pub fn write_report<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        let Some(report) = &self.report else {
            tracing::debug!("no report generated; nothing written");
            return Ok(());
        };
        report.write_to(sink)?;
        sink.flush()?;
        tracing::debug!(bytes = report.len(), "report written");
        Ok(())
    }
}
