//! Append-only text accumulator with chunked growth.
//!
//! Growth rules:
//! - An append that does not fit in the free space (`capacity - len`, keeping
//!   one byte reserved as the terminator slot) grows the buffer first.
//! - New capacity is a whole number of growth quanta: the current capacity
//!   rounded up to quanta plus the shortfall rounded up to quanta.
//! - Growth uses a fallible reservation; on failure the buffer is unchanged.

use std::fmt;
use std::io::Write;

use crate::error::{MeasError, Result};

/// Growth quantum in bytes.
pub const DEFAULT_GROWTH_QUANTUM: usize = 1024;

/// Growable report buffer.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    text: String,
    capacity: usize,
    quantum: usize,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::with_quantum(DEFAULT_GROWTH_QUANTUM)
    }

    /// Buffer growing in steps of `quantum` bytes (zero is treated as one).
    pub fn with_quantum(quantum: usize) -> Self {
        Self {
            text: String::new(),
            capacity: 0,
            quantum: quantum.max(1),
        }
    }

    /// Append `fragment` at the write offset, growing first if needed.
    pub fn append(&mut self, fragment: &str) -> Result<()> {
        let free = self.remaining();
        if fragment.len() >= free {
            self.grow(fragment.len() - free + 1)?;
        }
        self.text.push_str(fragment);
        Ok(())
    }

    fn grow(&mut self, shortfall: usize) -> Result<()> {
        let units = self.capacity.div_ceil(self.quantum) + shortfall.div_ceil(self.quantum);
        let new_capacity = units.checked_mul(self.quantum).ok_or_else(|| {
            MeasError::AllocationFailed(format!("text buffer capacity overflow ({units} quanta)"))
        })?;

        self.text
            .try_reserve_exact(new_capacity - self.text.len())
            .map_err(|e| {
                MeasError::AllocationFailed(format!(
                    "text buffer growth to {new_capacity} bytes: {e}"
                ))
            })?;

        tracing::trace!(from = self.capacity, to = new_capacity, "text buffer grown");
        self.capacity = new_capacity;
        Ok(())
    }

    /// Accumulated text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Write offset (bytes written so far).
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Logical capacity in bytes (always a multiple of the quantum).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free bytes before the next growth.
    pub fn remaining(&self) -> usize {
        self.capacity - self.text.len()
    }

    pub fn quantum(&self) -> usize {
        self.quantum
    }

    /// Discard contents and release storage.
    pub fn clear(&mut self) {
        self.text = String::new();
        self.capacity = 0;
    }

    /// Copy the accumulated text verbatim into `sink`.
    pub fn write_to<W: Write + ?Sized>(&self, sink: &mut W) -> Result<()> {
        sink.write_all(self.text.as_bytes())?;
        Ok(())
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append(s).map_err(|_| fmt::Error)
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
