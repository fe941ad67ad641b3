//! meas core: allocation-aware primitives and the error surface shared by the
//! measurement session and its clients.
//!
//! This crate hosts the two containers everything else is built on:
//! - [`list::OwnedList`]: an ordered, singly-linked list that exclusively owns
//!   its elements (counters, timers and report items all live in one).
//! - [`text::TextBuffer`]: an append-only text accumulator with chunked growth,
//!   used to build reports.
//!
//! It carries no platform or runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MeasError`/`Result` so an instrumented
//! process never crashes because of its instrumentation.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod list;
pub mod name;
pub mod text;

/// Shared result type.
pub use error::{ErrorKind, MeasError, Result};
pub use list::OwnedList;
pub use name::BoundedName;
pub use text::TextBuffer;
