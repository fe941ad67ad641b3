//! Top-level facade crate for meas.
//!
//! Re-exports core primitives and the session library so users can depend on a single crate.

pub mod core {
    pub use meas_core::*;
}

pub mod session {
    pub use meas_session::*;
}

pub use meas_core::{MeasError, Result};
pub use meas_session::{Scope, Sections, Session, ValueFormat};
