//! Rendering for finished calculations.
//!
//! The text forms are meant for a terminal; [`Quote`] is the JSON envelope.

pub mod breakdown;
pub mod quote;
pub mod scenario;

pub use quote::Quote;
pub use scenario::{ScenarioRow, ScenarioTable};
