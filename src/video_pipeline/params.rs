//! Colour control module
//!
//! Holds the brightness, contrast, hue, saturation and gamma levels and keeps
//! the lookup tables in step with them.

pub mod store;
pub mod types;

#[cfg(test)]
mod tests;

pub use store::{ParameterStore, TableSnapshot};
pub use types::{ColorParameters, Parameter, TableKind, MAX_LEVEL, MIN_LEVEL, NEUTRAL_LEVEL};
