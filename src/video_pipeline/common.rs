//! Common utilities module
//!
//! This module contains shared utilities used across the video pipeline.

pub mod error;

pub use error::{EngineError, Result};
