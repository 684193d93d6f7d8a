//! Lookup tables for per-pixel colour correction
//!
//! Tables are rebuilt whenever a slider moves so the frame loop only does
//! array lookups.

pub mod chroma;
pub mod luma;


pub use chroma::ChromaTable;
pub use luma::LumaTable;
