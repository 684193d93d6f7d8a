//! Frame transform module
//!
//! Per-frame YUY2 correction, the temporal blend reference, and the
//! processor the hosting pipeline drives.

pub mod config;
pub mod frame_transform;
pub mod processor;
pub mod reference;


pub use config::{EngineConfig, EngineConfigBuilder, DEFAULT_CAPTURE_INDEX, DEFAULT_REFERENCE_CAPACITY};
pub use frame_transform::{blend_row, correct_row, FrameTransform, MACROPIXEL_BYTES};
pub use processor::{FrameProcessor, OutputSample};
pub use reference::{BlendPhase, ReferenceFrame};
