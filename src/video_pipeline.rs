//! YUY2 colour correction pipeline
//!
//! This module provides lookup-table based brightness, contrast, gamma, hue
//! and saturation correction for packed 4:2:2 frames, with a temporal blend
//! against a frame captured earlier in the stream.

pub mod common;
pub mod format;
pub mod params;
pub mod tables;
pub mod transform;

pub use common::{
    EngineError,
    Result,
};

pub use format::{
    AllocatorProperties,
    BufferAllocator,
    FrameDescriptor,
    Geometry,
    MediaType,
    Orientation,
    PinDirection,
};

pub use params::{
    ColorParameters,
    Parameter,
    ParameterStore,
};

pub use tables::{
    ChromaTable,
    LumaTable,
};

pub use transform::{
    EngineConfig,
    EngineConfigBuilder,
    FrameProcessor,
    OutputSample,
};
