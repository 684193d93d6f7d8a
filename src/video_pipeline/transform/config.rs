//! Engine configuration types

use crate::video_pipeline::params::ColorParameters;

/// Frame index at which the reference frame is captured by default.
pub const DEFAULT_CAPTURE_INDEX: u64 = 500;

/// Default reference buffer size: 1280x720 at 32 bits per pixel.
pub const DEFAULT_REFERENCE_CAPACITY: usize = 3_686_400;

/// Configuration for a frame processing engine
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Frame index at which the corrected frame is frozen as the blend reference
    pub capture_index: u64,
    /// Size in bytes of the reference frame buffer
    pub reference_capacity: usize,
    /// Initial colour control levels
    pub parameters: ColorParameters,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capture_index: DEFAULT_CAPTURE_INDEX,
            reference_capacity: DEFAULT_REFERENCE_CAPACITY,
            parameters: ColorParameters::default(),
        }
    }
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for EngineConfig
#[derive(Default)]
pub struct EngineConfigBuilder {
    capture_index: Option<u64>,
    reference_capacity: Option<usize>,
    parameters: Option<ColorParameters>,
}

impl EngineConfigBuilder {
    pub fn capture_index(mut self, index: u64) -> Self {
        self.capture_index = Some(index);
        self
    }

    pub fn reference_capacity(mut self, bytes: usize) -> Self {
        self.reference_capacity = Some(bytes);
        self
    }

    pub fn parameters(mut self, parameters: ColorParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn build(self) -> EngineConfig {
        let default = EngineConfig::default();
        EngineConfig {
            capture_index: self.capture_index.unwrap_or(default.capture_index),
            reference_capacity: self.reference_capacity.unwrap_or(default.reference_capacity),
            parameters: self.parameters.unwrap_or(default.parameters),
        }
    }
}
