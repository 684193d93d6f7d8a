use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::video_pipeline::common::error::{EngineError, Result};
use crate::video_pipeline::format::{
    can_accept_input_format, can_transform, negotiate_buffer_size, propose_output_format,
    AllocatorProperties, BufferAllocator, FrameDescriptor, MediaType, PinDirection,
};
use crate::video_pipeline::params::ParameterStore;
use crate::video_pipeline::transform::config::EngineConfig;
use crate::video_pipeline::transform::frame_transform::FrameTransform;

/// Destination buffer handed over by the host for one frame.
pub struct OutputSample<'a> {
    buffer: &'a mut [u8],
    media_type: Option<MediaType>,
    actual_len: usize,
}

impl<'a> OutputSample<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            media_type: None,
            actual_len: 0,
        }
    }

    /// Attach a format change requested downstream for this sample.
    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn actual_data_length(&self) -> usize {
        self.actual_len
    }

    pub fn data(&self) -> &[u8] {
        &*self.buffer
    }
}

#[derive(Debug, Clone)]
struct PinFormat {
    media_type: MediaType,
    descriptor: FrameDescriptor,
}

impl PinFormat {
    fn new(media_type: &MediaType) -> Result<Self> {
        let header = media_type.format.as_ref().ok_or_else(|| {
            EngineError::FormatRejected("media type carries no video format block".to_string())
        })?;
        Ok(Self {
            descriptor: header.descriptor()?,
            media_type: media_type.clone(),
        })
    }
}

/// Colour correction filter driven by a hosting video pipeline.
///
/// The host negotiates formats through the `check_*`, `get_media_type` and
/// `decide_buffer_size` callbacks, records them with `set_media_type`, then
/// calls [`transform`](Self::transform) once per frame. Colour controls live
/// in a shared [`ParameterStore`] that a UI thread may adjust at any time.
#[derive(Debug)]
pub struct FrameProcessor {
    config: EngineConfig,
    controls: Arc<ParameterStore>,
    input: Option<PinFormat>,
    output: Option<PinFormat>,
    transform: FrameTransform,
}

impl FrameProcessor {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            controls: Arc::new(ParameterStore::new(config.parameters)),
            transform: FrameTransform::new(config.reference_capacity, config.capture_index),
            input: None,
            output: None,
            config,
        }
    }

    pub fn check_input_type(&self, media_type: &MediaType) -> Result<()> {
        if can_accept_input_format(media_type) {
            Ok(())
        } else {
            Err(EngineError::FormatRejected(format!(
                "input must be packed YUY2 video, got {:?}",
                media_type.subtype
            )))
        }
    }

    pub fn check_transform(&self, input: &MediaType, output: &MediaType) -> Result<()> {
        if can_transform(input, output) {
            Ok(())
        } else {
            Err(EngineError::FormatRejected(
                "output must be YUY2, at least as wide as the input and equally tall".to_string(),
            ))
        }
    }

    /// Output format offered at `position`; `None` once the list is exhausted.
    pub fn get_media_type(&self, position: i32) -> Result<Option<MediaType>> {
        let input = self.input.as_ref().ok_or(EngineError::NotConnected)?;
        propose_output_format(&input.media_type, position)
    }

    pub fn decide_buffer_size<A: BufferAllocator + ?Sized>(
        &self,
        allocator: &mut A,
        upstream: &AllocatorProperties,
        request: &AllocatorProperties,
    ) -> Result<AllocatorProperties> {
        if self.input.is_none() {
            return Err(EngineError::NotConnected);
        }
        negotiate_buffer_size(allocator, upstream, request)
    }

    /// Record the media type agreed for one pin.
    pub fn set_media_type(&mut self, direction: PinDirection, media_type: &MediaType) -> Result<()> {
        let format = PinFormat::new(media_type)?;
        debug!(
            ?direction,
            width = format.descriptor.width(),
            height = format.descriptor.height(),
            orientation = ?format.descriptor.orientation(),
            "Media type set"
        );
        match direction {
            PinDirection::Input => self.input = Some(format),
            PinDirection::Output => self.output = Some(format),
        }
        Ok(())
    }

    pub fn input_media_type(&self) -> Option<&MediaType> {
        self.input.as_ref().map(|pin| &pin.media_type)
    }

    pub fn output_media_type(&self) -> Option<&MediaType> {
        self.output.as_ref().map(|pin| &pin.media_type)
    }

    /// Correct one frame from `input` into `output`.
    ///
    /// A media type attached to the output sample replaces the output format
    /// first. Sets and returns the number of bytes written.
    #[instrument(skip(self, input, output), fields(input_size = input.len(), frame = self.transform.frame_index()))]
    pub fn transform(&mut self, input: &[u8], output: &mut OutputSample<'_>) -> Result<usize> {
        if let Some(media_type) = output.media_type.take() {
            self.set_media_type(PinDirection::Output, &media_type)?;
        }

        let source = self.input.as_ref().ok_or(EngineError::NotConnected)?;
        let dest = self.output.as_ref().ok_or(EngineError::NotConnected)?;

        let tables = self.controls.tables();
        let written = self.transform.apply(
            input,
            &source.descriptor,
            &mut *output.buffer,
            &dest.descriptor,
            &tables,
        )?;

        output.actual_len = written;
        Ok(written)
    }

    /// Restart the frame count and drop the captured reference frame.
    pub fn reset(&mut self) {
        self.transform.reset();
        info!("Frame processor reset");
    }

    /// Shared handle for the settings UI.
    pub fn controls(&self) -> Arc<ParameterStore> {
        Arc::clone(&self.controls)
    }

    pub fn frame_index(&self) -> u64 {
        self.transform.frame_index()
    }

    pub fn frame_transform(&self) -> &FrameTransform {
        &self.transform
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
