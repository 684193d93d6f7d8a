//! Format negotiation callbacks invoked by the hosting pipeline.
//!
//! These are free functions with no engine state; the processor wires them
//! to the media types it has recorded for each pin.

use tracing::{debug, warn};

use crate::video_pipeline::common::error::{EngineError, Result};
use crate::video_pipeline::format::types::{
    FormatType, FourCc, MajorType, MediaType, Subtype, VIDEO_INFO_HEADER_LEN,
};

/// Allocator properties exchanged during buffer negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocatorProperties {
    pub buffers: usize,
    pub buffer_size: usize,
    pub align: usize,
    pub prefix: usize,
}

/// Downstream allocator that buffer negotiation configures.
pub trait BufferAllocator {
    /// Request `properties` and report what the allocator actually granted.
    fn set_properties(&mut self, properties: &AllocatorProperties) -> Result<AllocatorProperties>;
}

/// Whether `media_type` describes a usable packed YUY2 video stream.
pub fn is_valid_yuy2(media_type: &MediaType) -> bool {
    if media_type.major_type != MajorType::Video
        || media_type.subtype != Subtype::Yuy2
        || media_type.format_type != FormatType::VideoInfo
        || media_type.format_len < VIDEO_INFO_HEADER_LEN
    {
        return false;
    }

    let Some(bmi) = media_type.header() else {
        return false;
    };

    bmi.bit_count == 16
        && bmi.compression == FourCc::YUY2
        && bmi.dib_size().is_some_and(|size| bmi.size_image as usize >= size)
}

pub fn can_accept_input_format(media_type: &MediaType) -> bool {
    is_valid_yuy2(media_type)
}

/// Output must be valid YUY2, at least as wide as the input, and equally tall.
///
/// Heights compare by magnitude; the sign only records row order.
pub fn can_transform(input: &MediaType, output: &MediaType) -> bool {
    if !is_valid_yuy2(output) {
        return false;
    }
    let (Some(bmi_in), Some(bmi_out)) = (input.header(), output.header()) else {
        return false;
    };
    bmi_in.width <= bmi_out.width && bmi_in.height.unsigned_abs() == bmi_out.height.unsigned_abs()
}

/// Offer output formats by preference index.
///
/// The only format offered is the connected input format, at index 0.
pub fn propose_output_format(input: &MediaType, position: i32) -> Result<Option<MediaType>> {
    match position {
        p if p < 0 => Err(EngineError::InvalidPosition(p)),
        0 => Ok(Some(input.clone())),
        _ => Ok(None),
    }
}

/// Settle allocator properties for the output side.
///
/// Asks for the larger of the upstream buffer size and the downstream
/// request, then fails unless the allocator grants at least the upstream
/// size.
pub fn negotiate_buffer_size<A: BufferAllocator + ?Sized>(
    allocator: &mut A,
    upstream: &AllocatorProperties,
    request: &AllocatorProperties,
) -> Result<AllocatorProperties> {
    let mut request = *request;
    request.align = request.align.max(1);
    request.buffers = request.buffers.max(1);
    request.buffer_size = upstream.buffer_size.max(request.buffer_size);

    debug!(
        buffers = request.buffers,
        buffer_size = request.buffer_size,
        align = request.align,
        "Requesting allocator properties"
    );

    let actual = allocator.set_properties(&request)?;

    if upstream.buffer_size > actual.buffer_size {
        warn!(
            required = upstream.buffer_size,
            actual = actual.buffer_size,
            "Allocator granted a smaller buffer than upstream requires"
        );
        return Err(EngineError::AllocationNegotiationFailed {
            required: upstream.buffer_size,
            actual: actual.buffer_size,
        });
    }

    Ok(actual)
}
