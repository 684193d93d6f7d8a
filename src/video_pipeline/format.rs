//! Frame format module
//!
//! Media type descriptors, buffer geometry resolution and the negotiation
//! callbacks the hosting pipeline invokes while connecting the filter.

pub mod geometry;
pub mod negotiation;
pub mod types;

#[cfg(test)]
mod tests;

pub use geometry::{resolve, Geometry};
pub use negotiation::{
    can_accept_input_format, can_transform, is_valid_yuy2, negotiate_buffer_size,
    propose_output_format, AllocatorProperties, BufferAllocator,
};
pub use types::{
    BitmapInfoHeader, CropRect, FormatType, FourCc, FrameDescriptor, MajorType, MediaType,
    Orientation, PinDirection, Rect, Subtype, VideoInfoHeader, VIDEO_INFO_HEADER_LEN,
};
