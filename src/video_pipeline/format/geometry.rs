//! Row addressing inside a packed bitmap buffer.
//!
//! Positions are byte offsets from the start of the caller's buffer, so the
//! resolver never touches memory; callers index their own slices with the
//! result.

use std::ops::Range;

use crate::video_pipeline::format::types::{FrameDescriptor, Orientation};

/// Resolved layout of the region to process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Width of the processed region in pixels
    pub width: usize,
    /// Height of the processed region in rows
    pub height: usize,
    /// Byte step from one processed row to the next; negative for bottom-up storage
    pub stride: isize,
    /// Offset of the first byte of the first processed row
    pub top_offset: usize,
    /// Bytes of the processed region inside one row
    pub region_bytes: usize,
}

/// Locate the first row and the row stride for `descriptor`.
///
/// YUV layouts are always stored top-down, whatever the header orientation
/// says, so `yuv_like` forces a positive stride.
pub fn resolve(descriptor: &FrameDescriptor, yuv_like: bool) -> Geometry {
    let row_bytes = descriptor.row_bytes();
    let top_down = yuv_like || descriptor.orientation() == Orientation::TopDown;
    let stride = if top_down {
        row_bytes as isize
    } else {
        -(row_bytes as isize)
    };

    match descriptor.crop() {
        None => {
            let height = descriptor.height();
            let top_offset = if top_down {
                0
            } else {
                row_bytes * (height - 1)
            };
            Geometry {
                width: descriptor.width(),
                height,
                stride,
                top_offset,
                region_bytes: row_bytes,
            }
        }
        Some(crop) => {
            let column_offset = (descriptor.bits_per_pixel() * crop.left) / 8;
            let first_row = if top_down {
                crop.top
            } else {
                descriptor.height() - crop.top - 1
            };
            Geometry {
                width: crop.width(),
                height: crop.height(),
                stride,
                top_offset: row_bytes * first_row + column_offset,
                region_bytes: (descriptor.bits_per_pixel() * crop.width()).div_ceil(8),
            }
        }
    }
}

impl Geometry {
    /// Bytes per row, ignoring the storage direction.
    pub fn row_bytes(&self) -> usize {
        self.stride.unsigned_abs()
    }

    /// Offset of the first byte of processed row `row`, if it is addressable.
    pub fn row_start(&self, row: usize) -> Option<usize> {
        let step = self.row_bytes().checked_mul(row)?;
        if self.stride >= 0 {
            self.top_offset.checked_add(step)
        } else {
            self.top_offset.checked_sub(step)
        }
    }

    /// Byte range of `len` bytes starting at processed row `row`.
    pub fn row_range(&self, row: usize, len: usize) -> Option<Range<usize>> {
        let start = self.row_start(row)?;
        Some(start..start.checked_add(len)?)
    }

    /// Span of processed row `row` inside a buffer of `available` bytes.
    ///
    /// Covers `len` bytes where the buffer allows, and is cut at the buffer
    /// end otherwise. A cut span must still hold the processed region of
    /// the row.
    pub fn row_span(&self, row: usize, len: usize, available: usize) -> Option<Range<usize>> {
        let full = self.row_range(row, len)?;
        let end = full.end.min(available);
        (end >= full.start.checked_add(self.region_bytes.min(len))?).then_some(full.start..end)
    }

    /// Smallest buffer length for which every [`row_span`](Self::row_span) exists.
    ///
    /// Returns `None` when a row would start before the buffer base.
    pub fn required_len(&self, len: usize) -> Option<usize> {
        if self.height == 0 {
            return Some(0);
        }
        let first = self.row_start(0)?;
        let last = self.row_start(self.height - 1)?;
        first.max(last).checked_add(self.region_bytes.min(len))
    }
}
