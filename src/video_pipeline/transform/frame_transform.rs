use std::ops::Range;

use tracing::{info, trace, warn};

use crate::video_pipeline::common::error::{EngineError, Result};
use crate::video_pipeline::format::{resolve, FrameDescriptor, Geometry};
use crate::video_pipeline::params::TableSnapshot;
use crate::video_pipeline::transform::reference::{BlendPhase, ReferenceFrame};

/// Bytes in one YUY2 macropixel (Y0 U Y1 V).
pub const MACROPIXEL_BYTES: usize = 4;

/// Per-frame YUY2 colour correction with the temporal blend.
#[derive(Debug)]
pub struct FrameTransform {
    reference: ReferenceFrame,
}

impl FrameTransform {
    pub fn new(reference_capacity: usize, capture_index: u64) -> Self {
        Self {
            reference: ReferenceFrame::new(reference_capacity, capture_index),
        }
    }

    /// Correct one frame from `source` into `dest`.
    ///
    /// Each processed row is copied with the source row width, even when the
    /// destination stride differs. A row running past the end of either
    /// slice is cut there, as long as its processed region still fits.
    /// Returns the declared destination image size. Nothing is written
    /// unless every addressed row fits both slices.
    pub fn apply(
        &mut self,
        source: &[u8],
        source_format: &FrameDescriptor,
        dest: &mut [u8],
        dest_format: &FrameDescriptor,
        tables: &TableSnapshot,
    ) -> Result<usize> {
        let src_geometry = resolve(source_format, true);
        let dst_geometry = resolve(dest_format, true);

        let bytes_written = dest_format.image_size();
        if dest.len() < bytes_written {
            return Err(EngineError::BufferTooSmall {
                required: bytes_written,
                available: dest.len(),
            });
        }

        let row_bytes = src_geometry.row_bytes();
        let height = src_geometry.height.min(dst_geometry.height);
        check_fits(&src_geometry, row_bytes, source.len())?;
        check_fits(&dst_geometry, row_bytes, dest.len())?;

        let mut phase = self.reference.phase();
        if phase != BlendPhase::Passthrough && !self.reference.fits(row_bytes, height) {
            warn!(
                frame = self.reference.frame_index(),
                required = row_bytes * height,
                capacity = self.reference.capacity(),
                "Frame exceeds reference capacity, skipping temporal blend"
            );
            phase = BlendPhase::Passthrough;
        }

        trace!(
            frame = self.reference.frame_index(),
            ?phase,
            row_bytes,
            height,
            "Transforming frame"
        );

        for row in 0..height {
            let src_span = row_span(&src_geometry, row, row_bytes, source.len())?;
            let dst_span = row_span(&dst_geometry, row, row_bytes, dest.len())?;
            let len = src_span.len().min(dst_span.len());
            let out = &mut dest[dst_span.start..dst_span.start + len];

            out.copy_from_slice(&source[src_span.start..src_span.start + len]);
            correct_row(out, tables);

            match phase {
                BlendPhase::Capture => self.reference.store_row(row, row_bytes, out),
                BlendPhase::Blend => blend_row(out, self.reference.row(row, row_bytes)),
                BlendPhase::Passthrough => {}
            }
        }

        if phase == BlendPhase::Capture {
            self.reference.mark_captured();
            info!(
                frame = self.reference.frame_index(),
                bytes = row_bytes * height,
                "Reference frame captured"
            );
        }
        self.reference.advance();

        Ok(bytes_written)
    }

    /// Number of frames processed since creation or the last reset.
    pub fn frame_index(&self) -> u64 {
        self.reference.frame_index()
    }

    pub fn reference(&self) -> &ReferenceFrame {
        &self.reference
    }

    pub fn reset(&mut self) {
        self.reference.reset();
    }
}

/// Apply the lookup tables to every whole macropixel of `row`.
///
/// Both chroma outputs are looked up with the original U and V.
pub fn correct_row(row: &mut [u8], tables: &TableSnapshot) {
    for px in row.chunks_exact_mut(MACROPIXEL_BYTES) {
        let (u, v) = (px[1], px[3]);
        let (new_u, new_v) = tables.chroma.map(u, v);
        px[0] = tables.luma.lookup(px[0]);
        px[1] = new_u;
        px[2] = tables.luma.lookup(px[2]);
        px[3] = new_v;
    }
}

/// Average every whole macropixel of `row` with `reference`, truncating.
pub fn blend_row(row: &mut [u8], reference: &[u8]) {
    let len = row.len() - row.len() % MACROPIXEL_BYTES;
    for (out, &held) in row[..len].iter_mut().zip(reference) {
        *out = ((*out as u16 + held as u16) / 2) as u8;
    }
}

fn check_fits(geometry: &Geometry, row_bytes: usize, available: usize) -> Result<()> {
    match geometry.required_len(row_bytes) {
        Some(required) if required <= available => Ok(()),
        Some(required) => Err(EngineError::BufferTooSmall { required, available }),
        None => Err(EngineError::BufferTooSmall {
            required: geometry.top_offset + row_bytes,
            available,
        }),
    }
}

fn row_span(
    geometry: &Geometry,
    row: usize,
    row_bytes: usize,
    available: usize,
) -> Result<Range<usize>> {
    geometry
        .row_span(row, row_bytes, available)
        .ok_or(EngineError::BufferTooSmall {
            required: geometry.top_offset + row_bytes,
            available,
        })
}
