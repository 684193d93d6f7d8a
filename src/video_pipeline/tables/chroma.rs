//! Chroma lookup tables (hue, saturation)

use crate::video_pipeline::params::types::NEUTRAL_LEVEL;

const PLANE_LEN: usize = 256 * 256;

/// Chroma value of a colourless sample.
const CHROMA_ZERO: f64 = 128.0;

/// Rotates and scales (U, V) pairs around the neutral chroma point.
///
/// Both planes are indexed by the *original* pair, row-major in U:
/// `plane[u * 256 + v]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromaTable {
    u_plane: Box<[u8]>,
    v_plane: Box<[u8]>,
}

impl ChromaTable {
    /// Compute both planes for the given slider levels.
    ///
    /// Hue 128 is no rotation and the range spans -180..+178.6 degrees.
    /// Saturation is applied in quarter steps, so 128 is unity gain.
    pub fn build(hue: u8, saturation: u8) -> Self {
        let degrees = (hue as f64 - 128.0) * (180.0 / 128.0);
        let (sin_h, cos_h) = degrees.to_radians().sin_cos();
        let gain = (saturation / 4) as f64 / 32.0;

        let mut u_plane = vec![0u8; PLANE_LEN].into_boxed_slice();
        let mut v_plane = vec![0u8; PLANE_LEN].into_boxed_slice();

        for u in 0..256usize {
            let du = u as f64 - CHROMA_ZERO;
            let row = u * 256;
            for v in 0..256usize {
                let dv = v as f64 - CHROMA_ZERO;
                let rotated_u = (du * cos_h + dv * sin_h) * gain + CHROMA_ZERO;
                let rotated_v = (dv * cos_h - du * sin_h) * gain + CHROMA_ZERO;
                u_plane[row + v] = to_sample(rotated_u);
                v_plane[row + v] = to_sample(rotated_v);
            }
        }

        Self { u_plane, v_plane }
    }

    /// Corrected (U, V) for an original pair.
    #[inline]
    pub fn map(&self, u: u8, v: u8) -> (u8, u8) {
        let index = ((u as usize) << 8) | v as usize;
        (self.u_plane[index], self.v_plane[index])
    }

    pub fn u_plane(&self) -> &[u8] {
        &self.u_plane
    }

    pub fn v_plane(&self) -> &[u8] {
        &self.v_plane
    }
}

impl Default for ChromaTable {
    fn default() -> Self {
        Self::build(NEUTRAL_LEVEL, NEUTRAL_LEVEL)
    }
}

#[inline]
fn to_sample(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
