//! Luma lookup table (brightness, contrast, gamma)

use crate::video_pipeline::params::types::NEUTRAL_LEVEL;

/// Smallest gamma level used as a divisor.
const GAMMA_FLOOR: f64 = 0.0001;

/// Gamma level that maps to an exponent of exactly 1.
const GAMMA_PIVOT: f64 = 128.0;

/// Luma offset of nominal black in studio-range video.
const BLACK_LEVEL: f64 = 16.0;

/// Maps an input Y sample to its corrected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaTable {
    entries: [u8; 256],
}

impl LumaTable {
    /// Compute the table for the given slider levels.
    ///
    /// Contrast scales around nominal black, brightness shifts by its
    /// distance from the neutral level, then the result is raised to
    /// `128 / gamma`. Every stage clamps to the byte range.
    pub fn build(brightness: u8, contrast: u8, gamma: u8) -> Self {
        let contrast = contrast as f64 / NEUTRAL_LEVEL as f64;
        let offset = brightness as f64 - NEUTRAL_LEVEL as f64;
        let exponent = GAMMA_PIVOT / (gamma as f64).max(GAMMA_FLOOR);

        let mut entries = [0u8; 256];
        for (i, entry) in entries.iter_mut().enumerate() {
            let level = (i as f64 - BLACK_LEVEL) * contrast + offset + BLACK_LEVEL;
            let level = level.clamp(0.0, 255.0);
            let corrected = 255.0 * (level / 255.0).powf(exponent);
            *entry = corrected.round().clamp(0.0, 255.0) as u8;
        }

        Self { entries }
    }

    #[inline]
    pub fn lookup(&self, y: u8) -> u8 {
        self.entries[y as usize]
    }

    pub fn entries(&self) -> &[u8; 256] {
        &self.entries
    }
}

impl Default for LumaTable {
    fn default() -> Self {
        Self::build(NEUTRAL_LEVEL, NEUTRAL_LEVEL, NEUTRAL_LEVEL)
    }
}
