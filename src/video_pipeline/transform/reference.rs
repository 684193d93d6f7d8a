//! Reference frame held for the temporal blend

/// What the engine does with the reference frame for the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendPhase {
    /// Before the capture index, or nothing was captured
    Passthrough,
    /// Copy every corrected row into the reference buffer
    Capture,
    /// Mix every corrected row 50/50 with the reference buffer
    Blend,
}

/// Frame counter plus a frame frozen at a fixed index.
///
/// Rows are stored back to back at the source row width.
pub struct ReferenceFrame {
    buffer: Vec<u8>,
    frame_index: u64,
    capture_index: u64,
    captured: bool,
}

impl ReferenceFrame {
    pub fn new(capacity: usize, capture_index: u64) -> Self {
        Self {
            buffer: vec![0u8; capacity],
            frame_index: 0,
            capture_index,
            captured: false,
        }
    }

    pub fn phase(&self) -> BlendPhase {
        use std::cmp::Ordering;

        match self.frame_index.cmp(&self.capture_index) {
            Ordering::Less => BlendPhase::Passthrough,
            Ordering::Equal => BlendPhase::Capture,
            Ordering::Greater if self.captured => BlendPhase::Blend,
            Ordering::Greater => BlendPhase::Passthrough,
        }
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn capture_index(&self) -> u64 {
        self.capture_index
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Whether `rows` rows of `row_bytes` each fit in the buffer.
    pub fn fits(&self, row_bytes: usize, rows: usize) -> bool {
        row_bytes
            .checked_mul(rows)
            .is_some_and(|len| len <= self.buffer.len())
    }

    /// Stored row `row`; callers check [`fits`](Self::fits) first.
    pub fn row(&self, row: usize, row_bytes: usize) -> &[u8] {
        let start = row * row_bytes;
        &self.buffer[start..start + row_bytes]
    }

    /// Store `data` at the start of row slot `row`; a short final row leaves
    /// the rest of its slot as it was.
    pub fn store_row(&mut self, row: usize, row_bytes: usize, data: &[u8]) {
        let start = row * row_bytes;
        self.buffer[start..start + data.len()].copy_from_slice(data);
    }

    pub fn mark_captured(&mut self) {
        self.captured = true;
    }

    /// Count one processed frame.
    pub fn advance(&mut self) {
        self.frame_index += 1;
    }

    /// Forget the captured frame and restart the count.
    pub fn reset(&mut self) {
        self.buffer.fill(0);
        self.frame_index = 0;
        self.captured = false;
    }
}

impl std::fmt::Debug for ReferenceFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceFrame")
            .field("capacity", &self.buffer.len())
            .field("frame_index", &self.frame_index)
            .field("capture_index", &self.capture_index)
            .field("captured", &self.captured)
            .finish()
    }
}
