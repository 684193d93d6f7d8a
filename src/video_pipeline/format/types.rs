//! Media type and frame descriptor types

use crate::video_pipeline::common::error::{EngineError, Result};

/// Size in bytes of a serialized VIDEOINFOHEADER format block.
pub const VIDEO_INFO_HEADER_LEN: usize = 88;

/// Four-character code identifying a pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
    pub const YUY2: FourCc = FourCc(*b"YUY2");
    pub const YV12: FourCc = FourCc(*b"YV12");

    pub const fn new(code: &[u8; 4]) -> Self {
        Self(*code)
    }
}

impl std::fmt::Display for FourCc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    Video,
    Audio,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subtype {
    /// Packed 4:2:2, Y0 U Y1 V
    Yuy2,
    Yv12,
    Rgb24,
    Rgb32,
    Other(FourCc),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    VideoInfo,
    VideoInfo2,
    Other,
}

/// Which side of the filter a media type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinDirection {
    Input,
    Output,
}

/// Rectangle with exclusive right/bottom edges, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// A rectangle with no area counts as empty.
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }
}

/// Bitmap header describing the pixel layout of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapInfoHeader {
    /// Width in pixels (or bytes, for bit depths that are not whole bytes)
    pub width: i32,
    /// Height in pixels; negative means rows are stored top-down
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: FourCc,
    /// Declared image size in bytes
    pub size_image: u32,
}

impl BitmapInfoHeader {
    /// Packed YUY2 header for a `width`x`height` frame with a DWORD-aligned size.
    ///
    /// Fails when the image size does not fit the 32-bit size field.
    pub fn yuy2(width: i32, height: i32) -> Result<Self> {
        let mut header = Self {
            width,
            height,
            planes: 1,
            bit_count: 16,
            compression: FourCc::YUY2,
            size_image: 0,
        };
        header.size_image = header
            .dib_size()
            .and_then(|size| u32::try_from(size).ok())
            .ok_or(EngineError::InvalidDimensions(
                width.unsigned_abs() as usize,
                height.unsigned_abs() as usize,
            ))?;
        Ok(header)
    }

    /// Real bitmap size with each row rounded up to a DWORD, or `None` on overflow.
    ///
    /// Only meaningful for bit depths that are a power of two.
    pub fn dib_size(&self) -> Option<usize> {
        let row_bits = (self.width.unsigned_abs() as usize).checked_mul(self.bit_count as usize)?;
        let row_bytes = row_bits.div_ceil(32).checked_mul(4)?;
        row_bytes.checked_mul(self.height.unsigned_abs() as usize)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoInfoHeader {
    pub source: Rect,
    /// Sub-rectangle of the frame to process; empty means the whole frame
    pub target: Rect,
    pub bit_rate: u32,
    pub bit_error_rate: u32,
    /// Frame duration in 100ns units
    pub avg_time_per_frame: i64,
    pub bmi_header: BitmapInfoHeader,
}

impl VideoInfoHeader {
    pub fn new(bmi_header: BitmapInfoHeader) -> Self {
        Self {
            source: Rect::default(),
            target: Rect::default(),
            bit_rate: 0,
            bit_error_rate: 0,
            avg_time_per_frame: 0,
            bmi_header,
        }
    }

    pub fn with_target(mut self, target: Rect) -> Self {
        self.target = target;
        self
    }

    /// Extract the frame descriptor the geometry resolver works with.
    pub fn descriptor(&self) -> Result<FrameDescriptor> {
        let bmi = &self.bmi_header;
        let orientation = if bmi.height < 0 {
            Orientation::TopDown
        } else {
            Orientation::BottomUp
        };

        let descriptor = FrameDescriptor::new(
            bmi.width.max(0) as usize,
            bmi.height.unsigned_abs() as usize,
            bmi.bit_count as usize,
            orientation,
        )?
        .with_image_size(bmi.size_image as usize);

        if self.target.is_empty() {
            return Ok(descriptor);
        }

        let t = &self.target;
        if t.left < 0 || t.top < 0 {
            return Err(EngineError::FormatRejected(format!(
                "target rectangle has negative origin ({}, {})",
                t.left, t.top
            )));
        }
        descriptor.with_crop(CropRect::new(
            t.left as usize,
            t.top as usize,
            t.right as usize,
            t.bottom as usize,
        ))
    }
}

/// Negotiated media type for one pin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub major_type: MajorType,
    pub subtype: Subtype,
    pub format_type: FormatType,
    /// Parsed format block, if the media type carries one
    pub format: Option<VideoInfoHeader>,
    /// Declared length of the format block in bytes
    pub format_len: usize,
}

impl MediaType {
    pub fn video_info(subtype: Subtype, header: VideoInfoHeader) -> Self {
        Self {
            major_type: MajorType::Video,
            subtype,
            format_type: FormatType::VideoInfo,
            format: Some(header),
            format_len: VIDEO_INFO_HEADER_LEN,
        }
    }

    /// Packed YUY2 media type for a `width`x`height` frame.
    pub fn yuy2(width: i32, height: i32) -> Result<Self> {
        Ok(Self::video_info(
            Subtype::Yuy2,
            VideoInfoHeader::new(BitmapInfoHeader::yuy2(width, height)?),
        ))
    }

    pub fn header(&self) -> Option<&BitmapInfoHeader> {
        self.format.as_ref().map(|vih| &vih.bmi_header)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    TopDown,
    BottomUp,
}

/// Sub-rectangle of a frame, exclusive right/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl CropRect {
    pub const fn new(left: usize, top: usize, right: usize, bottom: usize) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }
}

/// Frame layout as seen by the geometry resolver.
///
/// Fields are only reachable through validating constructors, so a
/// descriptor always satisfies `0 <= left < right <= width` and
/// `0 <= top < bottom <= height` when cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor {
    width: usize,
    height: usize,
    bits_per_pixel: usize,
    orientation: Orientation,
    crop: Option<CropRect>,
    image_size: usize,
}

impl FrameDescriptor {
    pub fn new(
        width: usize,
        height: usize,
        bits_per_pixel: usize,
        orientation: Orientation,
    ) -> Result<Self> {
        if width == 0 || height == 0 || bits_per_pixel == 0 {
            return Err(EngineError::InvalidDimensions(width, height));
        }

        let mut descriptor = Self {
            width,
            height,
            bits_per_pixel,
            orientation,
            crop: None,
            image_size: 0,
        };
        descriptor.image_size = checked_row_bytes(width, bits_per_pixel)
            .and_then(|row_bytes| row_bytes.checked_mul(height))
            .ok_or(EngineError::InvalidDimensions(width, height))?;
        Ok(descriptor)
    }

    pub fn with_crop(mut self, crop: CropRect) -> Result<Self> {
        let fits = crop.left < crop.right
            && crop.right <= self.width
            && crop.top < crop.bottom
            && crop.bottom <= self.height;
        if !fits {
            return Err(EngineError::InvalidCrop {
                left: crop.left,
                top: crop.top,
                right: crop.right,
                bottom: crop.bottom,
                width: self.width,
                height: self.height,
            });
        }
        self.crop = Some(crop);
        Ok(self)
    }

    /// Override the declared image size (defaults to `row_bytes * height`).
    pub fn with_image_size(mut self, image_size: usize) -> Self {
        self.image_size = image_size;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn bits_per_pixel(&self) -> usize {
        self.bits_per_pixel
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn crop(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn image_size(&self) -> usize {
        self.image_size
    }

    /// Bytes per stored row.
    ///
    /// Whole-byte depths are expanded from pixels and rounded up to 4 bytes;
    /// for other depths the width already counts bytes.
    ///
    /// Construction rejects dimensions whose row size overflows.
    pub fn row_bytes(&self) -> usize {
        checked_row_bytes(self.width, self.bits_per_pixel).unwrap_or(usize::MAX)
    }
}

fn checked_row_bytes(width: usize, bits_per_pixel: usize) -> Option<usize> {
    if bits_per_pixel % 8 == 0 {
        let packed = width.checked_mul(bits_per_pixel / 8)?;
        Some(packed.checked_add(3)? & !3)
    } else {
        Some(width)
    }
}
