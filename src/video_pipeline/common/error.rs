use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Media type rejected: {0}")]
    FormatRejected(String),

    #[error("Allocator granted {actual} bytes per buffer, upstream requires {required}")]
    AllocationNegotiationFailed { required: usize, actual: usize },

    #[error("Buffer too small: need {required} bytes, have {available}")]
    BufferTooSmall { required: usize, available: usize },

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error(
        "Crop rectangle ({left}, {top}, {right}, {bottom}) does not fit a {width}x{height} frame"
    )]
    InvalidCrop {
        left: usize,
        top: usize,
        right: usize,
        bottom: usize,
        width: usize,
        height: usize,
    },

    #[error("Pin is not connected")]
    NotConnected,

    #[error("Invalid media type position: {0}")]
    InvalidPosition(i32),

    #[error("Allocator error: {0}")]
    Allocator(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
