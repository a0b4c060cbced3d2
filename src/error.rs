use thiserror::Error;

/// Errors returned when extraction parameters or the supplied pixel buffer are unusable.
#[derive(Debug, Error)]
pub enum Error {
    #[error("stride must be at least 1 pixel, got 0")]
    InvalidStride,

    #[error("pixel buffer length {len} is not a multiple of 4 bytes")]
    BufferLength { len: usize },

    #[error("pixel buffer length {len} does not match dimensions {width}x{height}")]
    DimensionMismatch { len: usize, width: u32, height: u32 },

    #[error("invalid hex color {value:?}")]
    InvalidHex {
        value: String,
        #[source]
        source: palette::rgb::FromHexError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
