//! Error types for DDS parsing.

use thiserror::Error;

use crate::FourCC;

/// Errors that can occur when parsing a DDS container.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File shorter than the fixed header.
    #[error("file too small for DDS header: {size} bytes, need at least 128")]
    TooSmall { size: usize },

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Pixel format code not one of the supported DXT variants.
    #[error("unsupported DDS format code: {0}")]
    UnsupportedFormat(FourCC),

    /// A mip level's payload extends past the end of the file.
    #[error(
        "mip level {level} exceeds file size: needs {expected} bytes at offset {offset}, file is {file_size} bytes"
    )]
    TruncatedMip {
        level: u32,
        offset: usize,
        expected: usize,
        file_size: usize,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
