//! Error types for the alpha-recovery crate.

use std::path::PathBuf;

/// Errors that can occur while recovering an alpha channel from two captures.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input capture could not be read or decoded as a raster image.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// Path of the capture that failed to decode.
        path: PathBuf,
        /// Underlying codec error.
        source: image::ImageError,
    },

    /// The two captures decoded to different dimensions.
    #[error(
        "capture dimensions differ: {white_width}x{white_height} (white) \
         vs {black_width}x{black_height} (black)"
    )]
    DimensionMismatch {
        /// Width of the white-background capture.
        white_width: u32,
        /// Height of the white-background capture.
        white_height: u32,
        /// Width of the black-background capture.
        black_width: u32,
        /// Height of the black-background capture.
        black_height: u32,
    },

    /// The output path maps to a format that cannot store an alpha channel.
    #[error("output format cannot store an alpha channel: {0}")]
    UnsupportedOutputFormat(String),

    /// The recovered image could not be encoded to the output path.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        /// Output path that failed to encode.
        path: PathBuf,
        /// Underlying codec error.
        source: image::ImageError,
    },
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
