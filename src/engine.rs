//! File-level pipeline: decode the two captures, recover, encode.

use std::path::Path;

use image::{ImageFormat, RgbImage, RgbaImage};

use crate::error::{Error, Result};
use crate::matting;

/// Decode an input capture to RGB samples.
///
/// Any alpha channel present in the input is discarded on read; only the
/// observed RGB values carry information about the capture.
fn load_capture(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}

/// Recover an image's alpha channel and straight color from two captures and
/// write the result to `output_path`.
///
/// `white_path` and `black_path` must decode to equal-size images of the same
/// content composited over pure white and pure black. With the `parallel`
/// feature the two decodes run concurrently; both complete and their
/// dimensions are validated before any pixel work starts.
///
/// # Errors
///
/// - [`Error::Decode`] if either capture cannot be read or decoded.
/// - [`Error::DimensionMismatch`] if the captures differ in size; no output
///   file is produced.
/// - [`Error::UnsupportedOutputFormat`] if `output_path` maps to a format
///   without an alpha channel.
/// - [`Error::Encode`] if the output cannot be written.
pub fn recover_file(white_path: &Path, black_path: &Path, output_path: &Path) -> Result<()> {
    #[cfg(feature = "parallel")]
    let (white, black) = {
        let (white, black) = rayon::join(|| load_capture(white_path), || load_capture(black_path));
        (white?, black?)
    };

    #[cfg(not(feature = "parallel"))]
    let (white, black) = (load_capture(white_path)?, load_capture(black_path)?);

    let recovered = matting::recover_image(&white, &black)?;
    save_rgba(&recovered, output_path)
}

/// Save a recovered RGBA image, restricted to formats that store alpha.
///
/// The format is taken from the path extension the way the `image` crate
/// resolves it; PNG, WebP and TIFF are accepted.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOutputFormat`] for extensions that resolve to
/// no format or to an alpha-less one, and [`Error::Encode`] if writing fails.
pub fn save_rgba(img: &RgbaImage, path: &Path) -> Result<()> {
    let format =
        ImageFormat::from_path(path).map_err(|e| Error::UnsupportedOutputFormat(e.to_string()))?;

    match format {
        ImageFormat::Png | ImageFormat::WebP | ImageFormat::Tiff => {
            img.save(path).map_err(|source| Error::Encode {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => Err(Error::UnsupportedOutputFormat(format!("{format:?}"))),
    }
}
