//! Per-pixel recovery math.
//!
//! Compositing over a known background is a linear blend:
//! `observed = alpha * color + (1 - alpha) * background`
//!
//! Capturing the same image over pure white and over pure black gives two
//! observations of every pixel, enough to solve for both unknowns. The RGB
//! distance between the two captures runs linearly from the white/black
//! background distance (fully transparent) down to zero (fully opaque), and
//! once alpha is known the straight color falls out of the black capture,
//! where the background contributes nothing to the blend.

use image::{RgbImage, RgbaImage};

use crate::error::{Error, Result};

/// Euclidean RGB distance between a pure-white and a pure-black pixel,
/// `sqrt(3 * 255^2)`. The two appearances of a fully transparent pixel.
const BACKGROUND_DISTANCE: f32 = 441.672_96;

/// Alpha at or below this is treated as fully transparent: un-premultiplying
/// by a near-zero alpha would blow the recovered color up.
const ALPHA_EPSILON: f32 = 0.01;

/// Continuous recovered alpha in `[0, 1]` for one pixel.
///
/// Clamped to absorb quantization noise that would otherwise push the value
/// slightly out of range.
fn recovered_alpha(white: [u8; 3], black: [u8; 3]) -> f32 {
    let dr = f32::from(white[0]) - f32::from(black[0]);
    let dg = f32::from(white[1]) - f32::from(black[1]);
    let db = f32::from(white[2]) - f32::from(black[2]);
    let pixel_dist = (dr * dr + dg * dg + db * db).sqrt();

    (1.0 - pixel_dist / BACKGROUND_DISTANCE).clamp(0.0, 1.0)
}

/// Recover straight color and alpha for one pixel from its two captures.
///
/// `white` and `black` are the observed RGB triples of the same logical pixel
/// composited over pure white and pure black. Returns `[r, g, b, a]` with the
/// color un-premultiplied against the black capture and every channel rounded
/// into the 8-bit range.
#[must_use]
pub fn recover_pixel(white: [u8; 3], black: [u8; 3]) -> [u8; 4] {
    let alpha = recovered_alpha(white, black);

    // Over black the blend reduces to observed = alpha * color, so the
    // straight color is the black capture divided by alpha.
    let mut rgb = [0.0_f32; 3];
    if alpha > ALPHA_EPSILON {
        for (out, &observed) in rgb.iter_mut().zip(black.iter()) {
            *out = f32::from(observed) / alpha;
        }
    }

    [
        quantize(rgb[0]),
        quantize(rgb[1]),
        quantize(rgb[2]),
        quantize(alpha * 255.0),
    ]
}

/// Round a recovered channel into the 8-bit range.
///
/// Un-premultiplication can overshoot 255 because of rounding in the source
/// captures; the value is never negative.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quantize(value: f32) -> u8 {
    value.min(255.0).round() as u8
}

/// Write one recovered pixel into a 4-byte output slot.
fn recover_into(dst: &mut [u8], white: &[u8], black: &[u8]) {
    dst.copy_from_slice(&recover_pixel(
        [white[0], white[1], white[2]],
        [black[0], black[1], black[2]],
    ));
}

/// Recover a full RGBA image from the two captures.
///
/// Each output pixel depends only on the two input pixels at the same
/// position, so the pass is data-parallel; with the `parallel` feature the
/// pixel range is partitioned across rayon workers.
///
/// # Errors
///
/// Returns [`Error::DimensionMismatch`] if the captures do not decode to the
/// same width and height. No pixel work happens in that case.
pub fn recover_image(white: &RgbImage, black: &RgbImage) -> Result<RgbaImage> {
    if white.dimensions() != black.dimensions() {
        return Err(Error::DimensionMismatch {
            white_width: white.width(),
            white_height: white.height(),
            black_width: black.width(),
            black_height: black.height(),
        });
    }

    let mut out = RgbaImage::new(white.width(), white.height());

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        out.par_chunks_exact_mut(4)
            .zip(white.as_raw().par_chunks_exact(3))
            .zip(black.as_raw().par_chunks_exact(3))
            .for_each(|((dst, w), b)| recover_into(dst, w, b));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for ((dst, w), b) in out
            .chunks_exact_mut(4)
            .zip(white.as_raw().chunks_exact(3))
            .zip(black.as_raw().chunks_exact(3))
        {
            recover_into(dst, w, b);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_pixel_keeps_color_and_full_alpha() {
        // Identical on both backgrounds means nothing shows through.
        assert_eq!(recover_pixel([50, 30, 10], [50, 30, 10]), [50, 30, 10, 255]);
        assert_eq!(recover_pixel([0, 0, 0], [0, 0, 0]), [0, 0, 0, 255]);
        assert_eq!(
            recover_pixel([255, 255, 255], [255, 255, 255]),
            [255, 255, 255, 255]
        );
    }

    #[test]
    fn fully_transparent_pixel_is_cleared() {
        // The captures look exactly like the backgrounds themselves.
        assert_eq!(recover_pixel([255, 255, 255], [0, 0, 0]), [0, 0, 0, 0]);
    }

    #[test]
    fn epsilon_guard_zeroes_color_but_keeps_alpha() {
        // alpha = 1 - 253/255 ~ 0.0078, below the guard: the color is forced
        // to black while the (tiny) alpha byte is still written.
        assert_eq!(recover_pixel([254, 254, 254], [1, 1, 1]), [0, 0, 0, 2]);
    }

    #[test]
    fn partially_transparent_pixel_recovers_straight_color() {
        // dist = sqrt(150^2 + 120^2 + 90^2) = sqrt(45000) ~ 212.132,
        // alpha = 1 - 212.132/441.673 ~ 0.51971 -> byte 133,
        // color = (50, 30, 10) / 0.51971 ~ (96, 58, 19).
        assert_eq!(recover_pixel([200, 150, 100], [50, 30, 10]), [96, 58, 19, 133]);
    }

    #[test]
    fn unpremultiply_overshoot_clamps_to_255() {
        // alpha = 1/3; 200 / (1/3) = 600 would overshoot every channel.
        assert_eq!(
            recover_pixel([30, 30, 30], [200, 200, 200]),
            [255, 255, 255, 85]
        );
    }

    #[test]
    fn alpha_strictly_decreases_with_capture_distance() {
        let mut previous = f32::INFINITY;
        for d in [0u8, 40, 80, 120, 160, 200, 240] {
            let alpha = recovered_alpha([d, d, d], [0, 0, 0]);
            assert!(
                alpha < previous,
                "alpha {alpha} at distance step {d} did not decrease from {previous}"
            );
            previous = alpha;
        }
    }

    #[test]
    fn recovered_alpha_stays_in_unit_range() {
        for (white, black) in [
            ([255, 255, 255], [0, 0, 0]),
            ([0, 0, 0], [255, 255, 255]),
            ([128, 5, 250], [7, 244, 13]),
            ([1, 1, 1], [1, 1, 1]),
        ] {
            let alpha = recovered_alpha(white, black);
            assert!((0.0..=1.0).contains(&alpha), "alpha {alpha} out of range");
        }
    }

    #[test]
    fn recover_image_rejects_mismatched_dimensions() {
        let white = RgbImage::new(4, 4);
        let black = RgbImage::new(4, 5);
        let err = recover_image(&white, &black).unwrap_err();
        assert!(matches!(
            err,
            Error::DimensionMismatch {
                white_height: 4,
                black_height: 5,
                ..
            }
        ));
    }

    #[test]
    fn recover_image_passes_opaque_pixels_through() {
        let img = RgbImage::from_fn(3, 2, |x, y| {
            image::Rgb([
                u8::try_from(x * 80).unwrap(),
                u8::try_from(y * 100).unwrap(),
                42,
            ])
        });

        let out = recover_image(&img, &img).unwrap();
        assert_eq!(out.dimensions(), (3, 2));
        for (src, dst) in img.pixels().zip(out.pixels()) {
            assert_eq!(dst.0, [src[0], src[1], src[2], 255]);
        }
    }
}
