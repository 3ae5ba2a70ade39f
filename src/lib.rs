//! Recover an image's alpha channel from captures over two known backgrounds.
//!
//! Compositing is a linear blend: `observed = alpha * color + (1 - alpha) *
//! background`. Given the same image captured once over pure white and once
//! over pure black, both unknowns can be solved per pixel: the RGB distance
//! between the two captures shrinks linearly from the white/black background
//! distance (fully transparent) to zero (fully opaque), and the straight
//! color falls out of the black capture once alpha is known.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! use alpha_recovery::recover_file;
//!
//! recover_file(
//!     Path::new("logo_on_white.png"),
//!     Path::new("logo_on_black.png"),
//!     Path::new("logo.png"),
//! )
//! .expect("recovery failed");
//! ```
//!
//! The per-pixel math is also available directly for callers that hold raw
//! buffers:
//!
//! ```
//! use alpha_recovery::matting::recover_pixel;
//!
//! // A pixel that looks identical on both backgrounds is fully opaque.
//! assert_eq!(recover_pixel([50, 30, 10], [50, 30, 10]), [50, 30, 10, 255]);
//! ```

#![deny(missing_docs)]

mod engine;
pub mod error;
pub mod matting;

pub use engine::{recover_file, save_rgba};
pub use error::{Error, Result};
