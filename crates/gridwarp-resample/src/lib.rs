#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Affine matrix utilities.
pub mod affine;

/// Weighted bilinear interpolation formulas.
pub mod blend;

/// Scanline clipping against the valid source region.
pub mod clip;

/// Error types for the resample module.
pub mod error;

/// Row-parallel warp driver.
pub mod parallel;

/// Incremental coordinate walker.
pub mod walk;

/// Affine resampling engine.
pub mod warp;

pub use crate::error::WarpError;
pub use crate::warp::{warp_affine, AffineWarp, ResamplingKernel, ValidityCase};
