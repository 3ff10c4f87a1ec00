#![deny(missing_docs)]
//! Raster types and traits for geometric resampling.

/// Rectangular sample-buffer views and layout descriptors.
pub mod raster;

/// Error types for the raster module.
pub mod error;

/// Fill policy for uncomputable destination pixels.
pub mod fill;

/// No-data sample classification.
pub mod nodata;

/// Region-of-interest samplers.
pub mod roi;

/// Sample datatype trait and implementations.
pub mod sample;

pub use crate::error::RasterError;
pub use crate::fill::FillPolicy;
pub use crate::nodata::{NoData, NoDataRule};
pub use crate::raster::{Raster, RasterDesc, RasterMut, Rect};
pub use crate::roi::{DenseRoi, PointRoi, RoiSampler};
pub use crate::sample::Sample;
