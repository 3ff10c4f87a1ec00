//! Row-parallel warp driver.
//!
//! The per-tile engine is a pure synchronous function, so disjoint
//! destination scanlines can be computed concurrently. The engine
//! configuration is immutable and shared read-only across workers.

use rayon::prelude::*;

use gridwarp_raster::{Raster, RasterMut, RoiSampler, Sample};

use crate::error::WarpError;
use crate::warp::AffineWarp;

/// Run a warp with destination scanlines distributed over the global
/// Rayon thread pool.
///
/// The destination layout must keep every scanline's samples within
/// its own `line_stride` chunk; layouts that interleave rows of
/// different bands (planar multi-band buffers) fall back to the serial
/// [`AffineWarp::warp`].
///
/// # Errors
///
/// Same entry validation as [`AffineWarp::warp`].
pub fn warp_rows_par<T: Sample>(
    engine: &AffineWarp<T>,
    src: &Raster<'_, T>,
    roi: Option<&dyn RoiSampler>,
    dst: &mut RasterMut<'_, T>,
) -> Result<(), WarpError> {
    let desc = dst.desc().clone();
    let total = desc.height * desc.line_stride;
    let splittable = desc.rows_are_independent() && dst.as_slice_mut().len() >= total;
    if !splittable {
        return engine.warp(src, roi, dst);
    }

    dst.as_slice_mut()[..total]
        .par_chunks_exact_mut(desc.line_stride)
        .enumerate()
        .try_for_each(|(row, line)| {
            let mut line_view = RasterMut::new(desc.scanline(row), line)?;
            engine.warp(src, roi, &mut line_view)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::get_rotation_matrix2d;
    use crate::warp::ResamplingKernel;
    use gridwarp_raster::{FillPolicy, NoData, RasterDesc};

    #[test]
    fn parallel_rows_match_serial() -> Result<(), WarpError> {
        let (w, h) = (64usize, 48usize);
        let data: Vec<u8> = (0..w * h * 2).map(|i| (i % 251) as u8).collect();
        let src = Raster::new(RasterDesc::interleaved(w, h, 2), &data)?;

        let m = get_rotation_matrix2d((w as f64 / 2.0, h as f64 / 2.0), 30.0, 0.8);
        let engine = AffineWarp::new(
            &m,
            2,
            ResamplingKernel::Bilinear,
            Some(NoData::range(10u8, 20u8)),
            FillPolicy::fill(vec![1u8, 2]),
        )?;

        let mut serial = vec![0u8; w * h * 2];
        let mut serial_dst = RasterMut::new(RasterDesc::interleaved(w, h, 2), &mut serial)?;
        engine.warp(&src, None, &mut serial_dst)?;

        let mut parallel = vec![0u8; w * h * 2];
        let mut parallel_dst = RasterMut::new(RasterDesc::interleaved(w, h, 2), &mut parallel)?;
        warp_rows_par(&engine, &src, None, &mut parallel_dst)?;

        assert_eq!(serial, parallel);
        Ok(())
    }

    #[test]
    fn planar_destination_falls_back_to_serial() -> Result<(), WarpError> {
        let data: Vec<u8> = (0..32).collect();
        let src = Raster::new(RasterDesc::banded(4, 4, 2), &data)?;

        let engine = AffineWarp::new(
            &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            2,
            ResamplingKernel::Nearest,
            None,
            FillPolicy::fill(vec![0u8, 0]),
        )?;

        let mut out = vec![0u8; 32];
        let mut dst = RasterMut::new(RasterDesc::banded(4, 4, 2), &mut out)?;
        warp_rows_par(&engine, &src, None, &mut dst)?;
        assert_eq!(out, data);
        Ok(())
    }
}
