use gridwarp_raster::{FillPolicy, NoData, Raster, RasterMut, RoiSampler, Sample};

use crate::affine::{invert_affine_transform, transform_point};
use crate::blend::{blend_full, blend_partial};
use crate::clip::{clip_scanline, ClipSpan, ValidRegion};
use crate::error::WarpError;
use crate::walk::{AffineStep, Walker};

/// Reconstruction kernel used when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResamplingKernel {
    /// Copy the nearest source sample verbatim.
    Nearest,
    /// Blend the four surrounding source samples.
    Bilinear,
}

/// The four structurally distinct inner-loop configurations, derived
/// once per tile from the presence of a ROI and a no-data classifier.
///
/// This classification is closed and exhaustive; ROI and no-data
/// together is the fourth case, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityCase {
    /// No ROI, no no-data.
    Plain,
    /// ROI only.
    RoiOnly,
    /// No-data only.
    NoDataOnly,
    /// Both ROI and no-data.
    RoiAndNoData,
}

impl ValidityCase {
    /// Resolve the case from the presence flags.
    pub fn resolve(has_roi: bool, has_nodata: bool) -> Self {
        match (has_roi, has_nodata) {
            (false, false) => Self::Plain,
            (true, false) => Self::RoiOnly,
            (false, true) => Self::NoDataOnly,
            (true, true) => Self::RoiAndNoData,
        }
    }
}

/// Affine resampling engine for one sample datatype.
///
/// Built once per (transform, kernel, band-count) configuration and
/// reused across tiles; all per-tile state lives on the stack of
/// [`AffineWarp::warp`], so a shared engine may serve concurrent tile
/// computations over disjoint destination regions.
///
/// The backward mapping follows pixel centers: destination pixel
/// (x, y) samples the source at `M_inv * (x + 0.5, y + 0.5) - 0.5`.
/// Taps for coordinates within half a pixel of the source edge clamp
/// to the edge.
///
/// # Example
///
/// ```
/// use gridwarp_raster::{FillPolicy, Raster, RasterDesc, RasterMut};
/// use gridwarp_resample::warp::{AffineWarp, ResamplingKernel};
///
/// let data: Vec<u8> = (0u8..16).collect();
/// let src = Raster::new(RasterDesc::interleaved(4, 4, 1), &data).unwrap();
///
/// let mut out = vec![0u8; 16];
/// let mut dst = RasterMut::new(RasterDesc::interleaved(4, 4, 1), &mut out).unwrap();
///
/// let engine = AffineWarp::new(
///     &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
///     1,
///     ResamplingKernel::Bilinear,
///     None,
///     FillPolicy::fill(vec![0]),
/// )
/// .unwrap();
/// engine.warp(&src, None, &mut dst).unwrap();
///
/// assert_eq!(out, (0u8..16).collect::<Vec<_>>());
/// ```
#[derive(Debug, Clone)]
pub struct AffineWarp<T: Sample> {
    inverse: [f64; 6],
    step: AffineStep,
    kernel: ResamplingKernel,
    bands: usize,
    nodata: Option<NoData<T>>,
    fill: FillPolicy<T>,
}

impl<T: Sample> AffineWarp<T> {
    /// Configure an engine for a forward affine transform.
    ///
    /// # Arguments
    ///
    /// * `forward` - The 2x3 forward transform `[a, b, tx, d, e, ty]`
    ///   mapping source to destination coordinates.
    /// * `bands` - Band count of the rasters the engine will process.
    /// * `kernel` - The reconstruction kernel.
    /// * `nodata` - Optional no-data classifier for source samples.
    /// * `fill` - Policy for destination pixels that cannot be computed.
    ///
    /// # Errors
    ///
    /// Fails before any tile is processed when the transform is
    /// singular, the band count is zero, or the fill policy does not
    /// carry one value per band.
    pub fn new(
        forward: &[f64; 6],
        bands: usize,
        kernel: ResamplingKernel,
        nodata: Option<NoData<T>>,
        fill: FillPolicy<T>,
    ) -> Result<Self, WarpError> {
        if bands == 0 {
            return Err(WarpError::ZeroBands);
        }
        if let Some(fill_bands) = fill.bands() {
            if fill_bands != bands {
                return Err(WarpError::FillBandMismatch(fill_bands, bands));
            }
        }
        let inverse = invert_affine_transform(forward)?;
        let step = AffineStep::from_inverse(&inverse);
        Ok(Self {
            inverse,
            step,
            kernel,
            bands,
            nodata,
            fill,
        })
    }

    /// The reconstruction kernel the engine was built with.
    pub fn kernel(&self) -> ResamplingKernel {
        self.kernel
    }

    /// The band count the engine was built for.
    pub fn bands(&self) -> usize {
        self.bands
    }

    /// The per-destination-column source increment.
    pub fn step(&self) -> &AffineStep {
        &self.step
    }

    /// Resample one destination tile in place.
    ///
    /// Per-pixel missing input (outside the source, ROI-excluded,
    /// no-data, NaN) is resolved to the fill value or left untouched
    /// per the fill policy; it never raises an error.
    ///
    /// # Errors
    ///
    /// Fails at entry when either raster does not match the engine's
    /// band count. A tile computation that starts always completes.
    pub fn warp(
        &self,
        src: &Raster<'_, T>,
        roi: Option<&dyn RoiSampler>,
        dst: &mut RasterMut<'_, T>,
    ) -> Result<(), WarpError> {
        if src.desc().bands != self.bands {
            return Err(WarpError::BandCountMismatch(src.desc().bands, self.bands));
        }
        if dst.desc().bands != self.bands {
            return Err(WarpError::BandCountMismatch(dst.desc().bands, self.bands));
        }

        let region = ValidRegion::of_bounds(src.bounds());

        // resolved once per tile; one tile-loop instantiation per
        // ValidityCase
        match (roi, self.nodata.as_ref()) {
            (None, None) => self.warp_tile(src, dst, &region, |_, _| true, |_| true),
            (Some(roi), None) => {
                self.warp_tile(src, dst, &region, |px, py| roi.contains(px, py), |_| true)
            }
            (None, Some(nodata)) => self.warp_tile(
                src,
                dst,
                &region,
                |_, _| true,
                |s: T| !s.is_nan() && !nodata.contains(s),
            ),
            (Some(roi), Some(nodata)) => self.warp_tile(
                src,
                dst,
                &region,
                |px, py| roi.contains(px, py),
                |s: T| !s.is_nan() && !nodata.contains(s),
            ),
        }
        Ok(())
    }

    fn warp_tile(
        &self,
        src: &Raster<'_, T>,
        dst: &mut RasterMut<'_, T>,
        region: &ValidRegion,
        pos_ok: impl Fn(i64, i64) -> bool,
        sample_ok: impl Fn(T) -> bool,
    ) {
        let db = dst.bounds();
        for y in db.min_y..db.max_y {
            // full transform once per scanline, walker arithmetic after
            let (u, v) = transform_point(db.min_x as f64 + 0.5, y as f64 + 0.5, &self.inverse);
            let (sx, sy) = (u - 0.5, v - 0.5);

            let span = clip_scanline(
                (sx, sy),
                (self.inverse[0], self.inverse[3]),
                region,
                db.min_x,
                db.max_x,
            );
            self.fill_run(dst, y, db.min_x, span.begin);
            self.fill_run(dst, y, span.end, db.max_x);
            if span.is_empty() {
                continue;
            }

            let mut walker = Walker::start(sx, sy);
            walker.advance_by(&self.step, span.begin - db.min_x);

            match self.kernel {
                ResamplingKernel::Nearest => {
                    self.nearest_span(src, dst, y, span, walker, &pos_ok, &sample_ok)
                }
                ResamplingKernel::Bilinear => {
                    self.bilinear_span(src, dst, y, span, walker, &pos_ok, &sample_ok)
                }
            }
        }
    }

    fn nearest_span(
        &self,
        src: &Raster<'_, T>,
        dst: &mut RasterMut<'_, T>,
        y: i64,
        span: ClipSpan,
        mut walker: Walker,
        pos_ok: impl Fn(i64, i64) -> bool,
        sample_ok: impl Fn(T) -> bool,
    ) {
        let sb = src.bounds();
        for x in span.begin..span.end {
            let (nx, ny) = walker.nearest();
            let tx = nx.clamp(sb.min_x, sb.max_x - 1);
            let ty = ny.clamp(sb.min_y, sb.max_y - 1);
            if pos_ok(tx, ty) {
                for band in 0..self.bands {
                    let tap = src.get(tx, ty, band);
                    if sample_ok(tap) {
                        // valid taps are copied verbatim
                        dst.set(x, y, band, tap);
                    } else if self.fill.writes_fill() {
                        dst.set(x, y, band, self.fill.value(band));
                    }
                }
            } else {
                self.fill_pixel(dst, x, y);
            }
            walker.advance(&self.step);
        }
    }

    fn bilinear_span(
        &self,
        src: &Raster<'_, T>,
        dst: &mut RasterMut<'_, T>,
        y: i64,
        span: ClipSpan,
        mut walker: Walker,
        pos_ok: impl Fn(i64, i64) -> bool,
        sample_ok: impl Fn(T) -> bool,
    ) {
        let sb = src.bounds();
        for x in span.begin..span.end {
            let (ix, iy) = walker.point();
            let x0 = ix.clamp(sb.min_x, sb.max_x - 1);
            let x1 = (ix + 1).clamp(sb.min_x, sb.max_x - 1);
            let y0 = iy.clamp(sb.min_y, sb.max_y - 1);
            let y1 = (iy + 1).clamp(sb.min_y, sb.max_y - 1);
            let xfrac = walker.xfrac();
            let yfrac = walker.yfrac();

            // ROI validity is per position, shared by all bands
            let pos = [
                pos_ok(x0, y0),
                pos_ok(x1, y0),
                pos_ok(x0, y1),
                pos_ok(x1, y1),
            ];

            for band in 0..self.bands {
                let taps = [
                    src.get(x0, y0, band),
                    src.get(x1, y0, band),
                    src.get(x0, y1, band),
                    src.get(x1, y1, band),
                ];
                let weights = [
                    pos[0] && sample_ok(taps[0]),
                    pos[1] && sample_ok(taps[1]),
                    pos[2] && sample_ok(taps[2]),
                    pos[3] && sample_ok(taps[3]),
                ];

                let blended = if weights == [true; 4] {
                    blend_full(
                        taps[0].to_f64(),
                        taps[1].to_f64(),
                        taps[2].to_f64(),
                        taps[3].to_f64(),
                        xfrac,
                        yfrac,
                    )
                } else if weights == [false; 4] {
                    if self.fill.writes_fill() {
                        dst.set(x, y, band, self.fill.value(band));
                    }
                    continue;
                } else {
                    blend_partial(
                        [
                            taps[0].to_f64(),
                            taps[1].to_f64(),
                            taps[2].to_f64(),
                            taps[3].to_f64(),
                        ],
                        weights,
                        xfrac,
                        yfrac,
                    )
                };
                dst.set(x, y, band, T::from_blend(blended));
            }
            walker.advance(&self.step);
        }
    }

    fn fill_run(&self, dst: &mut RasterMut<'_, T>, y: i64, from: i64, to: i64) {
        if !self.fill.writes_fill() {
            return;
        }
        for x in from..to {
            for band in 0..self.bands {
                dst.set(x, y, band, self.fill.value(band));
            }
        }
    }

    fn fill_pixel(&self, dst: &mut RasterMut<'_, T>, x: i64, y: i64) {
        if !self.fill.writes_fill() {
            return;
        }
        for band in 0..self.bands {
            dst.set(x, y, band, self.fill.value(band));
        }
    }
}

/// Applies an affine transformation to a raster, leaving destination
/// pixels that do not map into the source untouched.
///
/// # Arguments
///
/// * `src` - The source raster view.
/// * `dst` - The destination raster view, written in place.
/// * `m` - The 2x3 forward affine transformation matrix.
/// * `kernel` - The reconstruction kernel to use.
///
/// # Example
///
/// ```
/// use gridwarp_raster::{Raster, RasterDesc, RasterMut};
/// use gridwarp_resample::warp::{warp_affine, ResamplingKernel};
///
/// let data: Vec<f32> = (0..20).map(|x| x as f32).collect();
/// let src = Raster::new(RasterDesc::interleaved(4, 5, 1), &data).unwrap();
///
/// let mut out = vec![0.0f32; 20];
/// let mut dst = RasterMut::new(RasterDesc::interleaved(4, 5, 1), &mut out).unwrap();
///
/// let m = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
/// warp_affine(&src, &mut dst, &m, ResamplingKernel::Nearest).unwrap();
///
/// assert_eq!(out, data);
/// ```
pub fn warp_affine<T: Sample>(
    src: &Raster<'_, T>,
    dst: &mut RasterMut<'_, T>,
    m: &[f64; 6],
    kernel: ResamplingKernel,
) -> Result<(), WarpError> {
    let engine = AffineWarp::new(m, src.desc().bands, kernel, None, FillPolicy::leave())?;
    engine.warp(src, None, dst)
}
