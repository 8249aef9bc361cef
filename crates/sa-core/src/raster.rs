//! Supersampling line rasterizer.
//!
//! A segment from `p1` to `p2` is sampled `n = max(|dx|, |dy|)` times with
//! evenly spaced interpolation on both axes, each sample rounded half-to-even
//! to the pixel grid. The first sample is `p1`; when `n > 1` the last is `p2`.
//! Samples may repeat a pixel on short near-axis segments. This is not
//! Bresenham: a segment of Chebyshev length `n` produces `n` samples, not `n + 1`.

use crate::Error;
use crate::geom::Point2i;

/// Number of samples [`rasterize`] produces for the segment `p1 -> p2`.
pub fn sample_count(p1: Point2i, p2: Point2i) -> usize {
    p1.chebyshev(p2) as usize
}

/// Rasterizes the segment `p1 -> p2` into pixel samples.
///
/// Coincident endpoints yield [`Error::DegenerateSegment`] instead of an empty path.
pub fn rasterize(p1: Point2i, p2: Point2i) -> Result<Vec<Point2i>, Error> {
    let mut out = Vec::new();
    rasterize_into(p1, p2, &mut out)?;
    Ok(out)
}

/// Like [`rasterize`], reusing `out` as the sample buffer. `out` is cleared first.
pub fn rasterize_into(p1: Point2i, p2: Point2i, out: &mut Vec<Point2i>) -> Result<(), Error> {
    out.clear();

    let n = sample_count(p1, p2);
    if n == 0 {
        return Err(Error::DegenerateSegment { at: p1 });
    }

    out.reserve(n);
    out.push(p1);
    if n == 1 {
        return Ok(());
    }

    let (x0, y0) = (p1.x as f64, p1.y as f64);
    let step_x = (p2.x - p1.x) as f64 / (n - 1) as f64;
    let step_y = (p2.y - p1.y) as f64 / (n - 1) as f64;

    for i in 1..n - 1 {
        let t = i as f64;
        out.push(Point2i::round_from(x0 + t * step_x, y0 + t * step_y));
    }
    out.push(p2);

    Ok(())
}
