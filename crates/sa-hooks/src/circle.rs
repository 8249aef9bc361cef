use core::f64::consts::TAU;

use sa_core::{Error, Point2i};

use crate::HookSet;

/// Places `hook_count` hooks on the circle inscribed in a `width x height` image.
///
/// The radius is half the smaller extent minus one pixel, centered on the
/// image. Angles run from `0` to a full turn inclusive, so hook `0` and hook
/// `hook_count - 1` coincide.
pub fn circle_hooks(width: usize, height: usize, hook_count: usize) -> Result<HookSet, Error> {
    if hook_count < 3 {
        return Err(Error::TooFewHooks { count: hook_count });
    }
    if width.min(height) < 4 {
        return Err(Error::TooSmall { width, height });
    }

    let cx = width as f64 / 2.0;
    let cy = height as f64 / 2.0;
    let radius = width.min(height) as f64 / 2.0 - 1.0;
    let step = TAU / (hook_count - 1) as f64;

    let points = (0..hook_count)
        .map(|i| {
            let theta = if i == hook_count - 1 {
                TAU
            } else {
                step * i as f64
            };
            Point2i::round_from(cx + radius * theta.cos(), cy + radius * theta.sin())
        })
        .collect();

    HookSet::from_points(points)
}
