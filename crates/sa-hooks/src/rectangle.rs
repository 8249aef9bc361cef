use std::collections::HashSet;

use sa_core::{Error, Point2i};

use crate::HookSet;

/// Spreads roughly `hook_count` hooks along the border of a `width x height` image.
///
/// Hooks run clockwise from the top-left corner: top side, right side, bottom
/// side reversed, left side reversed. The top and right sides get
/// `ceil(share)` hooks and the closing bottom and left sides one fewer, where
/// `share` is the side's fraction of the half perimeter times `hook_count / 2`.
/// The sequence is then rotated left by `offset` positions and coordinates
/// shared by adjacent sides are dropped, keeping the first occurrence.
///
/// Returns the layout together with its actual hook count.
pub fn rectangle_hooks(
    width: usize,
    height: usize,
    hook_count: usize,
    offset: usize,
) -> Result<(HookSet, usize), Error> {
    if hook_count < 3 {
        return Err(Error::TooFewHooks { count: hook_count });
    }
    if width < 2 || height < 2 {
        return Err(Error::TooSmall { width, height });
    }

    // last addressable pixel on each axis
    let w = (width - 1) as f64;
    let h = (height - 1) as f64;
    let half = hook_count as f64 / 2.0;
    let nx = (w / (w + h) * half).ceil() as usize;
    let ny = (h / (w + h) * half).ceil() as usize;

    let first_x = linspace(0.0, w, nx);
    let first_y = linspace(0.0, h, ny);
    let second_x = linspace(0.0, w, nx.saturating_sub(1));
    let second_y = linspace(0.0, h, ny.saturating_sub(1));

    let right = first_x.last().copied().unwrap_or(w);
    let bottom = first_y.last().copied().unwrap_or(h);

    let mut ring: Vec<Point2i> = Vec::with_capacity(2 * (nx + ny));
    ring.extend(first_x.iter().map(|&x| Point2i::round_from(x, 0.0)));
    ring.extend(first_y.iter().map(|&y| Point2i::round_from(right, y)));
    ring.extend(second_x.iter().rev().map(|&x| Point2i::round_from(x, bottom)));
    ring.extend(second_y.iter().rev().map(|&y| Point2i::round_from(0.0, y)));

    if !ring.is_empty() {
        let shift = offset % ring.len();
        ring.rotate_left(shift);
    }

    let mut seen = HashSet::with_capacity(ring.len());
    ring.retain(|p| seen.insert(*p));

    let actual = ring.len();
    let hooks = HookSet::from_points(ring)?;
    Ok((hooks, actual))
}

/// `n` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n - 1).map(|i| start + step * i as f64).collect();
            out.push(stop);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use sa_core::{Error, Point2i};

    use super::{linspace, rectangle_hooks};

    fn p(x: i32, y: i32) -> Point2i {
        Point2i::new(x, y)
    }

    #[test]
    fn linspace_endpoints() {
        assert!(linspace(0.0, 9.0, 0).is_empty());
        assert_eq!(linspace(0.0, 9.0, 1), vec![0.0]);
        assert_eq!(linspace(0.0, 9.0, 4), vec![0.0, 3.0, 6.0, 9.0]);
    }

    #[test]
    fn square_layout_drops_shared_corners() {
        let (hooks, actual) = rectangle_hooks(10, 10, 20, 0).expect("valid layout");
        let expected = [
            p(0, 0),
            p(2, 0),
            p(4, 0),
            p(7, 0),
            p(9, 0),
            p(9, 2),
            p(9, 4),
            p(9, 7),
            p(9, 9),
            p(6, 9),
            p(3, 9),
            p(0, 9),
            p(0, 6),
            p(0, 3),
        ];
        assert_eq!(actual, 14);
        assert_eq!(hooks.len(), actual);
        assert_eq!(hooks.as_slice(), &expected);
    }

    #[test]
    fn closing_sides_are_not_mirrors_of_opening_sides() {
        let (hooks, _) = rectangle_hooks(10, 10, 20, 0).expect("valid layout");
        let top = hooks.iter().filter(|q| q.y == 0).count();
        let bottom = hooks.iter().filter(|q| q.y == 9).count();
        assert_ne!(top, bottom);
    }

    #[test]
    fn offset_rotates_numbering() {
        let (plain, _) = rectangle_hooks(10, 10, 20, 0).expect("valid layout");
        let (shifted, actual) = rectangle_hooks(10, 10, 20, 3).expect("valid layout");
        assert_eq!(actual, 14);
        assert_eq!(shifted.get(0), Some(p(7, 0)));
        assert_eq!(shifted.get(13), Some(p(4, 0)));

        let mut a: Vec<_> = plain.iter().collect();
        let mut b: Vec<_> = shifted.iter().collect();
        a.sort_by_key(|q| (q.x, q.y));
        b.sort_by_key(|q| (q.x, q.y));
        assert_eq!(a, b);
    }

    #[test]
    fn wide_layout_is_proportional_and_in_bounds() {
        let (hooks, actual) = rectangle_hooks(301, 101, 200, 17).expect("valid layout");
        assert_eq!(hooks.len(), actual);
        assert!(actual <= 200);
        assert_eq!(hooks.first_out_of_bounds(301, 101), None);

        let horizontal = hooks.iter().filter(|q| q.y == 0 || q.y == 100).count();
        let vertical = hooks.iter().filter(|q| q.x == 0 || q.x == 300).count();
        assert!(horizontal > 2 * vertical);
    }

    #[test]
    fn invalid_parameters() {
        assert_eq!(
            rectangle_hooks(10, 10, 2, 0).unwrap_err(),
            Error::TooFewHooks { count: 2 }
        );
        assert_eq!(
            rectangle_hooks(1, 10, 20, 0).unwrap_err(),
            Error::TooSmall {
                width: 1,
                height: 10
            }
        );
    }
}
