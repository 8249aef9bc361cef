use sa_core::{Error, Point2i};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSet {
    points: Vec<Point2i>,
}

impl HookSet {
    pub fn from_points(points: Vec<Point2i>) -> Result<Self, Error> {
        if points.len() < 3 {
            return Err(Error::TooFewHooks {
                count: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point2i> {
        self.points.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Point2i> + '_ {
        self.points.iter().copied()
    }

    pub fn as_slice(&self) -> &[Point2i] {
        &self.points
    }

    /// Index distance between two hooks going the short way around the boundary.
    pub fn cyclic_distance(&self, a: usize, b: usize) -> usize {
        let d = a.abs_diff(b) % self.points.len();
        d.min(self.points.len() - d)
    }

    /// Index of the first hook lying outside a `width x height` image.
    pub fn first_out_of_bounds(&self, width: usize, height: usize) -> Option<usize> {
        self.points
            .iter()
            .position(|p| p.to_index(width, height).is_none())
    }
}

#[cfg(test)]
mod tests {
    use sa_core::{Error, Point2i};

    use super::HookSet;

    fn square() -> HookSet {
        HookSet::from_points(vec![
            Point2i::new(0, 0),
            Point2i::new(4, 0),
            Point2i::new(4, 4),
            Point2i::new(0, 4),
            Point2i::new(0, 2),
        ])
        .expect("five hooks")
    }

    #[test]
    fn rejects_fewer_than_three_hooks() {
        let err = HookSet::from_points(vec![Point2i::new(0, 0), Point2i::new(1, 1)]).unwrap_err();
        assert_eq!(err, Error::TooFewHooks { count: 2 });
    }

    #[test]
    fn cyclic_distance_wraps() {
        let hooks = square();
        assert_eq!(hooks.cyclic_distance(0, 0), 0);
        assert_eq!(hooks.cyclic_distance(0, 1), 1);
        assert_eq!(hooks.cyclic_distance(0, 4), 1);
        assert_eq!(hooks.cyclic_distance(4, 0), 1);
        assert_eq!(hooks.cyclic_distance(1, 3), 2);
        assert_eq!(hooks.cyclic_distance(0, 3), 2);
    }

    #[test]
    fn bounds_check_reports_first_offender() {
        let hooks = square();
        assert_eq!(hooks.first_out_of_bounds(5, 5), None);
        assert_eq!(hooks.first_out_of_bounds(4, 5), Some(1));
        assert_eq!(hooks.first_out_of_bounds(5, 4), Some(2));
    }
}
