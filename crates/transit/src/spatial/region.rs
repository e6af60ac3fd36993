//! Axis-aligned regions and their quadrant subdivision.
//!
//! Regions use a Y-up convention: `origin` is the top-left corner
//! (min X, max Y) and `bottom_right` is (max X, min Y).
//!
//! ```text
//! origin ---------+---------------+
//!   |             |               |
//!   |    0 (NW)   |    1 (NE)     |
//!   |             |               |
//!   +----------centre-------------+
//!   |             |               |
//!   |    2 (SW)   |    3 (SE)     |
//!   |             |               |
//!   +-------------+-------- bottom_right
//! ```

use geo::Point;

/// One of the four equal sub-regions produced by splitting a region at its
/// centre. The discriminant is the child slot used by the spatial index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    NorthWest = 0,
    NorthEast = 1,
    SouthWest = 2,
    SouthEast = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::NorthWest,
        Quadrant::NorthEast,
        Quadrant::SouthWest,
        Quadrant::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn from_halves(bottom: usize, right: usize) -> Self {
        Self::ALL[2 * bottom + right]
    }

    /// The diagonally opposite quadrant.
    pub fn opposite(self) -> Self {
        Self::ALL[3 - self.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    origin: Point,
    bottom_right: Point,
}

impl Region {
    /// Region from its top-left and bottom-right corners.
    ///
    /// # Panics
    ///
    /// Panics if `origin` is not above and to the left of `bottom_right`.
    pub fn new(origin: Point, bottom_right: Point) -> Self {
        assert!(
            origin.x() <= bottom_right.x() && bottom_right.y() <= origin.y(),
            "region origin must be the top-left corner"
        );
        Self {
            origin,
            bottom_right,
        }
    }

    /// Region spanning two arbitrary opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            origin: Point::new(a.x().min(b.x()), a.y().max(b.y())),
            bottom_right: Point::new(a.x().max(b.x()), a.y().min(b.y())),
        }
    }

    /// Smallest region covering every point, or `None` for an empty input.
    pub fn from_extents<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (mut min_x, mut max_x) = (first.x(), first.x());
        let (mut min_y, mut max_y) = (first.y(), first.y());

        for p in points {
            min_x = min_x.min(p.x());
            max_x = max_x.max(p.x());
            min_y = min_y.min(p.y());
            max_y = max_y.max(p.y());
        }

        Some(Self {
            origin: Point::new(min_x, max_y),
            bottom_right: Point::new(max_x, min_y),
        })
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    pub fn centre(&self) -> Point {
        Point::new(
            (self.origin.x() + self.bottom_right.x()) / 2.0,
            (self.origin.y() + self.bottom_right.y()) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.bottom_right.x() - self.origin.x()
    }

    pub fn height(&self) -> f64 {
        self.origin.y() - self.bottom_right.y()
    }

    /// Region grown by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Self {
        Self::from_corners(
            Point::new(self.origin.x() - margin, self.origin.y() + margin),
            Point::new(self.bottom_right.x() + margin, self.bottom_right.y() - margin),
        )
    }

    /// Edges are inclusive on all four sides.
    pub fn contains(&self, point: Point) -> bool {
        !(point.x() < self.origin.x()
            || point.x() > self.bottom_right.x()
            || point.y() > self.origin.y()
            || point.y() < self.bottom_right.y())
    }

    /// True when no point of this region can be closer than `distance` to
    /// `target`.
    ///
    /// Tests `target` against the region expanded by `distance` along each
    /// axis. The expanded box over-approximates the true distance ball around
    /// the region, so this may fail to rule out a region near a corner but
    /// never rules out one that holds a closer point.
    pub fn is_beyond(&self, target: Point, distance: f64) -> bool {
        target.x() < self.origin.x() - distance
            || target.x() > self.bottom_right.x() + distance
            || target.y() > self.origin.y() + distance
            || target.y() < self.bottom_right.y() - distance
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let centre = self.centre();
        let (ox, oy) = (self.origin.x(), self.origin.y());
        let (bx, by) = (self.bottom_right.x(), self.bottom_right.y());
        let (cx, cy) = (centre.x(), centre.y());

        let (origin, bottom_right) = match quadrant {
            Quadrant::NorthWest => ((ox, oy), (cx, cy)),
            Quadrant::NorthEast => ((cx, oy), (bx, cy)),
            Quadrant::SouthWest => ((ox, cy), (cx, by)),
            Quadrant::SouthEast => ((cx, cy), (bx, by)),
        };

        Self {
            origin: origin.into(),
            bottom_right: bottom_right.into(),
        }
    }

    /// All four quadrants, indexed by [`Quadrant::index`].
    pub fn quadrants(&self) -> [Self; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }

    /// Quadrant on the same side of both midlines as `target`. Points on a
    /// midline fall to the north/west side.
    pub fn quadrant_towards(&self, target: Point) -> Quadrant {
        let right = usize::from(2.0 * target.x() > self.origin.x() + self.bottom_right.x());
        let bottom = usize::from(2.0 * target.y() < self.origin.y() + self.bottom_right.y());
        Quadrant::from_halves(bottom, right)
    }

    /// Quadrants ordered from least to most promising for a search around
    /// `target`: the opposite diagonal first, then the vertical and horizontal
    /// neighbours, and the quadrant towards `target` last.
    pub fn search_order(&self, target: Point) -> [Quadrant; 4] {
        let best = self.quadrant_towards(target);
        let bottom = best.index() / 2;
        let right = best.index() % 2;

        [
            best.opposite(),
            Quadrant::from_halves(1 - bottom, right),
            Quadrant::from_halves(bottom, 1 - right),
            best,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64) -> Region {
        Region::new(Point::new(0.0, size), Point::new(size, 0.0))
    }

    #[test]
    fn test_contains_is_inclusive_on_edges() {
        let region = square(10.0);

        assert!(region.contains(Point::new(0.0, 10.0)));
        assert!(region.contains(Point::new(10.0, 0.0)));
        assert!(region.contains(Point::new(5.0, 5.0)));
        assert!(!region.contains(Point::new(-0.001, 5.0)));
        assert!(!region.contains(Point::new(5.0, 10.001)));
        assert!(!region.contains(Point::new(10.001, 5.0)));
        assert!(!region.contains(Point::new(5.0, -0.001)));
    }

    #[test]
    fn test_quadrant_geometry() {
        let [nw, ne, sw, se] = square(10.0).quadrants();

        assert_eq!(nw, Region::new(Point::new(0.0, 10.0), Point::new(5.0, 5.0)));
        assert_eq!(ne, Region::new(Point::new(5.0, 10.0), Point::new(10.0, 5.0)));
        assert_eq!(sw, Region::new(Point::new(0.0, 5.0), Point::new(5.0, 0.0)));
        assert_eq!(se, Region::new(Point::new(5.0, 5.0), Point::new(10.0, 0.0)));

        for q in [nw, ne, sw, se] {
            assert_relative_eq!(q.width(), 5.0);
            assert_relative_eq!(q.height(), 5.0);
        }
    }

    #[test]
    fn test_quadrants_cover_parent() {
        let parent = Region::new(Point::new(-3.0, 7.0), Point::new(9.0, -1.0));
        let quadrants = parent.quadrants();

        // Sample a grid that includes the midlines and outer edges
        for i in 0..=24 {
            for j in 0..=16 {
                let p = Point::new(-3.0 + i as f64 * 0.5, -1.0 + j as f64 * 0.5);
                assert!(parent.contains(p));

                let holders = quadrants.iter().filter(|q| q.contains(p)).count();
                let on_midline = p.x() == parent.centre().x() || p.y() == parent.centre().y();
                if on_midline {
                    assert!(holders >= 2, "{:?} should sit on a shared edge", p);
                } else {
                    assert_eq!(holders, 1, "{:?} should be in exactly one quadrant", p);
                }
            }
        }
    }

    #[test]
    fn test_from_extents_and_padding() {
        let region = Region::from_extents([
            Point::new(2.0, 3.0),
            Point::new(-1.0, 8.0),
            Point::new(4.0, 5.0),
        ])
        .unwrap();

        assert_eq!(region.origin(), Point::new(-1.0, 8.0));
        assert_eq!(region.bottom_right(), Point::new(4.0, 3.0));

        let padded = region.padded(0.5);
        assert_eq!(padded.origin(), Point::new(-1.5, 8.5));
        assert_eq!(padded.bottom_right(), Point::new(4.5, 2.5));

        assert!(Region::from_extents(std::iter::empty()).is_none());
    }

    #[test]
    fn test_is_beyond() {
        let region = square(10.0);

        assert!(!region.is_beyond(Point::new(5.0, 5.0), 0.0));
        assert!(!region.is_beyond(Point::new(12.0, 5.0), 2.5));
        assert!(region.is_beyond(Point::new(12.0, 5.0), 1.5));
        assert!(region.is_beyond(Point::new(5.0, -3.0), 2.0));
        // Corner: the true distance is ~2.83 but the box test only needs 2
        assert!(!region.is_beyond(Point::new(12.0, 12.0), 2.0));
    }

    #[test]
    fn test_search_order() {
        let region = square(10.0);

        assert_eq!(
            region.search_order(Point::new(1.0, 9.0)),
            [
                Quadrant::SouthEast,
                Quadrant::SouthWest,
                Quadrant::NorthEast,
                Quadrant::NorthWest,
            ]
        );
        assert_eq!(
            region.search_order(Point::new(8.0, 2.0)),
            [
                Quadrant::NorthWest,
                Quadrant::NorthEast,
                Quadrant::SouthWest,
                Quadrant::SouthEast,
            ]
        );
        // Outside the region still picks the nearest side
        assert_eq!(region.quadrant_towards(Point::new(-5.0, -5.0)), Quadrant::SouthWest);
    }

    #[test]
    #[should_panic(expected = "top-left corner")]
    fn test_new_rejects_inverted_corners() {
        Region::new(Point::new(10.0, 0.0), Point::new(0.0, 10.0));
    }
}
