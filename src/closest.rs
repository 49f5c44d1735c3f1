//! Closest pair of points in the plane, O(n log n) divide and conquer.
//!
//! Points are sorted by x once. Each level splits its x-sorted range at the middle, solves both
//! halves and then only has to look for a closer pair straddling the dividing line. Such a pair
//! lies in the strip of points closer than `d` (the best half distance) to the line. Sorted by y,
//! any point of the strip can only beat `d` with one of its next seven strip neighbours: a
//! `d x 2d` box holds at most eight points that are pairwise at least `d` apart on each side.
use crate::error::{Error, Result};

/// Ranges this small are solved by comparing every pair.
const BRUTE_FORCE_MAX: usize = 3;

/// Strip neighbours (in y order) compared against each strip point.
const STRIP_WINDOW: usize = 7;

/// A point in the plane. Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`. Finite for any finite difference, however large.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Two points and the distance between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPair {
    pub first: Point,
    pub second: Point,
    pub distance: f64,
}

impl ClosestPair {
    fn between(first: Point, second: Point) -> Self {
        Self {
            first,
            second,
            distance: first.distance(&second),
        }
    }

    /// Keeps `self` on ties.
    fn closer(self, other: Self) -> Self {
        if other.distance < self.distance {
            other
        } else {
            self
        }
    }
}

/// All-pairs search. `points` must hold at least two points.
fn brute_force_pair(points: &[Point]) -> ClosestPair {
    let mut best = ClosestPair::between(points[0], points[1]);
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            best = best.closer(ClosestPair::between(*a, *b));
        }
    }
    best
}

/// Compares every pair of `points` in O(n²). Returns `None` for fewer than two points.
pub fn brute_force(points: &[Point]) -> Option<ClosestPair> {
    (points.len() >= 2).then(|| brute_force_pair(points))
}

/// Looks for a pair in the y-sorted `strip` closer than `best`.
fn strip_closest(strip: &[Point], mut best: ClosestPair) -> ClosestPair {
    for (i, a) in strip.iter().enumerate() {
        for b in strip.iter().skip(i + 1).take(STRIP_WINDOW) {
            best = best.closer(ClosestPair::between(*a, *b));
        }
    }
    best
}

/// Closest pair of `px`, which is sorted by x and holds at least two points.
fn closest_in(px: &[Point]) -> ClosestPair {
    if px.len() <= BRUTE_FORCE_MAX {
        return brute_force_pair(px);
    }

    let mid = px.len() / 2;
    let mid_x = px[mid].x;
    let (left, right) = px.split_at(mid);
    let best = closest_in(left).closer(closest_in(right));

    // Only this level's range; the strip never looks outside `px`.
    let mut strip: Vec<Point> = px
        .iter()
        .copied()
        .filter(|p| (p.x - mid_x).abs() < best.distance)
        .collect();
    strip.sort_unstable_by(|a, b| a.y.total_cmp(&b.y));

    strip_closest(&strip, best)
}

/// Finds the two closest points of `points`.
///
/// Fails with [`Error::InvalidArgument`] for fewer than two points or a non-finite coordinate.
pub fn closest_pair(points: &[Point]) -> Result<ClosestPair> {
    if points.len() < 2 {
        return Err(Error::invalid_argument(format!(
            "closest pair needs at least 2 points, got {}",
            points.len()
        )));
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(Error::invalid_argument(format!(
            "point ({}, {}) has a non-finite coordinate",
            p.x, p.y
        )));
    }

    let mut px = points.to_vec();
    px.sort_unstable_by(|a, b| a.x.total_cmp(&b.x));
    Ok(closest_in(&px))
}

/// Minimum Euclidean distance between any two of `points`.
pub fn closest_pair_distance(points: &[Point]) -> Result<f64> {
    closest_pair(points).map(|pair| pair.distance)
}
