//! 2D vector, segment and ray primitives, plus the exact intersection and
//! reflection routines every higher component is built from.
//!
//! Every function here is epsilon-free except where `Config` explicitly
//! names a tolerance; callers, not this module, decide what "close enough"
//! means.

use crate::sqrt;
use core::ops::{Add, Mul, Neg, Sub};

pub type Float = f64;

/// A segment shorter than this is treated as absent by every routine below.
pub const DEGENERATE_LENGTH: Float = 1e-6;

/// A point, or a free vector, in the plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    pub x: Float,
    pub y: Float,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vector) -> Float {
        self.x * other.x + self.y * other.y
    }

    /// The z-component of the 3D cross product of `self` and `other`.
    #[inline]
    pub fn cross(self, other: Vector) -> Float {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(self) -> Float {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> Float {
        sqrt(self.length_squared())
    }

    #[inline]
    pub fn scale(self, k: Float) -> Vector {
        Vector::new(self.x * k, self.y * k)
    }

    /// Rotate 90 degrees counter-clockwise.
    #[inline]
    pub fn rotate90_ccw(self) -> Vector {
        Vector::new(-self.y, self.x)
    }

    #[inline]
    pub fn normalized(self) -> Option<Vector> {
        let len = self.length();
        (len > DEGENERATE_LENGTH).then(|| self.scale(1.0 / len))
    }
}

impl Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl Mul<Float> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, k: Float) -> Vector {
        self.scale(k)
    }
}

/// `cross(a - o, b - o)`. Positive when `o -> a -> b` turns counter-clockwise.
#[inline]
pub fn cross3(o: Vector, a: Vector, b: Vector) -> Float {
    (a - o).cross(b - o)
}

/// An ordered pair of points. Direction runs from `start` to `end`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vector,
    pub end: Vector,
}

impl Segment {
    #[inline]
    pub const fn new(start: Vector, end: Vector) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction().length_squared() < DEGENERATE_LENGTH * DEGENERATE_LENGTH
    }

    #[inline]
    pub fn point_at(&self, s: Float) -> Vector {
        self.start + self.direction().scale(s)
    }

    #[inline]
    pub fn midpoint(&self) -> Vector {
        self.point_at(0.5)
    }
}

/// A half-line: `origin + t * direction`, `t >= 0`. `direction` is unit length.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector,
    pub direction: Vector,
}

impl Ray {
    /// Returns `None` if `direction` is too short to normalize.
    pub fn new(origin: Vector, direction: Vector) -> Option<Ray> {
        direction.normalized().map(|direction| Ray { origin, direction })
    }

    #[inline]
    pub fn at(&self, t: Float) -> Vector {
        self.origin + self.direction.scale(t)
    }
}

/// Axis-aligned screen bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vector,
    pub max: Vector,
}

impl Rect {
    pub const fn new(min: Vector, max: Vector) -> Self {
        Self { min, max }
    }

    pub fn corners(&self) -> [Vector; 4] {
        [
            self.min,
            Vector::new(self.max.x, self.min.y),
            self.max,
            Vector::new(self.min.x, self.max.y),
        ]
    }

    pub fn edges(&self) -> [Segment; 4] {
        let c = self.corners();
        [
            Segment::new(c[0], c[1]),
            Segment::new(c[1], c[2]),
            Segment::new(c[2], c[3]),
            Segment::new(c[3], c[0]),
        ]
    }

    pub fn contains(&self, p: Vector) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    pub fn diagonal_length(&self) -> Float {
        (self.max - self.min).length()
    }
}

/// The result of a ray/segment intersection: `t` along the ray, `s` along
/// the segment (`s` in `[0, 1]`), and the point itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaySegmentHit {
    pub t: Float,
    pub s: Float,
    pub point: Vector,
}

/// First-principles ray/segment intersection. `min_t` excludes hits at or
/// before that ray parameter (the caller's self-hit epsilon, typically).
pub fn ray_segment_intersection(ray: &Ray, seg: &Segment, min_t: Float) -> Option<RaySegmentHit> {
    if seg.is_degenerate() {
        return None;
    }
    let d = seg.direction();
    let denom = ray.direction.cross(d);
    if denom.abs() < Float::EPSILON {
        return None; // parallel
    }
    let diff = seg.start - ray.origin;
    let t = diff.cross(d) / denom;
    let s = diff.cross(ray.direction) / denom;
    if t > min_t && (0.0..=1.0).contains(&s) {
        Some(RaySegmentHit { t, s, point: ray.at(t) })
    } else {
        None
    }
}

/// The result of a segment/segment intersection: `t` along `a`, `s` along
/// `b`, both in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentIntersection {
    pub t: Float,
    pub s: Float,
    pub point: Vector,
}

pub fn segment_segment_intersection(a: &Segment, b: &Segment) -> Option<SegmentIntersection> {
    if a.is_degenerate() || b.is_degenerate() {
        return None;
    }
    let da = a.direction();
    let db = b.direction();
    let denom = da.cross(db);
    if denom.abs() < Float::EPSILON {
        return None;
    }
    let diff = b.start - a.start;
    let t = diff.cross(db) / denom;
    let s = diff.cross(da) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&s) {
        Some(SegmentIntersection { t, s, point: a.point_at(t) })
    } else {
        None
    }
}

/// Intersection of the two *infinite lines* carrying `a` and `b`, along with
/// the parameter along each (`t` for `a`, `s` for `b`), unconstrained to
/// `[0, 1]`. `None` if the lines are parallel or either is degenerate.
pub fn line_line_intersection_with_params(a: Segment, b: Segment) -> Option<(Vector, Float, Float)> {
    if a.is_degenerate() || b.is_degenerate() {
        return None;
    }
    let da = a.direction();
    let db = b.direction();
    let denom = da.cross(db);
    if denom.abs() < Float::EPSILON {
        return None;
    }
    let diff = b.start - a.start;
    let t = diff.cross(db) / denom;
    let s = diff.cross(da) / denom;
    Some((a.point_at(t), t, s))
}

pub fn line_line_intersection(a: Segment, b: Segment) -> Option<Vector> {
    line_line_intersection_with_params(a, b).map(|(p, _, _)| p)
}

/// Reflects `p` across the infinite line carrying `line`. A degenerate
/// `line` reflects nothing (returns `p` unchanged).
pub fn reflect_point(p: Vector, line: Segment) -> Vector {
    let d = line.direction();
    let len_sq = d.length_squared();
    if len_sq < DEGENERATE_LENGTH * DEGENERATE_LENGTH {
        return p;
    }
    let t = (p - line.start).dot(d) / len_sq;
    let proj = line.start + d.scale(t);
    proj.scale(2.0) - p
}

/// Reflects a direction vector off a surface with the given unit `normal`.
pub fn reflect_direction(dir: Vector, normal: Vector) -> Vector {
    dir - normal.scale(2.0 * dir.dot(normal))
}

/// Whether `p` lies strictly between `a` and `b` on the segment they carry,
/// within `tolerance` both along and across the line.
pub fn segment_strictly_contains(a: Vector, b: Vector, p: Vector, tolerance: Float) -> bool {
    let seg = Segment::new(a, b);
    let d = seg.direction();
    let len_sq = d.length_squared();
    if len_sq < DEGENERATE_LENGTH * DEGENERATE_LENGTH {
        return false;
    }
    let t = (p - a).dot(d) / len_sq;
    if t <= tolerance || t >= 1.0 - tolerance {
        return false;
    }
    let closest = a + d.scale(t);
    (p - closest).length() <= tolerance
}
