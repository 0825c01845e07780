//! 2D playfield geometry shared by the world and systems.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle expressed in world units.
///
/// Containment is inclusive on all four edges so that points lying exactly on
/// a zone boundary count as inside it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    min: Vec2,
    max: Vec2,
}

impl WorldRect {
    /// Constructs a rectangle from its minimum and maximum corners.
    #[must_use]
    pub const fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Minimum corner of the rectangle.
    #[must_use]
    pub const fn min(&self) -> Vec2 {
        self.min
    }

    /// Maximum corner of the rectangle.
    #[must_use]
    pub const fn max(&self) -> Vec2 {
        self.max
    }

    /// Width of the rectangle in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the rectangle in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Clamps the point onto the rectangle, returning the nearest inside point.
    #[must_use]
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }
}

/// Unit vector pointing from `from` toward `to`.
///
/// Coincident points yield the zero vector instead of a NaN-laden division,
/// so callers can scale the result without guarding.
#[must_use]
pub fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::{direction_between, WorldRect};
    use glam::Vec2;

    #[test]
    fn containment_is_inclusive_on_all_edges() {
        let rect = WorldRect::from_min_max(Vec2::new(0.0, 10.0), Vec2::new(20.0, 30.0));

        assert!(rect.contains(Vec2::new(0.0, 10.0)));
        assert!(rect.contains(Vec2::new(20.0, 30.0)));
        assert!(rect.contains(Vec2::new(0.0, 30.0)));
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(!rect.contains(Vec2::new(20.1, 20.0)));
        assert!(!rect.contains(Vec2::new(10.0, 9.9)));
    }

    #[test]
    fn clamp_point_returns_nearest_inside_point() {
        let rect = WorldRect::from_min_max(Vec2::ZERO, Vec2::new(100.0, 50.0));

        assert_eq!(
            rect.clamp_point(Vec2::new(-5.0, 200.0)),
            Vec2::new(0.0, 50.0)
        );
        assert_eq!(
            rect.clamp_point(Vec2::new(40.0, 25.0)),
            Vec2::new(40.0, 25.0)
        );
    }

    #[test]
    fn direction_between_coincident_points_is_zero() {
        let point = Vec2::new(7.5, -3.0);
        assert_eq!(direction_between(point, point), Vec2::ZERO);
    }

    #[test]
    fn direction_between_produces_unit_vectors() {
        let direction = direction_between(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((direction.length() - 1.0).abs() < f32::EPSILON);
        assert!((direction.x - 0.6).abs() < 1e-6);
        assert!((direction.y - 0.8).abs() < 1e-6);
    }
}
