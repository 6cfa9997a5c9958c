//! Rays for picking

use super::BoundingBox;
use vista_core::Vec3;

/// A ray for raycasting
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    /// Ray origin
    pub origin: Vec3,
    /// Ray direction (normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get point along ray at distance t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an axis-aligned box
    ///
    /// Returns the entry distance (0 when the origin is inside).
    pub fn intersect_box(&self, bounds: &BoundingBox) -> Option<f32> {
        if bounds.is_empty() {
            return None;
        }

        let origin = [self.origin.x, self.origin.y, self.origin.z];
        let dir = [self.direction.x, self.direction.y, self.direction.z];
        let min = [bounds.min.x, bounds.min.y, bounds.min.z];
        let max = [bounds.max.x, bounds.max.y, bounds.max.z];

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            if dir[axis].abs() < 1e-8 {
                if origin[axis] < min[axis] || origin[axis] > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[axis];
            let mut t1 = (min[axis] - origin[axis]) * inv;
            let mut t2 = (max[axis] - origin[axis]) * inv;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        Some(t_min.max(0.0))
    }

    /// Möller–Trumbore ray/triangle test, double sided
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
        const EPSILON: f32 = 1e-7;

        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > EPSILON).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_hit_and_miss() {
        let bounds = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let hit = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!((hit.intersect_box(&bounds).unwrap() - 1.5).abs() < 1e-6);

        let miss = Ray::new(Vec3::new(2.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(miss.intersect_box(&bounds).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(behind.intersect_box(&bounds).is_none());
    }

    #[test]
    fn test_triangle_hit_distance() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 1.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray
            .intersect_triangle(
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .unwrap();
        assert!((t - 1.0).abs() < 1e-6);
        assert!(ray.at(t).abs_diff_eq(Vec3::new(0.25, 0.25, 0.0), 1e-6));
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let ray = Ray::new(Vec3::new(0.9, 0.9, 1.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray
            .intersect_triangle(
                Vec3::ZERO,
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            )
            .is_none());
    }
}
