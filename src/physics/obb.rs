//! Oriented boxes and interval projections.

use glam::{Mat4, Vec3};

use super::PhysicsError;

/// An interval [min, max] obtained by projecting a shape onto an axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Project a set of points onto an axis.
    pub fn of_points(axis: Vec3, points: &[Vec3]) -> Self {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for p in points {
            let d = p.dot(axis);
            if d < min {
                min = d;
            }
            if d > max {
                max = d;
            }
        }
        Self { min, max }
    }

    /// Two projections overlap iff neither is strictly disjoint from the other.
    #[inline]
    pub fn overlaps(&self, other: &Projection) -> bool {
        !(self.max < other.min || other.max < self.min)
    }

    /// Length of the overlapping region. Zero when disjoint.
    #[inline]
    pub fn overlap_len(&self, other: &Projection) -> f32 {
        (self.max.min(other.max) - self.min.max(other.min)).max(0.0)
    }
}

/// An oriented box in the local space of its owning transform.
///
/// `extents` are full widths; the corners sit at `offset ± extents / 2` along
/// each local axis. A zero extent on an axis degenerates the box to a plane or
/// line, which the projection math tolerates.
#[derive(Debug, Clone, Copy)]
pub struct Obb {
    offset: Vec3,
    extents: Vec3,
}

impl Obb {
    /// Create a box with the given full extents, centered on the transform
    /// origin.
    pub fn new(extents: Vec3) -> Result<Self, PhysicsError> {
        Self::with_offset(Vec3::ZERO, extents)
    }

    /// Create a box offset from the transform origin in local space.
    pub fn with_offset(offset: Vec3, extents: Vec3) -> Result<Self, PhysicsError> {
        if extents.min_element() < 0.0 || !extents.is_finite() {
            return Err(PhysicsError::InvalidExtents(extents));
        }
        Ok(Self { offset, extents })
    }

    pub fn offset(&self) -> Vec3 {
        self.offset
    }

    pub fn extents(&self) -> Vec3 {
        self.extents
    }
}

/// World-space snapshot of an [`Obb`] under its owning transform, rebuilt
/// every tick from the current transform state.
#[derive(Debug, Clone, Copy)]
pub struct WorldObb {
    /// The eight corners in world space.
    pub vertices: [Vec3; 8],
    /// The box's face-normal directions (normalized world matrix columns).
    /// A column collapsed by zero scale yields `Vec3::ZERO`; the narrow phase
    /// skips such axes.
    pub axes: [Vec3; 3],
}

impl WorldObb {
    pub fn new(obb: &Obb, world: Mat4) -> Self {
        let h = obb.extents() * 0.5;
        let offset = obb.offset();

        let mut vertices = [Vec3::ZERO; 8];
        for (i, v) in vertices.iter_mut().enumerate() {
            let corner = Vec3::new(
                if i & 1 == 0 { -h.x } else { h.x },
                if i & 2 == 0 { -h.y } else { h.y },
                if i & 4 == 0 { -h.z } else { h.z },
            );
            *v = world.transform_point3(offset + corner);
        }

        let axes = [
            world.x_axis.truncate().normalize_or_zero(),
            world.y_axis.truncate().normalize_or_zero(),
            world.z_axis.truncate().normalize_or_zero(),
        ];

        Self { vertices, axes }
    }

    /// Arithmetic mean of the eight vertices.
    pub fn mean_center(&self) -> Vec3 {
        self.vertices.iter().copied().sum::<Vec3>() / 8.0
    }

    /// Project the box onto an axis.
    #[inline]
    pub fn project(&self, axis: Vec3) -> Projection {
        Projection::of_points(axis, &self.vertices)
    }

    /// Farthest vertex in the given direction (support point).
    pub fn support(&self, direction: Vec3) -> Vec3 {
        let mut best = self.vertices[0];
        let mut best_dot = best.dot(direction);
        for v in &self.vertices[1..] {
            let d = v.dot(direction);
            if d > best_dot {
                best_dot = d;
                best = *v;
            }
        }
        best
    }

    /// Componentwise vertex minimum and maximum (world-axis intervals).
    pub fn aabb(&self) -> (Vec3, Vec3) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];
        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }
        (min, max)
    }
}
