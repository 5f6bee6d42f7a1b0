//! Narrow-phase collision detection: separating-axis test for oriented boxes.

use glam::Vec3;

use super::contact::Contact;
use super::obb::WorldObb;

/// Axes shorter than this are treated as degenerate and skipped.
const AXIS_EPSILON: f32 = 1e-6;

/// Exact pairwise intersection test.
pub trait NarrowPhase {
    /// Test two boxes. `None` means a separating axis exists.
    fn test(&self, a: &WorldObb, b: &WorldObb) -> Option<Contact>;

    /// Strategy name, for logs and benches.
    fn name(&self) -> &'static str;
}

/// Separating Axis Theorem over the boxes' face normals.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeparatingAxis;

impl NarrowPhase for SeparatingAxis {
    fn test(&self, a: &WorldObb, b: &WorldObb) -> Option<Contact> {
        sat_test(a, b)
    }

    fn name(&self) -> &'static str {
        "sat"
    }
}

/// SAT test between two oriented boxes.
///
/// Candidate axes are the six world-space face-normal directions, three per
/// box (duplicates are harmless and not deduplicated). Each box's eight
/// vertices are projected onto every axis; a non-overlapping axis proves the
/// boxes disjoint. Otherwise the axis with the smallest overlap is the
/// contact normal and its overlap length the penetration depth. The normal is
/// oriented to point from B's mean center toward A's.
///
/// Pure function of the current snapshots; degenerate (zero-length) axes are
/// skipped so they cannot propagate NaN.
pub fn sat_test(a: &WorldObb, b: &WorldObb) -> Option<Contact> {
    let mut depth = f32::MAX;
    let mut best = Vec3::ZERO;

    for &axis in a.axes.iter().chain(b.axes.iter()) {
        if axis.length_squared() < AXIS_EPSILON {
            continue;
        }
        let pa = a.project(axis);
        let pb = b.project(axis);
        if !pa.overlaps(&pb) {
            // Separating axis: no collision.
            return None;
        }
        let overlap = pa.overlap_len(&pb);
        if overlap < depth {
            depth = overlap;
            best = axis;
        }
    }

    if best == Vec3::ZERO {
        // Every candidate axis was degenerate.
        return None;
    }

    let normal = if (a.mean_center() - b.mean_center()).dot(best) < 0.0 {
        -best
    } else {
        best
    };

    Some(Contact { normal, depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::obb::Obb;
    use glam::{Mat4, Quat};

    fn world_box(center: Vec3, extents: Vec3) -> WorldObb {
        let obb = Obb::new(extents).unwrap();
        WorldObb::new(&obb, Mat4::from_translation(center))
    }

    #[test]
    fn test_separated_boxes_do_not_collide() {
        let a = world_box(Vec3::ZERO, Vec3::ONE);
        let b = world_box(Vec3::new(0.0, 5.0, 0.0), Vec3::ONE);
        assert!(sat_test(&a, &b).is_none());
    }

    #[test]
    fn test_exact_contact_depth() {
        // Unit cubes at the origin and at (0.75, 0, 0): quarter overlap on X.
        let a = world_box(Vec3::ZERO, Vec3::ONE);
        let b = world_box(Vec3::new(0.75, 0.0, 0.0), Vec3::ONE);

        let contact = sat_test(&a, &b).unwrap();
        let eps = 1e-5;
        assert!((contact.normal - Vec3::new(-1.0, 0.0, 0.0)).length() < eps);
        assert!((contact.depth - 0.25).abs() < eps);
    }

    #[test]
    fn test_detection_symmetric_normal_antisymmetric() {
        let rotation = Quat::from_rotation_y(0.3);
        let obb = Obb::new(Vec3::new(1.0, 2.0, 1.0)).unwrap();
        let a = WorldObb::new(&obb, Mat4::from_quat(rotation));
        let b = world_box(Vec3::new(0.8, 0.4, 0.1), Vec3::ONE);

        let ab = sat_test(&a, &b);
        let ba = sat_test(&b, &a);
        assert_eq!(ab.is_some(), ba.is_some());

        let (ab, ba) = (ab.unwrap(), ba.unwrap());
        let eps = 1e-5;
        assert!((ab.normal + ba.normal).length() < eps);
        assert!((ab.depth - ba.depth).abs() < eps);
    }

    #[test]
    fn test_touching_faces_report_zero_depth() {
        let a = world_box(Vec3::ZERO, Vec3::ONE);
        let b = world_box(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);

        let contact = sat_test(&a, &b).unwrap();
        assert!(contact.depth.abs() < 1e-6);
    }

    #[test]
    fn test_rotated_boxes_separated_by_diagonal() {
        // Two unit boxes rotated 45 degrees about Y, centers 1.5 apart on X:
        // their X projections have half-width 1/sqrt(2) each, so they overlap
        // on the world axes but a face normal of either box separates them.
        let obb = Obb::new(Vec3::ONE).unwrap();
        let rot = Quat::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let a = WorldObb::new(&obb, Mat4::from_quat(rot));
        let b = WorldObb::new(
            &obb,
            Mat4::from_rotation_translation(rot, Vec3::new(1.5, 0.0, 0.0)),
        );
        assert!(sat_test(&a, &b).is_none());
    }

    #[test]
    fn test_degenerate_box_is_handled() {
        // A plane-thin box overlapping a cube still yields a finite contact.
        let plane = world_box(Vec3::new(0.0, 0.25, 0.0), Vec3::new(2.0, 0.0, 2.0));
        let cube = world_box(Vec3::ZERO, Vec3::ONE);

        let contact = sat_test(&plane, &cube).unwrap();
        assert!(contact.depth.is_finite());
        assert!(contact.normal.is_finite());
    }

    #[test]
    fn test_fully_degenerate_boxes_report_nothing() {
        let obb = Obb::new(Vec3::ONE).unwrap();
        let squashed = Mat4::from_scale(Vec3::ZERO);
        let a = WorldObb::new(&obb, squashed);
        let b = WorldObb::new(&obb, squashed);
        assert!(sat_test(&a, &b).is_none());
    }
}
