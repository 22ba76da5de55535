//! Arm and leg sub-trees.
//!
//! Both are anchored at their joint (shoulder or hip) and hang down the
//! negative Y axis. They come back un-rotated and un-positioned; the body
//! builder places them.

use crate::error::Result;
use crate::palette;
use crate::primitives::{circle, cylinder, mesh, sphere, sphere_section};
use clown_ir::Node;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Shoulder puff radius.
pub const SHOULDER_RADIUS: f64 = 2.0;
/// Arm cylinder radius.
pub const ARM_RADIUS: f64 = 0.9;
/// Glove radius.
pub const HAND_RADIUS: f64 = 1.5;
/// How far the glove center sits above the arm's far end.
pub const HAND_OVERLAP: f64 = 0.75;
/// Leg cylinder radius.
pub const LEG_RADIUS: f64 = 0.8;
/// Shoe dome and sole radius.
pub const FOOT_RADIUS: f64 = 2.0;
/// Sole offset below the dome rim, to keep the two faces from z-fighting.
pub const SOLE_EPSILON: f64 = 0.001;

/// Build one arm of the given length, origin at the shoulder.
pub fn build_arm(length: f64) -> Result<Node> {
    Ok(Node::group("arm")
        .with_child(mesh("shoulder", sphere(SHOULDER_RADIUS)?, palette::BODY))
        .with_child(
            mesh(
                "upper",
                cylinder(ARM_RADIUS, ARM_RADIUS, length)?,
                palette::LIMB,
            )
            .at(0.0, -length / 2.0, 0.0),
        )
        .with_child(
            mesh("hand", sphere(HAND_RADIUS)?, palette::HAND).at(0.0, HAND_OVERLAP - length, 0.0),
        ))
}

/// Build one leg of the given length, origin at the hip.
///
/// The shoe is the upper half of a sphere resting on `y = -length`, closed
/// underneath by a disc facing down.
pub fn build_leg(length: f64) -> Result<Node> {
    let dome = sphere_section(FOOT_RADIUS, (0.0, TAU), (0.0, FRAC_PI_2))?;
    Ok(Node::group("leg")
        .with_child(
            mesh(
                "shin",
                cylinder(LEG_RADIUS, LEG_RADIUS, length)?,
                palette::LIMB,
            )
            .at(0.0, -length / 2.0, 0.0),
        )
        .with_child(mesh("foot", dome, palette::FOOT).at(0.0, -length, 0.0))
        .with_child(
            mesh("sole", circle(FOOT_RADIUS)?, palette::FOOT)
                .at(0.0, -length - SOLE_EPSILON, 0.0)
                .rotated(FRAC_PI_2, 0.0, 0.0),
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use clown_ir::Geometry;

    fn geometry<'a>(node: &'a Node, name: &str) -> &'a Geometry {
        &node.child(name).unwrap().mesh.as_ref().unwrap().geometry
    }

    #[test]
    fn arm_parts_line_up() {
        let arm = build_arm(10.0).unwrap();
        assert_eq!(arm.children.len(), 3);
        assert_eq!(arm.position, clown_ir::Vec3::ZERO);
        assert_eq!(arm.rotation, clown_ir::Vec3::ZERO);

        let upper = arm.child("upper").unwrap();
        assert_relative_eq!(upper.position.y, -5.0);
        match geometry(&arm, "upper") {
            Geometry::Cylinder {
                radius_top,
                radius_bottom,
                height,
                ..
            } => {
                assert_eq!((*radius_top, *radius_bottom, *height), (0.9, 0.9, 10.0));
            }
            other => panic!("expected cylinder, got {other:?}"),
        }
        // Cylinder top meets the shoulder.
        assert_relative_eq!(upper.position.y + 10.0 / 2.0, 0.0);

        let hand = arm.child("hand").unwrap();
        assert_relative_eq!(hand.position.y, -9.25);
        assert!(matches!(geometry(&arm, "hand"), Geometry::Sphere { radius, .. } if *radius == 1.5));
        assert!(matches!(geometry(&arm, "shoulder"), Geometry::Sphere { radius, .. } if *radius == 2.0));
    }

    #[test]
    fn leg_shoe_sits_at_far_end() {
        let leg = build_leg(10.0).unwrap();
        assert_relative_eq!(leg.child("shin").unwrap().position.y, -5.0);
        assert_relative_eq!(leg.child("foot").unwrap().position.y, -10.0);

        let sole = leg.child("sole").unwrap();
        assert_relative_eq!(sole.position.y, -10.001);
        assert_relative_eq!(sole.rotation.x, FRAC_PI_2);

        match geometry(&leg, "foot") {
            Geometry::Sphere {
                radius,
                phi_length,
                theta_start,
                theta_length,
                ..
            } => {
                assert_eq!(*radius, 2.0);
                assert_relative_eq!(*phi_length, TAU);
                assert_eq!(*theta_start, 0.0);
                assert_relative_eq!(*theta_length, FRAC_PI_2);
            }
            other => panic!("expected sphere, got {other:?}"),
        }
    }

    #[test]
    fn zero_length_collapses_without_error() {
        let arm = build_arm(0.0).unwrap();
        assert_relative_eq!(arm.child("hand").unwrap().position.y, 0.75);
        let leg = build_leg(0.0).unwrap();
        assert_relative_eq!(leg.child("foot").unwrap().position.y, 0.0);
    }

    #[test]
    fn negative_length_is_invalid_geometry() {
        assert!(build_arm(-1.0).is_err());
        assert!(build_leg(f64::NAN).is_err());
    }
}
