//! Torso with arms and legs attached at their joints.

use crate::error::Result;
use crate::limbs::{build_arm, build_leg};
use crate::palette;
use crate::params::{ArmParams, ArmsParams, BodyParams, LegsParams};
use crate::primitives::{mesh, sphere};
use clown_ir::Node;
use std::f64::consts::FRAC_PI_4;

/// Distance of each hip from the center line.
pub const HIP_OFFSET: f64 = 2.0;
/// How far the torso sinks into the hips.
pub const TORSO_SINK: f64 = 1.0;

/// Shoulder position on the positive-X side: the point on the stretched
/// torso ellipse at 45 degrees, lifted by the leg length.
pub fn shoulder_joint(body: &BodyParams, legs: &LegsParams) -> (f64, f64) {
    let body_offset = body.radius * body.stretch_y;
    let x = body.radius * FRAC_PI_4.cos();
    let y = body.radius * body.stretch_y * FRAC_PI_4.sin() + legs.length + body_offset;
    (x, y)
}

fn place_arm(name: &str, arm: Node, x: f64, y: f64, rot: &ArmParams) -> Node {
    let mut arm = arm.at(x, y, 0.0).rotated(rot.rot_x, rot.rot_y, rot.rot_z);
    arm.name = Some(name.to_string());
    arm
}

fn place_leg(name: &str, leg: Node, x: f64, y: f64) -> Node {
    let mut leg = leg.at(x, y, 0.0);
    leg.name = Some(name.to_string());
    leg
}

/// Build the torso, both arms and both legs.
///
/// The origin is the ground point between the feet.
pub fn build_body(body: &BodyParams, arms: &ArmsParams, legs: &LegsParams) -> Result<Node> {
    let body_offset = body.radius * body.stretch_y;
    let torso = mesh("torso", sphere(body.radius)?, palette::BODY)
        .at(0.0, legs.length + body_offset - TORSO_SINK, 0.0)
        .scaled(1.0, body.stretch_y, 1.0);

    let (x, y) = shoulder_joint(body, legs);
    let left_arm = place_arm("left_arm", build_arm(arms.length)?, x, y, &arms.left_arm);
    let right_arm = place_arm("right_arm", build_arm(arms.length)?, -x, y, &arms.right_arm);

    let left_leg = place_leg("left_leg", build_leg(legs.length)?, HIP_OFFSET, legs.length);
    let right_leg = place_leg("right_leg", build_leg(legs.length)?, -HIP_OFFSET, legs.length);

    Ok(Node::group("body")
        .with_child(torso)
        .with_child(left_arm)
        .with_child(right_arm)
        .with_child(left_leg)
        .with_child(right_leg))
}
