//! Head and hat sub-trees.

use crate::error::Result;
use crate::palette;
use crate::params::HeadParams;
use crate::primitives::{cylinder, mesh, sphere, torus};
use clown_ir::Node;
use std::f64::consts::PI;

/// Skull radius; the skull center sits this far above the neck.
pub const SKULL_RADIUS: f64 = 5.0;

/// Build the hat: a wide flat brim with a slightly tapered crown on top.
pub fn build_hat() -> Result<Node> {
    Ok(Node::group("hat")
        .with_child(mesh("brim", cylinder(8.0, 8.0, 0.5)?, palette::HAT_BRIM))
        .with_child(mesh("crown", cylinder(4.5, 5.0, 6.0)?, palette::HAT).at(0.0, 3.0, 0.0)))
}

/// Build the head with its origin at the neck.
///
/// The whole assembled head is scaled by `head.scale_*`, so every feature
/// offset scales with it. `head.rot_*` is applied by the assembler, not here.
pub fn build_head(head: &HeadParams) -> Result<Node> {
    let skull = mesh("skull", sphere(SKULL_RADIUS)?, palette::SKIN).at(0.0, SKULL_RADIUS, 0.0);

    let left_ear = mesh("left_ear", sphere(1.5)?, palette::EAR).at(5.0, 5.0, 0.0);
    let right_ear = mesh("right_ear", sphere(1.5)?, palette::EAR).at(-5.0, 5.0, 0.0);

    let left_eye = mesh("left_eye", sphere(0.5)?, palette::EYE).at(1.5, 5.0, 4.75);
    let right_eye = mesh("right_eye", sphere(0.5)?, palette::EYE).at(-1.5, 5.0, 4.75);

    let nose = mesh("nose", sphere(0.3)?, palette::NOSE).at(0.0, 4.25, 4.85);

    // 60° of torus turned down and to the side so it curves like a grin.
    let smile = mesh("smile", torus(2.5, 0.25, PI / 3.0)?, palette::MOUTH)
        .at(0.0, 5.25, 4.25)
        .rotated(0.0, 0.0, -PI / 1.65);

    let hat = build_hat()?
        .at(0.5, 7.5, -0.5)
        .rotated(-PI / 12.0, 0.0, -PI / 12.0);

    Ok(Node::group("head")
        .with_child(skull)
        .with_child(left_ear)
        .with_child(right_ear)
        .with_child(left_eye)
        .with_child(right_eye)
        .with_child(nose)
        .with_child(smile)
        .with_child(hat)
        .scaled(head.scale_x, head.scale_y, head.scale_z))
}
