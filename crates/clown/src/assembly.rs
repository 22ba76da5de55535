//! Composes body and head into one clown sub-tree.

use crate::body::build_body;
use crate::error::{ClownError, Result};
use crate::head::build_head;
use crate::params::{BodyParams, ClownParams, LegsParams};
use clown_ir::Node;

/// Neck height above the ground: top of the stretched torso, sunk slightly
/// into it.
pub fn head_offset(body: &BodyParams, legs: &LegsParams) -> f64 {
    legs.length + 2.0 * body.radius * body.stretch_y - 1.5
}

/// Build a complete clown from a resolved parameter set.
///
/// Fails if any primitive is given an invalid size or any node ends up with
/// a non-finite transform. Nothing is returned partially built.
pub fn build_clown(params: &ClownParams) -> Result<Node> {
    let body = build_body(&params.body, &params.arms, &params.legs)?;

    let head = build_head(&params.head)?
        .at(0.0, head_offset(&params.body, &params.legs), 0.0)
        .rotated(params.head.rot_x, params.head.rot_y, params.head.rot_z);

    let clown = Node::group("clown").with_child(body).with_child(head);
    check_transforms(&clown)?;
    Ok(clown)
}

fn check_transforms(root: &Node) -> Result<()> {
    let mut bad = None;
    root.walk(&mut |node, _| {
        if bad.is_some() {
            return;
        }
        let component = if !node.position.is_finite() {
            "position"
        } else if !node.rotation.is_finite() {
            "rotation"
        } else if !node.scale.is_finite() {
            "scale"
        } else {
            return;
        };
        bad = Some(ClownError::InvalidTransform {
            node: node.name().to_string(),
            component,
        });
    });
    match bad {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{merge_update, PartialClownParams};
    use approx::assert_relative_eq;
    use clown_ir::Vec3;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn default_clown_has_body_and_head() {
        let clown = build_clown(&ClownParams::default()).unwrap();
        assert_eq!(clown.name(), "clown");
        assert_eq!(clown.children.len(), 2);
        assert!(clown.child("body").is_some());

        let head = clown.child("head").unwrap();
        // 10 + 2 * 6 * 1.25 - 1.5
        assert_relative_eq!(head.position.y, 23.5);
        assert_eq!(head.position.x, 0.0);
        assert_eq!(head.rotation, Vec3::ZERO);
    }

    #[test]
    fn body_is_attached_unmodified() {
        let params = ClownParams::default();
        let clown = build_clown(&params).unwrap();
        let body = build_body(&params.body, &params.arms, &params.legs).unwrap();
        assert_eq!(clown.child("body").unwrap(), &body);
    }

    #[test]
    fn head_rotation_does_not_move_head() {
        let base = build_clown(&ClownParams::default()).unwrap();
        let partial = PartialClownParams::empty().with("head.rotY", FRAC_PI_4).unwrap();
        let turned = build_clown(&merge_update(None, &partial)).unwrap();

        let before = base.child("head").unwrap();
        let after = turned.child("head").unwrap();
        assert_relative_eq!(after.rotation.y, FRAC_PI_4);
        assert_eq!(after.position, before.position);
        assert_eq!(after.scale, before.scale);
    }

    #[test]
    fn head_offset_tracks_body_and_legs() {
        let body = BodyParams {
            radius: 4.0,
            stretch_y: 2.0,
        };
        assert_relative_eq!(head_offset(&body, &LegsParams { length: 3.0 }), 17.5);
    }

    #[test]
    fn non_finite_rotation_is_rejected() {
        let mut params = ClownParams::default();
        params.arms.right_arm.rot_y = f64::NAN;
        match build_clown(&params).unwrap_err() {
            ClownError::InvalidTransform { node, component } => {
                assert_eq!(node, "right_arm");
                assert_eq!(component, "rotation");
            }
            other => panic!("expected InvalidTransform, got {other:?}"),
        }
    }

    #[test]
    fn non_finite_head_scale_is_rejected() {
        let mut params = ClownParams::default();
        params.head.scale_z = f64::INFINITY;
        assert!(matches!(
            build_clown(&params),
            Err(ClownError::InvalidTransform { component: "scale", .. })
        ));
    }
}
