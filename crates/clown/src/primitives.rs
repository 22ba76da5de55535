//! Validated primitive constructors.
//!
//! These are the only place geometry parameters are checked. Zero is a
//! legal (degenerate) size; negative and non-finite sizes are rejected with
//! [`ClownError::InvalidGeometry`]. Segment counts are left at 0 so the
//! tessellator's configured detail applies.

use crate::error::{ClownError, Result};
use clown_ir::{Geometry, MeshDef, Node};
use std::f64::consts::{PI, TAU};

fn size(primitive: &'static str, parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ClownError::InvalidGeometry {
            primitive,
            parameter,
            value,
        })
    }
}

fn angle(primitive: &'static str, parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ClownError::InvalidGeometry {
            primitive,
            parameter,
            value,
        })
    }
}

/// Full sphere.
pub fn sphere(radius: f64) -> Result<Geometry> {
    sphere_section(radius, (0.0, TAU), (0.0, PI))
}

/// Section of a sphere given as `(start, length)` azimuth and polar sweeps.
pub fn sphere_section(radius: f64, phi: (f64, f64), theta: (f64, f64)) -> Result<Geometry> {
    Ok(Geometry::Sphere {
        radius: size("sphere", "radius", radius)?,
        width_segments: 0,
        height_segments: 0,
        phi_start: angle("sphere", "phi_start", phi.0)?,
        phi_length: angle("sphere", "phi_length", phi.1)?,
        theta_start: angle("sphere", "theta_start", theta.0)?,
        theta_length: angle("sphere", "theta_length", theta.1)?,
    })
}

/// Tapered cylinder along Y, centered at the origin.
pub fn cylinder(radius_top: f64, radius_bottom: f64, height: f64) -> Result<Geometry> {
    Ok(Geometry::Cylinder {
        radius_top: size("cylinder", "radius_top", radius_top)?,
        radius_bottom: size("cylinder", "radius_bottom", radius_bottom)?,
        height: size("cylinder", "height", height)?,
        radial_segments: 0,
    })
}

/// Torus arc in the XY plane.
pub fn torus(radius: f64, tube: f64, arc: f64) -> Result<Geometry> {
    Ok(Geometry::Torus {
        radius: size("torus", "radius", radius)?,
        tube: size("torus", "tube", tube)?,
        radial_segments: 0,
        tubular_segments: 0,
        arc: angle("torus", "arc", arc)?,
    })
}

/// Flat disc facing +Z.
pub fn circle(radius: f64) -> Result<Geometry> {
    Ok(Geometry::Circle {
        radius: size("circle", "radius", radius)?,
        segments: 0,
    })
}

/// A mesh node painted with the given palette key.
pub fn mesh(name: &str, geometry: Geometry, material: &str) -> Node {
    Node::with_mesh(
        name,
        MeshDef {
            geometry,
            material: material.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_allowed() {
        assert!(sphere(0.0).is_ok());
        assert!(cylinder(0.8, 0.8, 0.0).is_ok());
        assert!(circle(0.0).is_ok());
    }

    #[test]
    fn negative_radius_is_rejected() {
        let err = sphere(-6.0).unwrap_err();
        match err {
            ClownError::InvalidGeometry {
                primitive,
                parameter,
                value,
            } => {
                assert_eq!(primitive, "sphere");
                assert_eq!(parameter, "radius");
                assert_eq!(value, -6.0);
            }
            other => panic!("expected InvalidGeometry, got {other:?}"),
        }
        assert!(err_message(cylinder(1.0, 1.0, -2.0)).contains("invalid geometry parameter"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(torus(2.5, f64::NAN, 1.0).is_err());
        assert!(torus(2.5, 0.25, f64::INFINITY).is_err());
        assert!(sphere_section(1.0, (0.0, TAU), (f64::NAN, PI)).is_err());
        assert!(circle(f64::INFINITY).is_err());
    }

    #[test]
    fn mesh_node_carries_material() {
        let node = mesh("nose", sphere(0.3).unwrap(), "nose");
        assert_eq!(node.name(), "nose");
        assert_eq!(node.mesh.as_ref().unwrap().material, "nose");
        assert_eq!(node.mesh.as_ref().unwrap().geometry.kind(), "sphere");
    }

    fn err_message(result: Result<Geometry>) -> String {
        result.unwrap_err().to_string()
    }
}
