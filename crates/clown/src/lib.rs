#![warn(missing_docs)]

//! clown: a parametric clown figure built from primitive meshes
//!
//! The figure is a scene-graph of spheres, cylinders, a torus and a disc,
//! laid out from a small set of proportions (arm and leg length, torso
//! radius and stretch, head scale and turn). Change any subset of them with
//! [`Figure::redraw`] and the whole clown is rebuilt in place, joints and
//! all.
//!
//! # Example
//!
//! ```rust,no_run
//! use clown::{Figure, PartialClownParams, ClownConfig};
//!
//! let mut figure = Figure::new(&PartialClownParams::empty()).unwrap();
//! figure
//!     .redraw(&PartialClownParams::empty().with("legs.length", 15.0).unwrap())
//!     .unwrap();
//!
//! let config = ClownConfig::default();
//! clown::export::stl::export_stl(&figure.to_mesh(&config.detail), "clown.stl").unwrap();
//! ```

pub mod assembly;
pub mod body;
pub mod config;
pub mod error;
pub mod export;
pub mod figure;
pub mod head;
pub mod limbs;
pub mod palette;
pub mod params;
pub mod primitives;

pub use assembly::{build_clown, head_offset};
pub use body::build_body;
pub use config::{ClownConfig, ConfigError, Detail, MaterialSpec};
pub use error::{ClownError, Result};
pub use figure::{Figure, FigureState};
pub use head::{build_hat, build_head};
pub use limbs::{build_arm, build_leg};
pub use params::{
    merge_update, ArmParams, ArmsParams, BodyParams, ClownParams, HeadParams, LegsParams,
    PartialArmParams, PartialArmsParams, PartialBodyParams, PartialClownParams,
    PartialHeadParams, PartialLegsParams, PARAMETER_PATHS,
};

pub use clown_ir::{Document, Node, Vec3};
pub use clown_tessellate::TriangleMesh;
