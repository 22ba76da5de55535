//! Scene-graph representation for the clown figure.
//!
//! This crate defines the transform-node tree that the figure builders
//! produce: nested nodes carrying position, rotation and scale, some of
//! which hold a mesh (a primitive geometry paired with a material key).
//!
//! The IR is purely declarative: no vertex data, just parameters.
//! Tessellation is handled separately by `clown-tessellate`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 3D vector with f64 components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// All ones (identity scale).
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Create a new Vec3.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as `[x, y, z]`.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Whether every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn one() -> Self {
        Self::ONE
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Primitive geometry description.
///
/// Angles are radians. Segment counts of 0 mean "use the tessellator default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// Sphere (or a band/cap of one) centered at origin.
    ///
    /// `phi` sweeps around the Y axis, `theta` runs from the +Y pole (0)
    /// to the -Y pole (π).
    Sphere {
        /// Sphere radius.
        radius: f64,
        /// Segments around the Y axis.
        width_segments: u32,
        /// Segments from pole to pole.
        height_segments: u32,
        /// Start of the azimuth sweep.
        phi_start: f64,
        /// Length of the azimuth sweep (2π for a full sphere).
        phi_length: f64,
        /// Start of the polar sweep (0 at the top pole).
        theta_start: f64,
        /// Length of the polar sweep (π for a full sphere).
        theta_length: f64,
    },
    /// Tapered cylinder along the Y axis, centered at origin.
    Cylinder {
        /// Radius at `y = +height/2`.
        radius_top: f64,
        /// Radius at `y = -height/2`.
        radius_bottom: f64,
        /// Height along Y.
        height: f64,
        /// Segments around the axis.
        radial_segments: u32,
    },
    /// Torus (or an arc of one) in the XY plane, centered at origin.
    Torus {
        /// Distance from the center to the middle of the tube.
        radius: f64,
        /// Tube radius.
        tube: f64,
        /// Segments around the tube cross-section.
        radial_segments: u32,
        /// Segments along the sweep.
        tubular_segments: u32,
        /// Sweep angle, starting at +X and turning towards +Y.
        arc: f64,
    },
    /// Flat disc in the XY plane facing +Z.
    Circle {
        /// Disc radius.
        radius: f64,
        /// Segments around the rim.
        segments: u32,
    },
}

impl Geometry {
    /// Short name of the primitive kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Geometry::Sphere { .. } => "sphere",
            Geometry::Cylinder { .. } => "cylinder",
            Geometry::Torus { .. } => "torus",
            Geometry::Circle { .. } => "circle",
        }
    }
}

/// A renderable mesh: geometry plus a material key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDef {
    /// Primitive geometry.
    pub geometry: Geometry,
    /// Key referencing a [`MaterialDef::name`].
    pub material: String,
}

/// Flat-shaded color material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    /// Material name (e.g. "skin", "hat").
    pub name: String,
    /// Base color as `[r, g, b]` in 0.0..1.0.
    pub color: [f64; 3],
    /// Render with per-face normals.
    pub flat_shading: bool,
}

/// A transform node in the scene graph.
///
/// The local transform is `T * R * S` with the rotation given as XYZ Euler
/// angles in radians. Children inherit the full parent transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Optional human-readable name.
    pub name: Option<String>,
    /// Translation relative to the parent.
    #[serde(default)]
    pub position: Vec3,
    /// XYZ Euler rotation in radians.
    #[serde(default)]
    pub rotation: Vec3,
    /// Per-axis scale factors.
    #[serde(default = "Vec3::one")]
    pub scale: Vec3,
    /// Mesh drawn at this node, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<MeshDef>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            name: None,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            mesh: None,
            children: Vec::new(),
        }
    }
}

impl Node {
    /// An empty group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// A node holding a mesh.
    pub fn with_mesh(name: impl Into<String>, mesh: MeshDef) -> Self {
        Self {
            name: Some(name.into()),
            mesh: Some(mesh),
            ..Self::default()
        }
    }

    /// Set the position.
    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    /// Set the rotation (radians).
    pub fn rotated(mut self, x: f64, y: f64, z: f64) -> Self {
        self.rotation = Vec3::new(x, y, z);
        self
    }

    /// Set the scale.
    pub fn scaled(mut self, x: f64, y: f64, z: f64) -> Self {
        self.scale = Vec3::new(x, y, z);
        self
    }

    /// Append a child.
    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Append a child, builder style.
    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// Name, or `""` for anonymous nodes.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Direct child with the given name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// First node with the given name, depth-first (including `self`).
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name() == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Follow a `/`-separated path of child names, e.g. `"body/left_arm/hand"`.
    pub fn at_path(&self, path: &str) -> Option<&Node> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, name| node.child(name))
    }

    /// Number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.descendant_count())
            .sum()
    }

    /// Number of meshes in this subtree (including `self`).
    pub fn mesh_count(&self) -> usize {
        usize::from(self.mesh.is_some())
            + self.children.iter().map(Node::mesh_count).sum::<usize>()
    }

    /// Visit every node depth-first with its depth (0 for `self`).
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Node, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }
}

/// A scene document: node tree plus the materials it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// Material definitions, keyed by name.
    pub materials: HashMap<String, MaterialDef>,
    /// Root of the node tree.
    pub root: Node,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            materials: HashMap::new(),
            root: Node::default(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Material keys referenced by meshes but missing from `materials`.
    pub fn missing_materials(&self) -> Vec<String> {
        let mut missing = Vec::new();
        self.root.walk(&mut |node, _| {
            if let Some(mesh) = &node.mesh {
                if !self.materials.contains_key(&mesh.material) && !missing.contains(&mesh.material)
                {
                    missing.push(mesh.material.clone());
                }
            }
        });
        missing
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(name: &str, radius: f64) -> Node {
        Node::with_mesh(
            name,
            MeshDef {
                geometry: Geometry::Sphere {
                    radius,
                    width_segments: 0,
                    height_segments: 0,
                    phi_start: 0.0,
                    phi_length: std::f64::consts::TAU,
                    theta_start: 0.0,
                    theta_length: std::f64::consts::PI,
                },
                material: "skin".to_string(),
            },
        )
    }

    #[test]
    fn roundtrip_document() {
        let mut doc = Document::new();
        doc.root = Node::group("figure")
            .with_child(ball("head", 5.0).at(0.0, 5.0, 0.0))
            .with_child(Node::group("arm").rotated(0.0, 0.0, 0.5));
        doc.materials.insert(
            "skin".to_string(),
            MaterialDef {
                name: "skin".to_string(),
                color: [1.0, 0.9, 0.8],
                flat_shading: true,
            },
        );

        let json = doc.to_json().expect("serialize");
        let restored = Document::from_json(&json).expect("deserialize");

        assert_eq!(doc, restored);
        assert_eq!(restored.root.descendant_count(), 2);
        assert!(restored.missing_materials().is_empty());
    }

    #[test]
    fn scale_defaults_to_one_when_omitted() {
        let node: Node = serde_json::from_str(r#"{ "name": "bare" }"#).unwrap();
        assert_eq!(node.scale, Vec3::ONE);
        assert_eq!(node.position, Vec3::ZERO);
        assert!(node.children.is_empty());
    }

    #[test]
    fn serde_tagged_geometry() {
        let geometry = Geometry::Circle {
            radius: 2.0,
            segments: 32,
        };
        let json = serde_json::to_string(&geometry).unwrap();
        assert!(json.contains(r#""type":"Circle""#));

        let restored: Geometry = serde_json::from_str(&json).unwrap();
        assert_eq!(geometry, restored);
        assert_eq!(restored.kind(), "circle");
    }

    #[test]
    fn lookup_by_name_and_path() {
        let root = Node::group("root").with_child(
            Node::group("body")
                .with_child(Node::group("left_arm").with_child(ball("hand", 1.5)))
                .with_child(Node::group("right_arm").with_child(ball("hand", 1.5))),
        );

        assert!(root.find("right_arm").is_some());
        assert!(root.find("missing").is_none());
        let hand = root.at_path("body/right_arm/hand").expect("path");
        assert_eq!(hand.name(), "hand");
        assert!(root.at_path("body/hand").is_none());
        assert_eq!(root.mesh_count(), 2);
        assert_eq!(root.descendant_count(), 5);
    }

    #[test]
    fn walk_reports_depth() {
        let root = Node::group("a").with_child(Node::group("b").with_child(Node::group("c")));
        let mut seen = Vec::new();
        root.walk(&mut |node, depth| seen.push((node.name().to_string(), depth)));
        assert_eq!(
            seen,
            vec![
                ("a".to_string(), 0),
                ("b".to_string(), 1),
                ("c".to_string(), 2)
            ]
        );
    }

    #[test]
    fn missing_material_is_reported_once() {
        let mut doc = Document::new();
        doc.root = Node::group("root")
            .with_child(ball("a", 1.0))
            .with_child(ball("b", 1.0));
        assert_eq!(doc.missing_materials(), vec!["skin".to_string()]);
    }
}
