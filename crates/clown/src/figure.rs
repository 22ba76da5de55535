//! The clown figure: a parameter store plus the sub-tree built from it.

use crate::assembly::build_clown;
use crate::config::{ClownConfig, Detail};
use crate::error::Result;
use crate::params::{merge_update, ClownParams, PartialClownParams};
use clown_ir::{Document, Node, Vec3};
use clown_math::Transform;
use clown_tessellate::{
    local_transform, tessellate_merged, tessellate_scene, SceneMesh, TessellationParams,
    TriangleMesh,
};
use tracing::{debug, warn};

/// Whether a figure currently holds geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureState {
    /// No parameters applied yet; the figure node has no children.
    Unbuilt,
    /// Exactly one clown sub-tree, built from the current parameters.
    Built,
}

/// A parametric clown figure.
///
/// Owns a transform node named `"figure"` whose single child is the clown
/// built from the current parameters. Moving, rotating or scaling the figure
/// touches only that node and survives every [`Figure::redraw`].
#[derive(Debug, Clone)]
pub struct Figure {
    params: Option<ClownParams>,
    node: Node,
}

impl Figure {
    /// A figure with no geometry yet.
    pub fn unbuilt() -> Self {
        Self {
            params: None,
            node: Node::group("figure"),
        }
    }

    /// Build a figure from defaults overridden by `initial`.
    pub fn new(initial: &PartialClownParams) -> Result<Self> {
        let mut figure = Self::unbuilt();
        figure.redraw(initial)?;
        Ok(figure)
    }

    /// Merge `partial` into the current parameters and rebuild the clown.
    ///
    /// On failure the figure is left exactly as it was: same state, same
    /// sub-tree, same parameters.
    pub fn redraw(&mut self, partial: &PartialClownParams) -> Result<()> {
        let next = merge_update(self.params.as_ref(), partial);
        let clown = match build_clown(&next) {
            Ok(clown) => clown,
            Err(err) => {
                warn!(error = %err, "rejected figure update");
                return Err(err);
            }
        };

        self.node.children.clear();
        self.node.add(clown);
        self.params = Some(next);
        debug!(
            nodes = self.node.descendant_count(),
            meshes = self.node.mesh_count(),
            "rebuilt figure"
        );
        Ok(())
    }

    /// Current state.
    pub fn state(&self) -> FigureState {
        if self.params.is_some() {
            FigureState::Built
        } else {
            FigureState::Unbuilt
        }
    }

    /// Resolved parameters (defaults while unbuilt).
    pub fn params(&self) -> ClownParams {
        self.params.unwrap_or_default()
    }

    /// The figure node, with its clown sub-tree if built.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// The current clown sub-tree.
    pub fn clown(&self) -> Option<&Node> {
        self.node.children.first()
    }

    /// Figure position.
    pub fn position(&self) -> Vec3 {
        self.node.position
    }

    /// Move the whole figure.
    pub fn set_position(&mut self, position: Vec3) {
        self.node.position = position;
    }

    /// Figure rotation (XYZ Euler, radians).
    pub fn rotation(&self) -> Vec3 {
        self.node.rotation
    }

    /// Rotate the whole figure.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.node.rotation = rotation;
    }

    /// Figure scale.
    pub fn scale(&self) -> Vec3 {
        self.node.scale
    }

    /// Scale the whole figure.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.node.scale = scale;
    }

    /// Transform from the node at `path` (e.g. `"clown/body/left_arm/hand"`)
    /// into the figure's parent frame, including the figure's own transform.
    pub fn world_transform(&self, path: &str) -> Option<Transform> {
        let mut node = &self.node;
        let mut world = local_transform(node);
        for name in path.split('/').filter(|s| !s.is_empty()) {
            node = node.child(name)?;
            world = world.then(&local_transform(node));
        }
        Some(world)
    }

    /// Scene document holding the figure and the configured palette.
    pub fn to_document(&self, config: &ClownConfig) -> Document {
        Document {
            materials: config.material_defs(),
            root: self.node.clone(),
            ..Document::new()
        }
    }

    /// Tessellated meshes, one per primitive, in the figure's parent frame.
    pub fn scene_meshes(&self, detail: &Detail) -> Vec<SceneMesh> {
        tessellate_scene(&self.node, &TessellationParams::from(detail))
    }

    /// All primitives tessellated into one mesh in the figure's parent frame.
    pub fn to_mesh(&self, detail: &Detail) -> TriangleMesh {
        tessellate_merged(&self.node, &TessellationParams::from(detail))
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::unbuilt()
    }
}
