#![warn(missing_docs)]

//! Primitive-to-triangle-mesh tessellation for clown scenes.
//!
//! Every primitive is sampled on a regular (u, v) parameter grid and
//! stitched into quads; spheres drop the degenerate triangles at the poles
//! and cylinders get fan caps. [`tessellate_scene`] walks a node tree,
//! composing each node's `T * R * S` transform with its parent's, and
//! returns world-space meshes tagged with their material keys.

use clown_ir::{Geometry, Node};
use clown_math::{Point3, Transform, Vec3};
use std::f64::consts::{PI, TAU};

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    fn push_vertex(&mut self, p: Point3, n: Vec3) -> u32 {
        let idx = self.num_vertices() as u32;
        self.vertices
            .extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        self.normals
            .extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
        idx
    }

    /// Vertex `i` as a point.
    pub fn vertex(&self, i: usize) -> Point3 {
        Point3::new(
            self.vertices[i * 3] as f64,
            self.vertices[i * 3 + 1] as f64,
            self.vertices[i * 3 + 2] as f64,
        )
    }

    /// Copy of this mesh with `transform` applied.
    ///
    /// Triangle winding is reversed when the transform mirrors, so faces
    /// keep pointing outwards.
    pub fn transformed(&self, transform: &Transform) -> TriangleMesh {
        let mut out = TriangleMesh::new();
        for i in 0..self.num_vertices() {
            let p = transform.apply_point(&self.vertex(i));
            let n = Vec3::new(
                self.normals[i * 3] as f64,
                self.normals[i * 3 + 1] as f64,
                self.normals[i * 3 + 2] as f64,
            );
            let n = transform
                .apply_normal(&n)
                .try_normalize(1e-12)
                .unwrap_or(n);
            out.push_vertex(p, n);
        }
        if transform.is_mirroring() {
            for tri in self.indices.chunks(3) {
                out.indices.extend_from_slice(&[tri[0], tri[2], tri[1]]);
            }
        } else {
            out.indices = self.indices.clone();
        }
        out
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<([f64; 3], [f64; 3])> {
        if self.vertices.is_empty() {
            return None;
        }
        let mut min = [f64::MAX; 3];
        let mut max = [f64::MIN; 3];
        for chunk in self.vertices.chunks(3) {
            for i in 0..3 {
                let v = chunk[i] as f64;
                min[i] = min[i].min(v);
                max[i] = max[i].max(v);
            }
        }
        Some((min, max))
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Tessellation parameters used when a primitive leaves a segment count at 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationParams {
    /// Sphere segments around the Y axis.
    pub sphere_width_segments: u32,
    /// Sphere segments from pole to pole.
    pub sphere_height_segments: u32,
    /// Cylinder segments around the axis.
    pub cylinder_radial_segments: u32,
    /// Torus segments around the tube.
    pub torus_radial_segments: u32,
    /// Torus segments along the sweep.
    pub torus_tubular_segments: u32,
    /// Disc rim segments.
    pub circle_segments: u32,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            sphere_width_segments: 32,
            sphere_height_segments: 16,
            cylinder_radial_segments: 32,
            torus_radial_segments: 12,
            torus_tubular_segments: 48,
            circle_segments: 32,
        }
    }
}

fn segments_or(requested: u32, fallback: u32, min: u32) -> usize {
    let n = if requested == 0 { fallback } else { requested };
    n.max(min) as usize
}

/// A world-space mesh extracted from a scene node.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    /// Name of the node the mesh came from.
    pub name: String,
    /// Material key of the mesh.
    pub material: String,
    /// Triangles in the root node's coordinate frame.
    pub mesh: TriangleMesh,
}

/// Local `T * R * S` transform of a node.
pub fn local_transform(node: &Node) -> Transform {
    Transform::from_trs(
        node.position.to_array(),
        node.rotation.to_array(),
        node.scale.to_array(),
    )
}

/// Tessellate every mesh in the tree rooted at `root`.
///
/// The root's own transform is included, so the output is in the
/// coordinate frame of `root`'s parent.
pub fn tessellate_scene(root: &Node, params: &TessellationParams) -> Vec<SceneMesh> {
    let mut out = Vec::new();
    collect_meshes(root, &Transform::identity(), params, &mut out);
    out
}

fn collect_meshes(
    node: &Node,
    parent: &Transform,
    params: &TessellationParams,
    out: &mut Vec<SceneMesh>,
) {
    let world = parent.then(&local_transform(node));
    if let Some(mesh) = &node.mesh {
        out.push(SceneMesh {
            name: node.name().to_string(),
            material: mesh.material.clone(),
            mesh: tessellate_geometry(&mesh.geometry, params).transformed(&world),
        });
    }
    for child in &node.children {
        collect_meshes(child, &world, params, out);
    }
}

/// Tessellate a whole tree into a single merged mesh.
pub fn tessellate_merged(root: &Node, params: &TessellationParams) -> TriangleMesh {
    let mut merged = TriangleMesh::new();
    for scene_mesh in tessellate_scene(root, params) {
        merged.merge(&scene_mesh.mesh);
    }
    merged
}

/// Tessellate a single primitive in its local frame.
pub fn tessellate_geometry(geometry: &Geometry, params: &TessellationParams) -> TriangleMesh {
    match *geometry {
        Geometry::Sphere {
            radius,
            width_segments,
            height_segments,
            phi_start,
            phi_length,
            theta_start,
            theta_length,
        } => tessellate_sphere(
            radius,
            segments_or(width_segments, params.sphere_width_segments, 3),
            segments_or(height_segments, params.sphere_height_segments, 2),
            (phi_start, phi_length),
            (theta_start, theta_length),
        ),
        Geometry::Cylinder {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
        } => tessellate_cylinder(
            radius_top,
            radius_bottom,
            height,
            segments_or(radial_segments, params.cylinder_radial_segments, 3),
        ),
        Geometry::Torus {
            radius,
            tube,
            radial_segments,
            tubular_segments,
            arc,
        } => tessellate_torus(
            radius,
            tube,
            segments_or(radial_segments, params.torus_radial_segments, 3),
            segments_or(tubular_segments, params.torus_tubular_segments, 1),
            arc,
        ),
        Geometry::Circle { radius, segments } => {
            tessellate_circle(radius, segments_or(segments, params.circle_segments, 3))
        }
    }
}

/// Sphere band on a (phi, theta) grid.
///
/// Rows touching a pole emit one triangle per quad instead of two.
fn tessellate_sphere(
    radius: f64,
    n_phi: usize,
    n_theta: usize,
    (phi_start, phi_length): (f64, f64),
    (theta_start, theta_length): (f64, f64),
) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let theta_end = (theta_start + theta_length).min(PI);

    let mut grid = Vec::with_capacity(n_theta + 1);
    for iy in 0..=n_theta {
        let theta = theta_start + theta_length * (iy as f64 / n_theta as f64);
        let mut row = Vec::with_capacity(n_phi + 1);
        for ix in 0..=n_phi {
            let phi = phi_start + phi_length * (ix as f64 / n_phi as f64);
            let dir = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            row.push(mesh.push_vertex(Point3::from(dir * radius), dir));
        }
        grid.push(row);
    }

    for iy in 0..n_theta {
        for ix in 0..n_phi {
            let a = grid[iy][ix + 1];
            let b = grid[iy][ix];
            let c = grid[iy + 1][ix];
            let d = grid[iy + 1][ix + 1];
            if iy != 0 || theta_start > 0.0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != n_theta - 1 || theta_end < PI {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    mesh
}

/// Tapered cylinder along Y with both ends capped.
fn tessellate_cylinder(radius_top: f64, radius_bottom: f64, height: f64, n: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let half = height / 2.0;
    let slope = if height.abs() > 0.0 {
        (radius_bottom - radius_top) / height
    } else {
        0.0
    };

    let mut rings = [Vec::with_capacity(n + 1), Vec::with_capacity(n + 1)];
    for (row, (radius, y)) in [(radius_top, half), (radius_bottom, -half)]
        .into_iter()
        .enumerate()
    {
        for i in 0..=n {
            let theta = TAU * (i as f64 / n as f64);
            let (s, c) = theta.sin_cos();
            let normal = Vec3::new(s, slope, c)
                .try_normalize(1e-12)
                .unwrap_or_else(Vec3::y);
            rings[row].push(mesh.push_vertex(Point3::new(radius * s, y, radius * c), normal));
        }
    }
    for i in 0..n {
        let a = rings[0][i];
        let b = rings[1][i];
        let c = rings[1][i + 1];
        let d = rings[0][i + 1];
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    add_cap(&mut mesh, radius_top, half, n, true);
    add_cap(&mut mesh, radius_bottom, -half, n, false);
    mesh
}

fn add_cap(mesh: &mut TriangleMesh, radius: f64, y: f64, n: usize, top: bool) {
    let normal = if top { Vec3::y() } else { -Vec3::y() };
    let center = mesh.push_vertex(Point3::new(0.0, y, 0.0), normal);
    let rim: Vec<u32> = (0..=n)
        .map(|i| {
            let theta = TAU * (i as f64 / n as f64);
            let (s, c) = theta.sin_cos();
            mesh.push_vertex(Point3::new(radius * s, y, radius * c), normal)
        })
        .collect();
    for i in 0..n {
        if top {
            mesh.indices.extend_from_slice(&[center, rim[i], rim[i + 1]]);
        } else {
            mesh.indices.extend_from_slice(&[center, rim[i + 1], rim[i]]);
        }
    }
}

/// Torus arc in the XY plane; the tube ends are left open.
fn tessellate_torus(
    radius: f64,
    tube: f64,
    n_radial: usize,
    n_tubular: usize,
    arc: f64,
) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();

    for j in 0..=n_radial {
        let v = TAU * (j as f64 / n_radial as f64);
        for i in 0..=n_tubular {
            let u = arc * (i as f64 / n_tubular as f64);
            let ring = radius + tube * v.cos();
            let p = Point3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Point3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let normal = (p - center)
                .try_normalize(1e-12)
                .unwrap_or_else(|| Vec3::new(u.cos(), u.sin(), 0.0));
            mesh.push_vertex(p, normal);
        }
    }

    let stride = (n_tubular + 1) as u32;
    for j in 1..=n_radial as u32 {
        for i in 1..=n_tubular as u32 {
            let a = stride * j + i - 1;
            let b = stride * (j - 1) + i - 1;
            let c = stride * (j - 1) + i;
            let d = stride * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    mesh
}

/// Disc in the XY plane facing +Z.
fn tessellate_circle(radius: f64, n: usize) -> TriangleMesh {
    let mut mesh = TriangleMesh::new();
    let normal = Vec3::z();
    let center = mesh.push_vertex(Point3::origin(), normal);
    for i in 0..=n {
        let theta = TAU * (i as f64 / n as f64);
        mesh.push_vertex(
            Point3::new(radius * theta.cos(), radius * theta.sin(), 0.0),
            normal,
        );
    }
    for i in 1..=n as u32 {
        mesh.indices.extend_from_slice(&[i, i + 1, center]);
    }
    mesh
}
