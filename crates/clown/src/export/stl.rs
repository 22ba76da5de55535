//! Binary STL export.
//!
//! Layout: 80-byte header, little-endian `u32` triangle count, then 50 bytes
//! per triangle (facet normal, three vertices, `u16` attribute count).

use crate::error::{ClownError, Result};
use clown_tessellate::TriangleMesh;
use std::path::Path;
use tracing::debug;

const HEADER: &[u8] = b"clown binary STL";

fn facet_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let ab = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
    let ac = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
    let n = [
        ab[1] * ac[2] - ab[2] * ac[1],
        ab[2] * ac[0] - ab[0] * ac[2],
        ab[0] * ac[1] - ab[1] * ac[0],
    ];
    let len2 = n[0] * n[0] + n[1] * n[1] + n[2] * n[2];
    if len2 <= f32::EPSILON * f32::EPSILON {
        return [0.0, 0.0, 0.0];
    }
    let inv = 1.0 / len2.sqrt();
    [n[0] * inv, n[1] * inv, n[2] * inv]
}

fn corner(mesh: &TriangleMesh, index: u32) -> [f32; 3] {
    let i = index as usize * 3;
    [mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2]]
}

/// Encode a mesh as binary STL.
///
/// Returns [`ClownError::EmptyGeometry`] if the mesh has no triangles.
pub fn to_stl_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    let count = mesh.num_triangles();
    if count == 0 {
        return Err(ClownError::EmptyGeometry);
    }

    let mut out = Vec::with_capacity(84 + count * 50);
    let mut header = [0u8; 80];
    header[..HEADER.len()].copy_from_slice(HEADER);
    out.extend_from_slice(&header);
    out.extend_from_slice(&(count as u32).to_le_bytes());

    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [corner(mesh, tri[0]), corner(mesh, tri[1]), corner(mesh, tri[2])];
        for v in [facet_normal(a, b, c), a, b, c] {
            for component in v {
                out.extend_from_slice(&component.to_le_bytes());
            }
        }
        out.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(out)
}

/// Write a mesh to a binary STL file.
pub fn export_stl(mesh: &TriangleMesh, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_stl_bytes(mesh)?;
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), triangles = mesh.num_triangles(), "wrote STL");
    Ok(())
}
