//! File export: JSON scene documents and binary STL meshes.

pub mod stl;

use crate::error::Result;
use clown_ir::Document;
use std::path::Path;
use tracing::debug;

/// Write a scene document as pretty-printed JSON.
pub fn write_json(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = doc.to_json()?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), nodes = doc.root.descendant_count() + 1, "wrote scene JSON");
    Ok(())
}
