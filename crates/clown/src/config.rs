//! Rendering configuration: palette colors and tessellation detail.
//!
//! Loaded from TOML. Every field is optional; a file only needs to name what
//! it changes:
//!
//! ```toml
//! [detail]
//! sphere_width_segments = 48
//!
//! [materials.hat]
//! color = [0.9, 0.1, 0.6]
//! ```
//!
//! Palette entries missing from the file keep their default colors.

use crate::palette;
use clown_ir::MaterialDef;
use clown_tessellate::TessellationParams;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid configuration TOML.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Segment counts used to tessellate primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Detail {
    /// Sphere segments around the vertical axis.
    pub sphere_width_segments: u32,
    /// Sphere segments pole to pole.
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

impl Default for Detail {
    fn default() -> Self {
        let t = TessellationParams::default();
        Self {
            sphere_width_segments: t.sphere_width_segments,
            sphere_height_segments: t.sphere_height_segments,
            cylinder_radial_segments: t.cylinder_radial_segments,
            torus_radial_segments: t.torus_radial_segments,
            torus_tubular_segments: t.torus_tubular_segments,
            circle_segments: t.circle_segments,
        }
    }
}

impl From<&Detail> for TessellationParams {
    fn from(d: &Detail) -> Self {
        Self {
            sphere_width_segments: d.sphere_width_segments,
            sphere_height_segments: d.sphere_height_segments,
            cylinder_radial_segments: d.cylinder_radial_segments,
            torus_radial_segments: d.torus_radial_segments,
            torus_tubular_segments: d.torus_tubular_segments,
            circle_segments: d.circle_segments,
        }
    }
}

/// One palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialSpec {
    /// Base color as `[r, g, b]` in 0.0..1.0.
    pub color: [f64; 3],
    /// Per-face shading.
    #[serde(default = "flat")]
    pub flat_shading: bool,
}

fn flat() -> bool {
    true
}

/// Complete rendering configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClownConfig {
    /// Tessellation detail.
    pub detail: Detail,
    /// Palette keyed by material name.
    pub materials: BTreeMap<String, MaterialSpec>,
}

impl Default for ClownConfig {
    fn default() -> Self {
        let materials = palette::DEFAULT_COLORS
            .iter()
            .map(|&(key, color)| {
                (
                    key.to_string(),
                    MaterialSpec {
                        color,
                        flat_shading: true,
                    },
                )
            })
            .collect();
        Self {
            detail: Detail::default(),
            materials,
        }
    }
}

impl ClownConfig {
    /// Parse a TOML configuration, filling unspecified palette entries with defaults.
    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: ClownConfig = toml::from_str(toml_str)?;
        for (key, spec) in ClownConfig::default().materials {
            config.materials.entry(key).or_insert(spec);
        }
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::parse(&text)?;
        debug!(path = %path.display(), materials = config.materials.len(), "loaded config");
        Ok(config)
    }

    /// Tessellation parameters for this configuration.
    pub fn tessellation(&self) -> TessellationParams {
        TessellationParams::from(&self.detail)
    }

    /// Palette as scene-document material definitions.
    pub fn material_defs(&self) -> HashMap<String, MaterialDef> {
        self.materials
            .iter()
            .map(|(key, spec)| {
                (
                    key.clone(),
                    MaterialDef {
                        name: key.clone(),
                        color: spec.color,
                        flat_shading: spec.flat_shading,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_covers_every_key() {
        let config = ClownConfig::default();
        for (key, _) in palette::DEFAULT_COLORS {
            assert!(config.materials.contains_key(key), "{key}");
        }
        assert!(config.materials.values().all(|m| m.flat_shading));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = ClownConfig::parse(
            r#"
[detail]
sphere_width_segments = 48

[materials.hat]
color = [0.9, 0.1, 0.6]
flat_shading = false
"#,
        )
        .unwrap();

        assert_eq!(config.detail.sphere_width_segments, 48);
        assert_eq!(config.detail.sphere_height_segments, 16);
        assert_eq!(config.materials["hat"].color, [0.9, 0.1, 0.6]);
        assert!(!config.materials["hat"].flat_shading);
        assert_eq!(
            config.materials["nose"],
            ClownConfig::default().materials["nose"]
        );
        assert_eq!(config.tessellation().sphere_width_segments, 48);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ClownConfig::parse("").unwrap(), ClownConfig::default());
    }

    #[test]
    fn unknown_keys_are_errors() {
        let err = ClownConfig::parse("[detail]\nsphere_segments = 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn extra_materials_are_kept() {
        let config = ClownConfig::parse("[materials.confetti]\ncolor = [0.1, 0.9, 0.3]\n").unwrap();
        let defs = config.material_defs();
        assert_eq!(defs["confetti"].name, "confetti");
        assert!(defs["confetti"].flat_shading);
        assert_eq!(defs.len(), palette::DEFAULT_COLORS.len() + 1);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ClownConfig::load("/nonexistent/clown.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
