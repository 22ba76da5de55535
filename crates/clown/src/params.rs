//! Figure parameters and the merge-update store.
//!
//! [`ClownParams`] is always fully populated. Updates arrive as
//! [`PartialClownParams`], where every field is optional, and are merged
//! with [`merge_update`]: present fields overwrite, absent fields keep their
//! current value. The merge recurses exactly one level into the per-arm
//! records so `{arms: {leftArm: {rotX: ..}}}` does not reset `leftArm.rotZ`.
//!
//! Nothing here validates values. Negative or non-finite numbers are stored
//! as given and rejected later, when a primitive is built from them.

use crate::error::{ClownError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Shoulder-joint rotation of one arm, in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmParams {
    /// Rotation about X.
    pub rot_x: f64,
    /// Rotation about Y.
    pub rot_y: f64,
    /// Rotation about Z.
    pub rot_z: f64,
}

/// Both arms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArmsParams {
    /// Arm length shared by both arms.
    pub length: f64,
    /// Figure-left arm (positive X).
    pub left_arm: ArmParams,
    /// Figure-right arm (negative X).
    pub right_arm: ArmParams,
}

impl Default for ArmsParams {
    fn default() -> Self {
        Self {
            length: 10.0,
            left_arm: ArmParams {
                rot_z: PI / 6.0,
                ..ArmParams::default()
            },
            right_arm: ArmParams {
                rot_z: -PI / 6.0,
                ..ArmParams::default()
            },
        }
    }
}

/// Both legs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegsParams {
    /// Leg length shared by both legs.
    pub length: f64,
}

impl Default for LegsParams {
    fn default() -> Self {
        Self { length: 10.0 }
    }
}

/// Torso proportions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyParams {
    /// Torso sphere radius.
    pub radius: f64,
    /// Vertical stretch of the torso sphere.
    pub stretch_y: f64,
}

impl Default for BodyParams {
    fn default() -> Self {
        Self {
            radius: 6.0,
            stretch_y: 1.25,
        }
    }
}

/// Head scale and neck rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadParams {
    /// Scale along X.
    pub scale_x: f64,
    /// Scale along Y.
    pub scale_y: f64,
    /// Scale along Z.
    pub scale_z: f64,
    /// Rotation about X.
    pub rot_x: f64,
    /// Rotation about Y.
    pub rot_y: f64,
    /// Rotation about Z.
    pub rot_z: f64,
}

impl Default for HeadParams {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            scale_z: 1.0,
            rot_x: 0.0,
            rot_y: 0.0,
            rot_z: 0.0,
        }
    }
}

/// The complete parameter set for one figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClownParams {
    /// Arms.
    pub arms: ArmsParams,
    /// Legs.
    pub legs: LegsParams,
    /// Torso.
    pub body: BodyParams,
    /// Head.
    pub head: HeadParams,
}

/// Every dotted parameter path, in display order.
pub const PARAMETER_PATHS: [&str; 16] = [
    "arms.length",
    "arms.leftArm.rotX",
    "arms.leftArm.rotY",
    "arms.leftArm.rotZ",
    "arms.rightArm.rotX",
    "arms.rightArm.rotY",
    "arms.rightArm.rotZ",
    "legs.length",
    "body.radius",
    "body.stretchY",
    "head.scaleX",
    "head.scaleY",
    "head.scaleZ",
    "head.rotX",
    "head.rotY",
    "head.rotZ",
];

impl ClownParams {
    /// Read a field by dotted path, e.g. `"arms.leftArm.rotZ"`.
    pub fn get(&self, path: &str) -> Option<f64> {
        let value = match path {
            "arms.length" => self.arms.length,
            "arms.leftArm.rotX" => self.arms.left_arm.rot_x,
            "arms.leftArm.rotY" => self.arms.left_arm.rot_y,
            "arms.leftArm.rotZ" => self.arms.left_arm.rot_z,
            "arms.rightArm.rotX" => self.arms.right_arm.rot_x,
            "arms.rightArm.rotY" => self.arms.right_arm.rot_y,
            "arms.rightArm.rotZ" => self.arms.right_arm.rot_z,
            "legs.length" => self.legs.length,
            "body.radius" => self.body.radius,
            "body.stretchY" => self.body.stretch_y,
            "head.scaleX" => self.head.scale_x,
            "head.scaleY" => self.head.scale_y,
            "head.scaleZ" => self.head.scale_z,
            "head.rotX" => self.head.rot_x,
            "head.rotY" => self.head.rot_y,
            "head.rotZ" => self.head.rot_z,
            _ => return None,
        };
        Some(value)
    }
}

// =============================================================================
// Partial records
// =============================================================================

/// Partial [`ArmParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialArmParams {
    /// Rotation about X.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_x: Option<f64>,
    /// Rotation about Y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_y: Option<f64>,
    /// Rotation about Z.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_z: Option<f64>,
}

/// Partial [`ArmsParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialArmsParams {
    /// Arm length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Left arm rotation fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_arm: Option<PartialArmParams>,
    /// Right arm rotation fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_arm: Option<PartialArmParams>,
}

/// Partial [`LegsParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialLegsParams {
    /// Leg length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

/// Partial [`BodyParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialBodyParams {
    /// Torso radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    /// Vertical stretch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stretch_y: Option<f64>,
}

/// Partial [`HeadParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialHeadParams {
    /// Scale along X.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_x: Option<f64>,
    /// Scale along Y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_y: Option<f64>,
    /// Scale along Z.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale_z: Option<f64>,
    /// Rotation about X.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_x: Option<f64>,
    /// Rotation about Y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_y: Option<f64>,
    /// Rotation about Z.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rot_z: Option<f64>,
}

/// A parameter update where any subset of fields may be omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialClownParams {
    /// Arm fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arms: Option<PartialArmsParams>,
    /// Leg fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legs: Option<PartialLegsParams>,
    /// Torso fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<PartialBodyParams>,
    /// Head fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<PartialHeadParams>,
}

fn assign(slot: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *slot = v;
    }
}

fn layer(slot: &mut Option<f64>, value: Option<f64>) {
    if value.is_some() {
        *slot = value;
    }
}

impl PartialArmParams {
    fn apply_to(&self, arm: &mut ArmParams) {
        assign(&mut arm.rot_x, self.rot_x);
        assign(&mut arm.rot_y, self.rot_y);
        assign(&mut arm.rot_z, self.rot_z);
    }

    fn layer(&mut self, other: &Self) {
        layer(&mut self.rot_x, other.rot_x);
        layer(&mut self.rot_y, other.rot_y);
        layer(&mut self.rot_z, other.rot_z);
    }

    fn slot(&mut self, field: &str) -> Option<&mut Option<f64>> {
        match field {
            "rotX" => Some(&mut self.rot_x),
            "rotY" => Some(&mut self.rot_y),
            "rotZ" => Some(&mut self.rot_z),
            _ => None,
        }
    }
}

impl PartialArmsParams {
    fn apply_to(&self, arms: &mut ArmsParams) {
        assign(&mut arms.length, self.length);
        // One level deeper: per-arm fields merge individually.
        if let Some(left) = &self.left_arm {
            left.apply_to(&mut arms.left_arm);
        }
        if let Some(right) = &self.right_arm {
            right.apply_to(&mut arms.right_arm);
        }
    }

    fn layer(&mut self, other: &Self) {
        layer(&mut self.length, other.length);
        if let Some(left) = &other.left_arm {
            self.left_arm.get_or_insert_with(Default::default).layer(left);
        }
        if let Some(right) = &other.right_arm {
            self.right_arm.get_or_insert_with(Default::default).layer(right);
        }
    }
}

impl PartialLegsParams {
    fn apply_to(&self, legs: &mut LegsParams) {
        assign(&mut legs.length, self.length);
    }
}

impl PartialBodyParams {
    fn apply_to(&self, body: &mut BodyParams) {
        assign(&mut body.radius, self.radius);
        assign(&mut body.stretch_y, self.stretch_y);
    }
}

impl PartialHeadParams {
    fn apply_to(&self, head: &mut HeadParams) {
        assign(&mut head.scale_x, self.scale_x);
        assign(&mut head.scale_y, self.scale_y);
        assign(&mut head.scale_z, self.scale_z);
        assign(&mut head.rot_x, self.rot_x);
        assign(&mut head.rot_y, self.rot_y);
        assign(&mut head.rot_z, self.rot_z);
    }

    fn layer(&mut self, other: &Self) {
        layer(&mut self.scale_x, other.scale_x);
        layer(&mut self.scale_y, other.scale_y);
        layer(&mut self.scale_z, other.scale_z);
        layer(&mut self.rot_x, other.rot_x);
        layer(&mut self.rot_y, other.rot_y);
        layer(&mut self.rot_z, other.rot_z);
    }
}

impl PartialClownParams {
    /// An update that changes nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every present field onto `params`.
    pub fn apply_to(&self, params: &mut ClownParams) {
        if let Some(arms) = &self.arms {
            arms.apply_to(&mut params.arms);
        }
        if let Some(legs) = &self.legs {
            legs.apply_to(&mut params.legs);
        }
        if let Some(body) = &self.body {
            body.apply_to(&mut params.body);
        }
        if let Some(head) = &self.head {
            head.apply_to(&mut params.head);
        }
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: &PartialClownParams) {
        if let Some(arms) = &other.arms {
            self.arms.get_or_insert_with(Default::default).layer(arms);
        }
        if let Some(legs) = &other.legs {
            layer(
                &mut self.legs.get_or_insert_with(Default::default).length,
                legs.length,
            );
        }
        if let Some(body) = &other.body {
            let mine = self.body.get_or_insert_with(Default::default);
            layer(&mut mine.radius, body.radius);
            layer(&mut mine.stretch_y, body.stretch_y);
        }
        if let Some(head) = &other.head {
            self.head.get_or_insert_with(Default::default).layer(head);
        }
    }

    /// Set a single field by dotted path, e.g. `"legs.length"`.
    pub fn set(&mut self, path: &str, value: f64) -> Result<()> {
        if !PARAMETER_PATHS.contains(&path) {
            return Err(ClownError::UnknownParameter(path.to_string()));
        }
        let slot = self
            .slot(path)
            .ok_or_else(|| ClownError::UnknownParameter(path.to_string()))?;
        *slot = Some(value);
        Ok(())
    }

    /// Builder form of [`PartialClownParams::set`].
    pub fn with(mut self, path: &str, value: f64) -> Result<Self> {
        self.set(path, value)?;
        Ok(self)
    }

    fn slot(&mut self, path: &str) -> Option<&mut Option<f64>> {
        let (section, field) = path.split_once('.')?;
        match section {
            "arms" => {
                let arms = self.arms.get_or_insert_with(Default::default);
                match field.split_once('.') {
                    Some(("leftArm", f)) => arms.left_arm.get_or_insert_with(Default::default).slot(f),
                    Some(("rightArm", f)) => {
                        arms.right_arm.get_or_insert_with(Default::default).slot(f)
                    }
                    None if field == "length" => Some(&mut arms.length),
                    _ => None,
                }
            }
            "legs" if field == "length" => {
                Some(&mut self.legs.get_or_insert_with(Default::default).length)
            }
            "body" => {
                let body = self.body.get_or_insert_with(Default::default);
                match field {
                    "radius" => Some(&mut body.radius),
                    "stretchY" => Some(&mut body.stretch_y),
                    _ => None,
                }
            }
            "head" => {
                let head = self.head.get_or_insert_with(Default::default);
                match field {
                    "scaleX" => Some(&mut head.scale_x),
                    "scaleY" => Some(&mut head.scale_y),
                    "scaleZ" => Some(&mut head.scale_z),
                    "rotX" => Some(&mut head.rot_x),
                    "rotY" => Some(&mut head.rot_y),
                    "rotZ" => Some(&mut head.rot_z),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Merge `partial` into `current`, starting from defaults when there is no
/// current value.
///
/// Never fails: every scalar is stored as given.
pub fn merge_update(current: Option<&ClownParams>, partial: &PartialClownParams) -> ClownParams {
    let mut next = current.copied().unwrap_or_default();
    partial.apply_to(&mut next);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn defaults_match_documented_values() {
        let p = merge_update(None, &PartialClownParams::empty());
        assert_eq!(p.arms.length, 10.0);
        assert_eq!(p.legs.length, 10.0);
        assert_eq!(p.body.radius, 6.0);
        assert_eq!(p.body.stretch_y, 1.25);
        assert_eq!(p.arms.left_arm.rot_z, PI / 6.0);
        assert_eq!(p.arms.right_arm.rot_z, -PI / 6.0);
        assert_eq!(p.arms.left_arm.rot_x, 0.0);
        assert_eq!((p.head.scale_x, p.head.scale_y, p.head.scale_z), (1.0, 1.0, 1.0));
        assert_eq!((p.head.rot_x, p.head.rot_y, p.head.rot_z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn merge_recurses_into_arm_records() {
        let base = ClownParams::default();
        let partial: PartialClownParams =
            serde_json::from_str(r#"{ "arms": { "leftArm": { "rotX": 0.5 } } }"#).unwrap();
        let merged = merge_update(Some(&base), &partial);

        assert_eq!(merged.arms.left_arm.rot_x, 0.5);
        // Sibling fields in the same arm record survive.
        assert_eq!(merged.arms.left_arm.rot_z, PI / 6.0);
        assert_eq!(merged.arms.right_arm, base.arms.right_arm);
        assert_eq!(merged.arms.length, base.arms.length);
    }

    #[test]
    fn omitted_sections_are_preserved() {
        let mut base = ClownParams::default();
        base.body.radius = 9.0;
        let partial = PartialClownParams::empty().with("legs.length", 15.0).unwrap();
        let merged = merge_update(Some(&base), &partial);

        assert_eq!(merged.legs.length, 15.0);
        assert_eq!(merged.body.radius, 9.0);
        assert_eq!(merged.head, base.head);
        assert_eq!(merged.arms, base.arms);
    }

    #[test]
    fn values_are_stored_unvalidated() {
        let partial = PartialClownParams::empty()
            .with("body.radius", -3.0)
            .unwrap()
            .with("head.rotZ", f64::INFINITY)
            .unwrap();
        let merged = merge_update(None, &partial);
        assert_eq!(merged.body.radius, -3.0);
        assert!(merged.head.rot_z.is_infinite());
    }

    #[test]
    fn every_path_is_readable_and_settable() {
        let mut partial = PartialClownParams::empty();
        for (i, path) in PARAMETER_PATHS.iter().enumerate() {
            partial.set(path, i as f64 + 100.0).unwrap();
        }
        let merged = merge_update(None, &partial);
        for (i, path) in PARAMETER_PATHS.iter().enumerate() {
            assert_eq!(merged.get(path), Some(i as f64 + 100.0), "{path}");
        }
    }

    #[test]
    fn unknown_paths_are_rejected() {
        let mut partial = PartialClownParams::empty();
        for path in ["legs.rotX", "arms.leftArm.length", "tail.length", "body", ""] {
            assert!(
                matches!(partial.set(path, 1.0), Err(ClownError::UnknownParameter(_))),
                "{path}"
            );
        }
        assert_eq!(ClownParams::default().get("head.scale"), None);
    }

    #[test]
    fn layered_partials_prefer_later_fields() {
        let mut file = PartialClownParams::empty()
            .with("arms.leftArm.rotX", 1.0)
            .unwrap()
            .with("legs.length", 12.0)
            .unwrap();
        let overrides = PartialClownParams::empty()
            .with("arms.leftArm.rotY", 2.0)
            .unwrap()
            .with("legs.length", 20.0)
            .unwrap();
        file.merge(&overrides);

        let merged = merge_update(None, &file);
        assert_eq!(merged.arms.left_arm.rot_x, 1.0);
        assert_eq!(merged.arms.left_arm.rot_y, 2.0);
        assert_eq!(merged.legs.length, 20.0);
    }

    #[test]
    fn unknown_keys_fail_to_deserialize() {
        let result: std::result::Result<PartialClownParams, _> =
            serde_json::from_str(r#"{ "legs": { "lenght": 3 } }"#);
        assert!(result.is_err());
    }

    #[test]
    fn partial_serializes_only_present_fields() {
        let partial = PartialClownParams::empty().with("head.rotY", 0.25).unwrap();
        let json = serde_json::to_string(&partial).unwrap();
        assert_eq!(json, r#"{"head":{"rotY":0.25}}"#);
        assert!(!partial.is_empty());
        assert!(PartialClownParams::empty().is_empty());
    }
}
