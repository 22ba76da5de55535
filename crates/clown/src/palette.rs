//! Material keys used by the builders and their default colors.

/// Torso and shoulder puffs.
pub const BODY: &str = "body";
/// Arm and leg cylinders.
pub const LIMB: &str = "limb";
/// Gloves.
pub const HAND: &str = "hand";
/// Shoe domes and soles.
pub const FOOT: &str = "foot";
/// Face.
pub const SKIN: &str = "skin";
/// Ears.
pub const EAR: &str = "ear";
/// Eyes.
pub const EYE: &str = "eye";
/// Red nose.
pub const NOSE: &str = "nose";
/// Smile.
pub const MOUTH: &str = "mouth";
/// Hat crown.
pub const HAT: &str = "hat";
/// Hat brim.
pub const HAT_BRIM: &str = "hat_brim";

/// Default palette as `(key, rgb)`.
pub const DEFAULT_COLORS: [(&str, [f64; 3]); 11] = [
    (BODY, [0.86, 0.16, 0.18]),
    (LIMB, [0.98, 0.80, 0.16]),
    (HAND, [0.96, 0.96, 0.96]),
    (FOOT, [0.16, 0.36, 0.86]),
    (SKIN, [1.0, 0.87, 0.77]),
    (EAR, [0.96, 0.74, 0.64]),
    (EYE, [0.05, 0.05, 0.08]),
    (NOSE, [0.92, 0.08, 0.10]),
    (MOUTH, [0.72, 0.08, 0.20]),
    (HAT, [0.10, 0.10, 0.12]),
    (HAT_BRIM, [0.20, 0.12, 0.40]),
];
