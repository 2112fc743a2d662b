use serde::{Deserialize, Serialize};

/// Surface response of a body
///
/// Presets are plain values; pass them into the body factories.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    /// Bounciness (0.0 = no bounce, 1.0 = full elastic)
    pub restitution: f32,
    pub friction: f32,
    /// Mass per unit area, used when a factory derives mass from the shape
    pub density: f32,
}

impl Material {
    pub const RUBBER: Material = Material { restitution: 0.9, friction: 0.8, density: 0.0012 };
    pub const WOOD: Material = Material { restitution: 0.4, friction: 0.5, density: 0.0007 };
    pub const METAL: Material = Material { restitution: 0.2, friction: 0.3, density: 0.0078 };
    pub const ICE: Material = Material { restitution: 0.1, friction: 0.02, density: 0.0009 };
    /// Slight bounce like stone
    pub const STONE: Material = Material { restitution: 0.3, friction: 0.6, density: 0.0025 };

    pub fn new(restitution: f32, friction: f32, density: f32) -> Self {
        Self {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
            density,
        }
    }

    /// Look up a preset by its lowercase name
    pub fn preset(name: &str) -> Option<Material> {
        match name {
            "rubber" => Some(Self::RUBBER),
            "wood" => Some(Self::WOOD),
            "metal" => Some(Self::METAL),
            "ice" => Some(Self::ICE),
            "stone" => Some(Self::STONE),
            _ => None,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::STONE
    }
}
