//! Runtime-adjustable detection parameters
//!
//! Partial updates are merged without validation: out-of-range values are
//! accepted as given.

use serde::{Deserialize, Serialize};

use crate::domain::ConstraintDefaults;
use crate::systems::ResponseConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollisionConfig {
    /// Broad-phase cell edge length (world units)
    pub cell_size: f32,
    /// Epsilon for degenerate geometry and the friction threshold
    pub precision: f32,
    /// Candidate pairs with centers farther apart than this are skipped
    pub max_detection_distance: f32,
    /// Scales the separation strength used by `update`
    pub response_strength: f32,
    /// Response applied by `update`
    pub response: ResponseConfig,
    /// Constraint step (seconds) when the caller passes none
    pub time_step: f32,
    pub constraint_defaults: ConstraintDefaults,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: 100.0,
            precision: 1e-4,
            max_detection_distance: 10_000.0,
            response_strength: 1.0,
            response: ResponseConfig::default(),
            time_step: 1.0 / 60.0,
            constraint_defaults: ConstraintDefaults::default(),
        }
    }
}

impl CollisionConfig {
    /// Response used by `update`: the configured one with
    /// `response_strength` folded into the separation strength
    pub fn effective_response(&self) -> ResponseConfig {
        ResponseConfig {
            separation_strength: self.response.separation_strength * self.response_strength,
            ..self.response
        }
    }

    pub fn merge(&mut self, patch: CollisionConfigPatch) {
        if let Some(v) = patch.cell_size {
            self.cell_size = v;
        }
        if let Some(v) = patch.precision {
            self.precision = v;
        }
        if let Some(v) = patch.max_detection_distance {
            self.max_detection_distance = v;
        }
        if let Some(v) = patch.response_strength {
            self.response_strength = v;
        }
        if let Some(v) = patch.time_step {
            self.time_step = v;
        }
        if let Some(v) = patch.constraint_defaults {
            self.constraint_defaults = v;
        }
        if let Some(r) = patch.response {
            if let Some(v) = r.restitution_multiplier {
                self.response.restitution_multiplier = v;
            }
            if let Some(v) = r.friction {
                self.response.friction = v;
            }
            if let Some(v) = r.separate {
                self.response.separate = v;
            }
            if let Some(v) = r.separation_strength {
                self.response.separation_strength = v;
            }
        }
    }
}

/// Partial config; absent fields keep their current value
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollisionConfigPatch {
    pub cell_size: Option<f32>,
    pub precision: Option<f32>,
    pub max_detection_distance: Option<f32>,
    pub response_strength: Option<f32>,
    pub response: Option<ResponseConfigPatch>,
    pub time_step: Option<f32>,
    pub constraint_defaults: Option<ConstraintDefaults>,
}

impl CollisionConfigPatch {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseConfigPatch {
    pub restitution_multiplier: Option<f32>,
    pub friction: Option<f32>,
    pub separate: Option<bool>,
    pub separation_strength: Option<f32>,
}
