//! Constraint records
//!
//! A constraint links an anchor on body A to an anchor on body B, or to a
//! fixed world point when body B is absent (Pin). Rest length is fixed at
//! creation time. Status is stored on the record itself; `Broken` is terminal.

use serde::{Deserialize, Serialize};

use crate::core::Vec2;

use super::body::BodyId;

pub type ConstraintId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConstraintKind {
    Distance,
    Spring,
    Rope,
    Pin,
    /// Solved with Distance math (no rotational freedom modelled)
    Revolute,
    /// Solved with Distance math (no axis sliding modelled)
    Prismatic,
    Weld,
}

/// Active -> Broken, never back
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ConstraintStatus {
    Active,
    Broken {
        /// Force that exceeded the threshold
        force: f32,
    },
}

/// Per-step measurement of a constraint
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintState {
    pub current_length: f32,
    /// |current_length - rest_length| * stiffness
    pub current_force: f32,
    /// 0.5 * stiffness * (current_length - rest_length)^2
    pub energy: f32,
    #[serde(flatten)]
    pub status: ConstraintStatus,
}

impl ConstraintState {
    pub fn new(current_length: f32) -> Self {
        Self {
            current_length,
            current_force: 0.0,
            energy: 0.0,
            status: ConstraintStatus::Active,
        }
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        matches!(self.status, ConstraintStatus::Broken { .. })
    }
}

/// Debug-render metadata
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderStyle {
    pub visible: bool,
    pub color: String,
    pub line_width: f32,
    pub anchor_radius: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            visible: true,
            color: "#4a9eff".to_string(),
            line_width: 2.0,
            anchor_radius: 3.0,
        }
    }
}

/// Creation parameters (JSON-friendly; everything but kind and bodyA optional)
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintConfig {
    #[serde(rename = "type")]
    pub kind: ConstraintKind,
    pub body_a: BodyId,
    #[serde(default)]
    pub body_b: Option<BodyId>,
    #[serde(default)]
    pub anchor_a: Option<Vec2>,
    #[serde(default)]
    pub anchor_b: Option<Vec2>,
    /// Pin target; defaults to body A's anchor at creation
    #[serde(default)]
    pub world_point: Option<Vec2>,
    /// Rest length; defaults to the anchor distance at creation
    #[serde(default)]
    pub length: Option<f32>,
    #[serde(default)]
    pub stiffness: Option<f32>,
    #[serde(default)]
    pub damping: Option<f32>,
    #[serde(default)]
    pub breakable: bool,
    #[serde(default)]
    pub break_force: Option<f32>,
    #[serde(default)]
    pub render: Option<RenderStyle>,
}

impl ConstraintConfig {
    pub fn new(kind: ConstraintKind, body_a: BodyId, body_b: Option<BodyId>) -> Self {
        Self {
            kind,
            body_a,
            body_b,
            anchor_a: None,
            anchor_b: None,
            world_point: None,
            length: None,
            stiffness: None,
            damping: None,
            breakable: false,
            break_force: None,
            render: None,
        }
    }

    pub fn with_length(mut self, length: f32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = Some(stiffness);
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = Some(damping);
        self
    }

    pub fn with_anchors(mut self, anchor_a: Vec2, anchor_b: Vec2) -> Self {
        self.anchor_a = Some(anchor_a);
        self.anchor_b = Some(anchor_b);
        self
    }

    pub fn with_world_point(mut self, point: Vec2) -> Self {
        self.world_point = Some(point);
        self
    }

    pub fn breakable(mut self, break_force: f32) -> Self {
        self.breakable = true;
        self.break_force = Some(break_force);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KindDefaults {
    pub stiffness: f32,
    pub damping: f32,
}

/// Stiffness/damping used when a config leaves them unset
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConstraintDefaults {
    pub distance: KindDefaults,
    pub spring: KindDefaults,
    pub rope: KindDefaults,
    pub pin: KindDefaults,
    /// Revolute and Prismatic
    pub joint: KindDefaults,
    pub weld: KindDefaults,
    pub break_force: f32,
}

impl ConstraintDefaults {
    pub fn for_kind(&self, kind: ConstraintKind) -> KindDefaults {
        match kind {
            ConstraintKind::Distance => self.distance,
            ConstraintKind::Spring => self.spring,
            ConstraintKind::Rope => self.rope,
            ConstraintKind::Pin => self.pin,
            ConstraintKind::Revolute | ConstraintKind::Prismatic => self.joint,
            ConstraintKind::Weld => self.weld,
        }
    }
}

impl Default for ConstraintDefaults {
    fn default() -> Self {
        Self {
            distance: KindDefaults { stiffness: 1.0, damping: 0.0 },
            spring: KindDefaults { stiffness: 0.5, damping: 0.05 },
            rope: KindDefaults { stiffness: 1.0, damping: 0.0 },
            pin: KindDefaults { stiffness: 10.0, damping: 0.5 },
            joint: KindDefaults { stiffness: 1.0, damping: 0.0 },
            weld: KindDefaults { stiffness: 0.5, damping: 0.1 },
            break_force: 1000.0,
        }
    }
}

/// A live constraint
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraint {
    pub id: ConstraintId,
    pub kind: ConstraintKind,
    pub body_a: BodyId,
    pub body_b: Option<BodyId>,
    /// Local anchor on body A
    pub anchor_a: Vec2,
    /// Local anchor on body B (unused without body B)
    pub anchor_b: Vec2,
    /// Fixed target when body B is absent
    pub world_point: Vec2,
    pub rest_length: f32,
    /// Relative angle (B - A) captured at creation, kept by Weld
    pub reference_angle: f32,
    pub stiffness: f32,
    pub damping: f32,
    pub breakable: bool,
    pub break_force: f32,
    pub render: RenderStyle,
    pub state: ConstraintState,
}

impl Constraint {
    #[inline]
    pub fn is_broken(&self) -> bool {
        self.state.is_broken()
    }

    /// Does this constraint reference the body?
    pub fn involves(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_from_json_defaults_optional_fields() {
        let cfg: ConstraintConfig =
            serde_json::from_str(r#"{"type":"spring","bodyA":1,"bodyB":2,"stiffness":0.3}"#).unwrap();
        assert_eq!(cfg.kind, ConstraintKind::Spring);
        assert_eq!(cfg.body_b, Some(2));
        assert_eq!(cfg.stiffness, Some(0.3));
        assert!(cfg.length.is_none());
        assert!(!cfg.breakable);
    }

    #[test]
    fn revolute_and_prismatic_share_joint_defaults() {
        let d = ConstraintDefaults::default();
        assert_eq!(d.for_kind(ConstraintKind::Revolute), d.joint);
        assert_eq!(d.for_kind(ConstraintKind::Prismatic), d.joint);
    }

    #[test]
    fn broken_state_serializes_status() {
        let mut state = ConstraintState::new(10.0);
        state.status = ConstraintStatus::Broken { force: 12.0 };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"status\":\"broken\""));
        assert!(state.is_broken());
    }
}
