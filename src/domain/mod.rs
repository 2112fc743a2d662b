//! Data model: bodies, materials, constraints, collision results and events.

pub mod body;
pub mod collision;
pub mod constraint;
pub mod material;
pub mod store;

pub use body::{Body, BodyId, Shape};
pub use collision::{CollisionEvent, CollisionKind, CollisionResult};
pub use constraint::{
    Constraint, ConstraintConfig, ConstraintDefaults, ConstraintId, ConstraintKind, ConstraintState,
    ConstraintStatus, KindDefaults, RenderStyle,
};
pub use material::Material;
pub use store::BodyStore;
