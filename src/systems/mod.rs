//! Systems that act on bodies each step.

pub mod constraints;
pub mod narrow_phase;
pub mod response;

pub use constraints::{render_constraints, BreakCallback, ConstraintSolver, ConstraintStats, DrawSurface};
pub use narrow_phase::detect;
pub use response::{resolve_collision, ResponseConfig, ResponseOutcome};
