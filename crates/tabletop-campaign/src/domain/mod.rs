//! Domain model for campaigns.

pub mod assignment;
pub mod campaign;
pub mod commands;
pub mod invite_code;
pub mod scene;
pub mod session;

pub use assignment::{AssignmentOutcome, PlayerCharacterAssignment};
pub use campaign::Campaign;
pub use invite_code::InviteCode;
pub use scene::{Scene, SceneKind};
pub use session::SessionId;
