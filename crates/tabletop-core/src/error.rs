//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

/// Top-level domain error type shared by the map and campaign contexts.
///
/// Out-of-range grid coordinates are deliberately absent: reads return the
/// empty tile and writes are ignored, so they never surface as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Grid dimensions outside the accepted range.
    #[error("invalid grid dimensions {width}x{height}: {reason}")]
    InvalidGridDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// A campaign was not found.
    #[error("campaign not found: {0}")]
    CampaignNotFound(Uuid),

    /// A scene was not found in its campaign.
    #[error("scene not found: {0}")]
    SceneNotFound(Uuid),

    /// No character is assigned to the given player session.
    #[error("no character assigned to session {0}")]
    AssignmentNotFound(u64),

    /// No campaign uses the given invite code.
    #[error("invite code not found: {0}")]
    InviteCodeNotFound(String),

    /// Every generated invite code collided with an existing one.
    #[error("could not generate a unique invite code after {attempts} attempts")]
    InviteCodeExhausted {
        /// Number of codes drawn before giving up.
        attempts: u32,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure error, such as a poisoned lock.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
