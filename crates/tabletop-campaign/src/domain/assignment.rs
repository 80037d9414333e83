//! Player-to-character bindings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::SessionId;

/// Binds one player session to the character it controls. `C` is the
/// character payload, opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCharacterAssignment<C> {
    /// Username of the player.
    pub player_username: String,
    /// Session the character is bound to; the assignment's key.
    pub session_id: SessionId,
    /// The character.
    pub character: C,
    /// When the session first received a character.
    pub assigned_at: DateTime<Utc>,
    /// When the assignment was last overwritten.
    pub updated_at: DateTime<Utc>,
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The session had no assignment; one was added.
    Created,
    /// The session's existing assignment was overwritten in place.
    Updated,
}
