//! The campaign aggregate.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabletop_core::clock::Clock;
use tabletop_core::rng::DeterministicRng;
use tracing::debug;
use uuid::Uuid;

use super::assignment::{AssignmentOutcome, PlayerCharacterAssignment};
use super::invite_code::InviteCode;
use super::scene::Scene;
use super::session::SessionId;

/// Top-level aggregate: the scenes of a campaign and which character each
/// connected player session controls.
///
/// Assignments are keyed by [`SessionId`], so a session can never hold more
/// than one character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "C: Serialize", deserialize = "C: Deserialize<'de>"))]
pub struct Campaign<C> {
    /// Campaign identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Username of the game master who owns the campaign.
    pub dm_username: String,
    scenes: Vec<Scene>,
    #[serde(with = "assignment_list")]
    assignments: HashMap<SessionId, PlayerCharacterAssignment<C>>,
    invite_code: InviteCode,
    created_at: DateTime<Utc>,
}

impl<C> Campaign<C> {
    /// Creates an empty campaign. The id is drawn from `rng` first, then the
    /// invite code.
    pub fn new(
        name: impl Into<String>,
        dm_username: impl Into<String>,
        description: Option<String>,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Self {
        let id = rng.next_uuid();
        let invite_code = InviteCode::generate(rng);
        Self {
            id,
            name: name.into(),
            description: description.unwrap_or_default(),
            dm_username: dm_username.into(),
            scenes: Vec::new(),
            assignments: HashMap::new(),
            invite_code,
            created_at: clock.now(),
        }
    }

    /// Code players use to join.
    #[must_use]
    pub fn invite_code(&self) -> &InviteCode {
        &self.invite_code
    }

    /// Draws a new invite code. Only the registry calls this, while it still
    /// owns the campaign and before the code is indexed.
    pub(crate) fn regenerate_invite_code(&mut self, rng: &mut dyn DeterministicRng) {
        self.invite_code = InviteCode::generate(rng);
    }

    /// When the campaign was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends a scene and returns its id.
    pub fn add_scene(&mut self, scene: Scene) -> Uuid {
        let id = scene.id;
        self.scenes.push(scene);
        id
    }

    /// Scenes in the order they were added.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// Looks up a scene by id.
    #[must_use]
    pub fn scene(&self, scene_id: Uuid) -> Option<&Scene> {
        self.scenes.iter().find(|scene| scene.id == scene_id)
    }

    /// Looks up a scene by id for mutation.
    pub fn scene_mut(&mut self, scene_id: Uuid) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|scene| scene.id == scene_id)
    }

    /// Binds `character` to `session_id`.
    ///
    /// If the session already has an assignment, its username and character
    /// are overwritten in place and `assigned_at` is kept; otherwise a new
    /// assignment is added.
    pub fn assign_character_to_player(
        &mut self,
        player_username: impl Into<String>,
        session_id: SessionId,
        character: C,
        clock: &dyn Clock,
    ) -> AssignmentOutcome {
        let now = clock.now();
        let outcome = match self.assignments.entry(session_id) {
            Entry::Occupied(mut entry) => {
                let assignment = entry.get_mut();
                assignment.player_username = player_username.into();
                assignment.character = character;
                assignment.updated_at = now;
                AssignmentOutcome::Updated
            }
            Entry::Vacant(entry) => {
                entry.insert(PlayerCharacterAssignment {
                    player_username: player_username.into(),
                    session_id,
                    character,
                    assigned_at: now,
                    updated_at: now,
                });
                AssignmentOutcome::Created
            }
        };
        debug!(campaign_id = %self.id, %session_id, ?outcome, "assigned character");
        outcome
    }

    /// The character bound to `session_id`, or `None` if the session has no
    /// assignment.
    #[must_use]
    pub fn character_for_player(&self, session_id: SessionId) -> Option<&C> {
        self.assignments
            .get(&session_id)
            .map(|assignment| &assignment.character)
    }

    /// The full assignment for `session_id`.
    #[must_use]
    pub fn assignment(&self, session_id: SessionId) -> Option<&PlayerCharacterAssignment<C>> {
        self.assignments.get(&session_id)
    }

    /// All assignments, in no particular order.
    pub fn assignments(&self) -> impl Iterator<Item = &PlayerCharacterAssignment<C>> + '_ {
        self.assignments.values()
    }

    /// Number of sessions with a character.
    #[must_use]
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Drops the assignment for `session_id`. Returns whether one existed.
    pub fn remove_player(&mut self, session_id: SessionId) -> bool {
        let removed = self.assignments.remove(&session_id).is_some();
        if removed {
            debug!(campaign_id = %self.id, %session_id, "removed player");
        }
        removed
    }
}

/// Serializes assignments as a list sorted by session, rejecting duplicate
/// sessions on the way back in.
mod assignment_list {
    use std::collections::HashMap;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{PlayerCharacterAssignment, SessionId};

    pub(super) fn serialize<S, C>(
        assignments: &HashMap<SessionId, PlayerCharacterAssignment<C>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        C: Serialize,
    {
        let mut list: Vec<&PlayerCharacterAssignment<C>> = assignments.values().collect();
        list.sort_by_key(|assignment| assignment.session_id);
        serializer.collect_seq(list)
    }

    pub(super) fn deserialize<'de, D, C>(
        deserializer: D,
    ) -> Result<HashMap<SessionId, PlayerCharacterAssignment<C>>, D::Error>
    where
        D: Deserializer<'de>,
        C: Deserialize<'de>,
    {
        let list = Vec::<PlayerCharacterAssignment<C>>::deserialize(deserializer)?;
        let mut assignments = HashMap::with_capacity(list.len());
        for assignment in list {
            let session_id = assignment.session_id;
            if assignments.insert(session_id, assignment).is_some() {
                return Err(D::Error::custom(format!(
                    "duplicate assignment for session {session_id}"
                )));
            }
        }
        Ok(assignments)
    }
}
