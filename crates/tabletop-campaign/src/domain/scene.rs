//! Scenes: playable locations within a campaign.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabletop_core::clock::Clock;
use tabletop_core::error::DomainError;
use tabletop_core::rng::DeterministicRng;
use tabletop_map::domain::{Grid, TileTag};
use uuid::Uuid;

/// Status every scene starts with.
pub const SCENE_STATUS_NOT_STARTED: &str = "Not Started";

/// What kind of play a scene is set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneKind {
    /// Dialogue and character interaction.
    Roleplay,
    /// Tactical combat on the grid.
    Combat,
    /// Free movement and discovery.
    Exploration,
}

/// A location within a campaign, pairing narrative metadata with the grid
/// used for tactical play and the characters currently present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Kind of play.
    pub kind: SceneKind,
    /// Free-text description.
    pub description: String,
    last_played_at: Option<DateTime<Utc>>,
    status: String,
    grid: Grid,
    active_characters: BTreeSet<String>,
}

impl Scene {
    /// Creates a scene with a fresh id and a default-sized grid.
    pub fn new(
        name: impl Into<String>,
        kind: SceneKind,
        description: impl Into<String>,
        rng: &mut dyn DeterministicRng,
        clock: &dyn Clock,
    ) -> Self {
        Self::with_grid(name, kind, description, Grid::with_default_size(clock), rng)
    }

    /// Creates a scene around an already built grid.
    pub fn with_grid(
        name: impl Into<String>,
        kind: SceneKind,
        description: impl Into<String>,
        grid: Grid,
        rng: &mut dyn DeterministicRng,
    ) -> Self {
        Self {
            id: rng.next_uuid(),
            name: name.into(),
            kind,
            description: description.into(),
            last_played_at: None,
            status: SCENE_STATUS_NOT_STARTED.to_owned(),
            grid,
            active_characters: BTreeSet::new(),
        }
    }

    /// Current status label.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Replaces the status label.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// When the scene was last played, if ever.
    #[must_use]
    pub fn last_played_at(&self) -> Option<DateTime<Utc>> {
        self.last_played_at
    }

    /// Records that the scene is being played now.
    pub fn mark_played(&mut self, clock: &dyn Clock) {
        self.last_played_at = Some(clock.now());
    }

    /// Adds a character to the scene. Returns `false` if it was already
    /// present, in which case nothing changes.
    pub fn add_character(&mut self, character_id: impl Into<String>) -> bool {
        self.active_characters.insert(character_id.into())
    }

    /// Removes a character from the scene. Returns `false` if it was not
    /// present.
    pub fn remove_character(&mut self, character_id: &str) -> bool {
        self.active_characters.remove(character_id)
    }

    /// Whether the character is currently in the scene.
    #[must_use]
    pub fn has_character(&self, character_id: &str) -> bool {
        self.active_characters.contains(character_id)
    }

    /// Characters currently in the scene, in sorted order.
    pub fn active_characters(&self) -> impl Iterator<Item = &str> + '_ {
        self.active_characters.iter().map(String::as_str)
    }

    /// Number of characters currently in the scene.
    #[must_use]
    pub fn active_character_count(&self) -> usize {
        self.active_characters.len()
    }

    /// The scene's grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access to the scene's grid.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// See [`Grid::tile`].
    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> TileTag {
        self.grid.tile(x, y)
    }

    /// See [`Grid::set_tile`].
    pub fn set_tile(&mut self, x: i32, y: i32, tag: TileTag, clock: &dyn Clock) -> bool {
        self.grid.set_tile(x, y, tag, clock)
    }

    /// See [`Grid::resize`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGridDimensions` for rejected dimensions.
    pub fn resize(&mut self, width: u32, height: u32, clock: &dyn Clock) -> Result<(), DomainError> {
        self.grid.resize(width, height, clock)
    }

    /// See [`Grid::fill`].
    pub fn fill(&mut self, tag: TileTag, clock: &dyn Clock) {
        self.grid.fill(tag, clock);
    }

    /// See [`Grid::clear`].
    pub fn clear(&mut self, clock: &dyn Clock) {
        self.grid.clear(clock);
    }

    /// See [`Grid::is_in_bounds`].
    #[must_use]
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.is_in_bounds(x, y)
    }

    /// See [`Grid::is_walkable`].
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.grid.is_walkable(x, y)
    }
}
