//! Query handlers for the campaign context.
//!
//! Queries take a read lock on one campaign and copy what they need into
//! serializable view DTOs, so no lock outlives the call.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tabletop_core::error::DomainError;
use tabletop_map::domain::{Grid, TileTag};
use uuid::Uuid;

use crate::application::registry::CampaignRegistry;
use crate::domain::campaign::Campaign;
use crate::domain::invite_code::InviteCode;
use crate::domain::scene::{Scene, SceneKind};
use crate::domain::session::SessionId;

/// Read-only view of a campaign.
#[derive(Debug, Serialize)]
pub struct CampaignView {
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Owning game master.
    pub dm_username: String,
    /// Code players join with.
    pub invite_code: String,
    /// Creation time, RFC 3339.
    pub created_at: String,
    /// Scenes in insertion order.
    pub scenes: Vec<SceneSummary>,
    /// Player bindings ordered by session.
    pub players: Vec<PlayerView>,
}

/// One scene as listed in a [`CampaignView`].
#[derive(Debug, Serialize)]
pub struct SceneSummary {
    /// The scene identifier.
    pub scene_id: Uuid,
    /// Display name.
    pub name: String,
    /// Kind of play.
    pub kind: SceneKind,
    /// Status label.
    pub status: String,
    /// Last time the scene was played, RFC 3339.
    pub last_played_at: Option<String>,
    /// Number of characters currently in the scene.
    pub active_character_count: usize,
}

/// A player binding without its character payload.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    /// Username of the player.
    pub player_username: String,
    /// The player's session.
    pub session_id: u64,
    /// When the session first received a character, RFC 3339.
    pub assigned_at: String,
    /// When the binding was last overwritten, RFC 3339.
    pub updated_at: String,
}

/// Full view of one scene, map included.
#[derive(Debug, Serialize)]
pub struct SceneView {
    /// The scene identifier.
    pub scene_id: Uuid,
    /// Display name.
    pub name: String,
    /// Kind of play.
    pub kind: SceneKind,
    /// Free-text description.
    pub description: String,
    /// Status label.
    pub status: String,
    /// Last time the scene was played, RFC 3339.
    pub last_played_at: Option<String>,
    /// Characters in the scene, sorted.
    pub active_characters: Vec<String>,
    /// The scene's map.
    pub grid: GridView,
}

/// A map as rows of tiles, top row first.
#[derive(Debug, Serialize)]
pub struct GridView {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
    /// `rows[y][x]` is the tile at `(x, y)`.
    pub rows: Vec<Vec<TileTag>>,
    /// Allocation time, RFC 3339.
    pub created_at: String,
    /// Last mutation time, RFC 3339.
    pub modified_at: String,
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn grid_view(grid: &Grid) -> GridView {
    GridView {
        width: grid.width(),
        height: grid.height(),
        rows: grid.rows().map(<[TileTag]>::to_vec).collect(),
        created_at: format_timestamp(grid.created_at()),
        modified_at: format_timestamp(grid.modified_at()),
    }
}

fn scene_summary(scene: &Scene) -> SceneSummary {
    SceneSummary {
        scene_id: scene.id,
        name: scene.name.clone(),
        kind: scene.kind,
        status: scene.status().to_owned(),
        last_played_at: scene.last_played_at().map(format_timestamp),
        active_character_count: scene.active_character_count(),
    }
}

fn scene_view(scene: &Scene) -> SceneView {
    SceneView {
        scene_id: scene.id,
        name: scene.name.clone(),
        kind: scene.kind,
        description: scene.description.clone(),
        status: scene.status().to_owned(),
        last_played_at: scene.last_played_at().map(format_timestamp),
        active_characters: scene.active_characters().map(str::to_owned).collect(),
        grid: grid_view(scene.grid()),
    }
}

fn campaign_view<C>(campaign: &Campaign<C>) -> CampaignView {
    let mut players: Vec<PlayerView> = campaign
        .assignments()
        .map(|assignment| PlayerView {
            player_username: assignment.player_username.clone(),
            session_id: assignment.session_id.0,
            assigned_at: format_timestamp(assignment.assigned_at),
            updated_at: format_timestamp(assignment.updated_at),
        })
        .collect();
    players.sort_unstable_by_key(|player| player.session_id);

    CampaignView {
        campaign_id: campaign.id,
        name: campaign.name.clone(),
        description: campaign.description.clone(),
        dm_username: campaign.dm_username.clone(),
        invite_code: campaign.invite_code().to_string(),
        created_at: format_timestamp(campaign.created_at()),
        scenes: campaign.scenes().iter().map(scene_summary).collect(),
        players,
    }
}

/// Retrieves a campaign by id.
///
/// # Errors
///
/// Returns `DomainError::CampaignNotFound` if no such campaign exists.
pub fn get_campaign_view<C>(
    campaign_id: Uuid,
    registry: &CampaignRegistry<C>,
) -> Result<CampaignView, DomainError> {
    registry.read_campaign(campaign_id, campaign_view)
}

/// Retrieves the campaign a player would join with `code`. The code is
/// matched case-insensitively and surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `DomainError::Validation` if `code` is not a well-formed invite
/// code and `DomainError::InviteCodeNotFound` if no campaign uses it.
pub fn get_campaign_view_by_invite_code<C>(
    code: &str,
    registry: &CampaignRegistry<C>,
) -> Result<CampaignView, DomainError> {
    let code: InviteCode = code.parse()?;
    let shared = registry.find_by_invite_code(&code)?;
    let campaign = shared.lock().map_err(|_| {
        DomainError::Infrastructure(format!("campaign for invite code {code} lock poisoned"))
    })?;
    Ok(campaign_view(&campaign))
}

/// Retrieves one scene with its map.
///
/// # Errors
///
/// Returns `DomainError::CampaignNotFound` or `DomainError::SceneNotFound`
/// when the target does not exist.
pub fn get_scene_view<C>(
    campaign_id: Uuid,
    scene_id: Uuid,
    registry: &CampaignRegistry<C>,
) -> Result<SceneView, DomainError> {
    registry.read_campaign(campaign_id, |campaign| {
        campaign
            .scene(scene_id)
            .map(scene_view)
            .ok_or(DomainError::SceneNotFound(scene_id))
    })?
}

/// Retrieves a copy of the character bound to `session_id`.
///
/// # Errors
///
/// Returns `DomainError::AssignmentNotFound` if the session has no
/// character, and `DomainError::CampaignNotFound` for an unknown campaign.
pub fn get_character_for_player<C: Clone>(
    campaign_id: Uuid,
    session_id: SessionId,
    registry: &CampaignRegistry<C>,
) -> Result<C, DomainError> {
    registry.read_campaign(campaign_id, |campaign| {
        campaign
            .character_for_player(session_id)
            .cloned()
            .ok_or(DomainError::AssignmentNotFound(session_id.0))
    })?
}
