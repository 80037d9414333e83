//! Commands for the campaign context.

use std::fmt::Debug;

use tabletop_core::command::Command;
use tabletop_map::domain::{Position, TileTag};
use uuid::Uuid;

use super::scene::SceneKind;
use super::session::SessionId;

/// Command to create a campaign.
#[derive(Debug, Clone)]
pub struct CreateCampaign {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Campaign name.
    pub name: String,
    /// Username of the owning game master.
    pub dm_username: String,
    /// Optional description.
    pub description: Option<String>,
}

impl Command for CreateCampaign {
    fn command_type(&self) -> &'static str {
        "campaign.create_campaign"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to add a scene to a campaign.
#[derive(Debug, Clone)]
pub struct AddScene {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// Scene name.
    pub name: String,
    /// Kind of play.
    pub kind: SceneKind,
    /// Free-text description.
    pub description: String,
}

impl Command for AddScene {
    fn command_type(&self) -> &'static str {
        "campaign.add_scene"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to bind a character to a player session.
#[derive(Debug, Clone)]
pub struct AssignCharacter<C> {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// Username of the player.
    pub player_username: String,
    /// The player's session.
    pub session_id: SessionId,
    /// The character payload.
    pub character: C,
}

impl<C: Send + Sync + Debug> Command for AssignCharacter<C> {
    fn command_type(&self) -> &'static str {
        "campaign.assign_character"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to drop a player session's character binding.
#[derive(Debug, Clone)]
pub struct RemovePlayer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The player's session.
    pub session_id: SessionId,
}

impl Command for RemovePlayer {
    fn command_type(&self) -> &'static str {
        "campaign.remove_player"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to place a character in a scene.
#[derive(Debug, Clone)]
pub struct EnterScene {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The scene identifier.
    pub scene_id: Uuid,
    /// The character entering.
    pub character_id: String,
}

impl Command for EnterScene {
    fn command_type(&self) -> &'static str {
        "campaign.enter_scene"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take a character out of a scene.
#[derive(Debug, Clone)]
pub struct LeaveScene {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The scene identifier.
    pub scene_id: Uuid,
    /// The character leaving.
    pub character_id: String,
}

impl Command for LeaveScene {
    fn command_type(&self) -> &'static str {
        "campaign.leave_scene"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to write one tile of a scene's map.
#[derive(Debug, Clone)]
pub struct PaintTile {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The scene identifier.
    pub scene_id: Uuid,
    /// Cell to paint.
    pub position: Position,
    /// New tile.
    pub tile: TileTag,
}

impl Command for PaintTile {
    fn command_type(&self) -> &'static str {
        "map.paint_tile"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to resize a scene's map.
#[derive(Debug, Clone)]
pub struct ResizeMap {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The scene identifier.
    pub scene_id: Uuid,
    /// New width.
    pub width: u32,
    /// New height.
    pub height: u32,
}

impl Command for ResizeMap {
    fn command_type(&self) -> &'static str {
        "map.resize"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to set every tile of a scene's map.
#[derive(Debug, Clone)]
pub struct FillMap {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The scene identifier.
    pub scene_id: Uuid,
    /// Tile to fill with.
    pub tile: TileTag,
}

impl Command for FillMap {
    fn command_type(&self) -> &'static str {
        "map.fill"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to reset a scene's map to floor.
#[derive(Debug, Clone)]
pub struct ClearMap {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The campaign identifier.
    pub campaign_id: Uuid,
    /// The scene identifier.
    pub scene_id: Uuid,
}

impl Command for ClearMap {
    fn command_type(&self) -> &'static str {
        "map.clear"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
