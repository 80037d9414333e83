//! Command handlers for the campaign context.
//!
//! Each handler validates its command, locks the target campaign through the
//! [`CampaignRegistry`], and applies the change to the domain model.

use tabletop_core::clock::Clock;
use tabletop_core::command::Command;
use tabletop_core::error::DomainError;
use tabletop_core::rng::DeterministicRng;
use tabletop_map::domain::{Grid, Position};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::registry::CampaignRegistry;
use crate::domain::assignment::AssignmentOutcome;
use crate::domain::campaign::Campaign;
use crate::domain::commands::{
    AddScene, AssignCharacter, ClearMap, CreateCampaign, EnterScene, FillMap, LeaveScene,
    PaintTile, RemovePlayer, ResizeMap,
};
use crate::domain::invite_code::InviteCode;
use crate::domain::scene::Scene;

/// Result of creating a campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCreated {
    /// The new campaign's id.
    pub campaign_id: Uuid,
    /// The invite code that ended up registered, after any redraws.
    pub invite_code: InviteCode,
}

fn require_non_empty(value: &str, what: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Handles the `CreateCampaign` command: builds the campaign and registers
/// it under a unique invite code.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the name or game master is blank,
/// and whatever [`CampaignRegistry::insert`] returns.
#[instrument(skip_all, fields(command_type = command.command_type()))]
pub fn handle_create_campaign<C>(
    command: &CreateCampaign,
    registry: &CampaignRegistry<C>,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> Result<CampaignCreated, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling create_campaign command");
    require_non_empty(&command.name, "campaign name")?;
    require_non_empty(&command.dm_username, "dm username")?;

    let campaign = Campaign::new(
        command.name.trim(),
        command.dm_username.trim(),
        command.description.clone(),
        rng,
        clock,
    );
    let campaign_id = campaign.id;
    registry.insert(campaign, rng)?;
    let invite_code = registry.read_campaign(campaign_id, |c| c.invite_code().clone())?;

    info!(%campaign_id, %invite_code, "campaign created");
    Ok(CampaignCreated {
        campaign_id,
        invite_code,
    })
}

/// Handles the `AddScene` command: allocates a grid of the configured
/// default size and appends the scene to the campaign.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank scene name and
/// `DomainError::CampaignNotFound` for an unknown campaign.
#[instrument(skip_all, fields(campaign_id = %command.campaign_id))]
pub fn handle_add_scene<C>(
    command: &AddScene,
    registry: &CampaignRegistry<C>,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> Result<Uuid, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling add_scene command");
    require_non_empty(&command.name, "scene name")?;

    let config = registry.config();
    let grid = Grid::new(config.default_grid_width, config.default_grid_height, clock)?;
    let scene = Scene::with_grid(
        command.name.trim(),
        command.kind,
        command.description.clone(),
        grid,
        rng,
    );
    let scene_id = registry.with_campaign(command.campaign_id, |campaign| campaign.add_scene(scene))?;

    debug!(%scene_id, "scene added");
    Ok(scene_id)
}

/// Handles the `AssignCharacter` command: upserts the session's binding.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank player username and
/// `DomainError::CampaignNotFound` for an unknown campaign.
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, session_id = %command.session_id))]
pub fn handle_assign_character<C: Clone>(
    command: &AssignCharacter<C>,
    registry: &CampaignRegistry<C>,
    clock: &dyn Clock,
) -> Result<AssignmentOutcome, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling assign_character command");
    require_non_empty(&command.player_username, "player username")?;

    let outcome = registry.with_campaign(command.campaign_id, |campaign| {
        campaign.assign_character_to_player(
            command.player_username.trim(),
            command.session_id,
            command.character.clone(),
            clock,
        )
    })?;

    debug!(?outcome, "character assigned");
    Ok(outcome)
}

/// Handles the `RemovePlayer` command. Returns whether the session had an
/// assignment.
///
/// # Errors
///
/// Returns `DomainError::CampaignNotFound` for an unknown campaign.
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, session_id = %command.session_id))]
pub fn handle_remove_player<C>(
    command: &RemovePlayer,
    registry: &CampaignRegistry<C>,
) -> Result<bool, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling remove_player command");
    registry.with_campaign(command.campaign_id, |campaign| {
        campaign.remove_player(command.session_id)
    })
}

/// Handles the `EnterScene` command. Returns `false` if the character was
/// already present.
///
/// # Errors
///
/// Returns `DomainError::Validation` for a blank character id, and
/// `DomainError::CampaignNotFound` or `DomainError::SceneNotFound` when the
/// target does not exist.
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, scene_id = %command.scene_id))]
pub fn handle_enter_scene<C>(
    command: &EnterScene,
    registry: &CampaignRegistry<C>,
) -> Result<bool, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling enter_scene command");
    require_non_empty(&command.character_id, "character id")?;
    registry.with_scene(command.campaign_id, command.scene_id, |scene| {
        scene.add_character(command.character_id.trim())
    })
}

/// Handles the `LeaveScene` command. Returns `false` if the character was
/// not present.
///
/// # Errors
///
/// Same as [`handle_enter_scene`].
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, scene_id = %command.scene_id))]
pub fn handle_leave_scene<C>(
    command: &LeaveScene,
    registry: &CampaignRegistry<C>,
) -> Result<bool, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling leave_scene command");
    require_non_empty(&command.character_id, "character id")?;
    registry.with_scene(command.campaign_id, command.scene_id, |scene| {
        scene.remove_character(command.character_id.trim())
    })
}

/// Handles the `PaintTile` command. Returns `false` if the position was
/// outside the map and nothing changed.
///
/// # Errors
///
/// Returns `DomainError::CampaignNotFound` or `DomainError::SceneNotFound`
/// when the target does not exist.
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, scene_id = %command.scene_id))]
pub fn handle_paint_tile<C>(
    command: &PaintTile,
    registry: &CampaignRegistry<C>,
    clock: &dyn Clock,
) -> Result<bool, DomainError> {
    info!(correlation_id = %command.correlation_id, "handling paint_tile command");
    let Position { x, y } = command.position;
    registry.with_scene(command.campaign_id, command.scene_id, |scene| {
        scene.set_tile(x, y, command.tile, clock)
    })
}

/// Handles the `ResizeMap` command.
///
/// # Errors
///
/// Returns `DomainError::InvalidGridDimensions` for unusable dimensions, in
/// which case the map is left untouched, and the lookup errors of
/// [`handle_paint_tile`].
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, scene_id = %command.scene_id))]
pub fn handle_resize_map<C>(
    command: &ResizeMap,
    registry: &CampaignRegistry<C>,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    info!(correlation_id = %command.correlation_id, "handling resize_map command");
    registry.with_scene(command.campaign_id, command.scene_id, |scene| {
        scene.resize(command.width, command.height, clock)
    })?
}

/// Handles the `FillMap` command.
///
/// # Errors
///
/// Returns the lookup errors of [`handle_paint_tile`].
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, scene_id = %command.scene_id))]
pub fn handle_fill_map<C>(
    command: &FillMap,
    registry: &CampaignRegistry<C>,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    info!(correlation_id = %command.correlation_id, "handling fill_map command");
    registry.with_scene(command.campaign_id, command.scene_id, |scene| {
        scene.fill(command.tile, clock);
    })
}

/// Handles the `ClearMap` command.
///
/// # Errors
///
/// Returns the lookup errors of [`handle_paint_tile`].
#[instrument(skip_all, fields(campaign_id = %command.campaign_id, scene_id = %command.scene_id))]
pub fn handle_clear_map<C>(
    command: &ClearMap,
    registry: &CampaignRegistry<C>,
    clock: &dyn Clock,
) -> Result<(), DomainError> {
    info!(correlation_id = %command.correlation_id, "handling clear_map command");
    registry.with_scene(command.campaign_id, command.scene_id, |scene| scene.clear(clock))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::{Value, json};
    use tabletop_core::config::TabletopConfig;
    use tabletop_core::rng::SeededRng;
    use tabletop_map::domain::TileTag;
    use tabletop_test_support::{FixedClock, init_test_tracing};

    use super::*;
    use crate::domain::scene::SceneKind;
    use crate::domain::session::SessionId;

    fn fixed_clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    fn registry() -> CampaignRegistry<Value> {
        CampaignRegistry::new(TabletopConfig {
            default_grid_width: 4,
            default_grid_height: 3,
            ..TabletopConfig::default()
        })
        .unwrap()
    }

    fn create_campaign(
        registry: &CampaignRegistry<Value>,
        rng: &mut SeededRng,
        clock: &FixedClock,
    ) -> Uuid {
        let command = CreateCampaign {
            correlation_id: Uuid::nil(),
            name: "Curse of Strahd".into(),
            dm_username: "dm".into(),
            description: None,
        };
        handle_create_campaign(&command, registry, rng, clock)
            .unwrap()
            .campaign_id
    }

    fn add_scene(
        registry: &CampaignRegistry<Value>,
        campaign_id: Uuid,
        rng: &mut SeededRng,
        clock: &FixedClock,
    ) -> Uuid {
        let command = AddScene {
            correlation_id: Uuid::nil(),
            campaign_id,
            name: "Village of Barovia".into(),
            kind: SceneKind::Exploration,
            description: "Fog rolls in".into(),
        };
        handle_add_scene(&command, registry, rng, clock).unwrap()
    }

    #[test]
    fn test_handle_create_campaign_registers_campaign() {
        // Arrange
        init_test_tracing();
        let registry = registry();
        let mut rng = SeededRng::from_seed(1);
        let clock = fixed_clock();
        let command = CreateCampaign {
            correlation_id: Uuid::nil(),
            name: "  Curse of Strahd  ".into(),
            dm_username: "dm".into(),
            description: Some("Gothic horror".into()),
        };

        // Act
        let created = handle_create_campaign(&command, &registry, &mut rng, &clock).unwrap();

        // Assert
        assert_eq!(registry.len().unwrap(), 1);
        let (name, code) = registry
            .read_campaign(created.campaign_id, |c| {
                (c.name.clone(), c.invite_code().clone())
            })
            .unwrap();
        assert_eq!(name, "Curse of Strahd");
        assert_eq!(code, created.invite_code);
        assert!(registry.find_by_invite_code(&created.invite_code).is_ok());
    }

    #[test]
    fn test_handle_create_campaign_rejects_blank_name() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(1);
        let command = CreateCampaign {
            correlation_id: Uuid::nil(),
            name: "   ".into(),
            dm_username: "dm".into(),
            description: None,
        };

        // Act
        let result = handle_create_campaign(&command, &registry, &mut rng, &fixed_clock());

        // Assert
        assert_eq!(
            result.err(),
            Some(DomainError::Validation("campaign name must not be empty".into()))
        );
        assert!(registry.is_empty().unwrap());
    }

    #[test]
    fn test_handle_create_campaign_rejects_blank_dm() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(1);
        let command = CreateCampaign {
            correlation_id: Uuid::nil(),
            name: "Curse of Strahd".into(),
            dm_username: String::new(),
            description: None,
        };

        // Act
        let result = handle_create_campaign(&command, &registry, &mut rng, &fixed_clock());

        // Assert
        assert_eq!(
            result.err(),
            Some(DomainError::Validation("dm username must not be empty".into()))
        );
    }

    #[test]
    fn test_handle_add_scene_uses_configured_grid_size() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(2);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);

        // Act
        let scene_id = add_scene(&registry, campaign_id, &mut rng, &clock);

        // Assert
        let (width, height, count) = registry
            .read_campaign(campaign_id, |c| {
                let grid = c.scene(scene_id).unwrap().grid();
                (grid.width(), grid.height(), c.scenes().len())
            })
            .unwrap();
        assert_eq!((width, height), (4, 3));
        assert_eq!(count, 1);
    }

    #[test]
    fn test_handle_add_scene_returns_not_found_for_unknown_campaign() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(2);
        let missing = Uuid::from_u128(9);
        let command = AddScene {
            correlation_id: Uuid::nil(),
            campaign_id: missing,
            name: "Tavern".into(),
            kind: SceneKind::Roleplay,
            description: String::new(),
        };

        // Act
        let result = handle_add_scene(&command, &registry, &mut rng, &fixed_clock());

        // Assert
        assert_eq!(result.err(), Some(DomainError::CampaignNotFound(missing)));
    }

    #[test]
    fn test_handle_assign_character_creates_then_updates() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(3);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let mut command = AssignCharacter {
            correlation_id: Uuid::nil(),
            campaign_id,
            player_username: "alice".into(),
            session_id: SessionId(42),
            character: json!({"name": "Ireena"}),
        };

        // Act
        let first = handle_assign_character(&command, &registry, &clock).unwrap();
        command.character = json!({"name": "Ismark"});
        let second = handle_assign_character(&command, &registry, &clock).unwrap();

        // Assert
        assert_eq!(first, AssignmentOutcome::Created);
        assert_eq!(second, AssignmentOutcome::Updated);
        let (count, character) = registry
            .read_campaign(campaign_id, |c| {
                (c.assignment_count(), c.character_for_player(SessionId(42)).cloned())
            })
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(character, Some(json!({"name": "Ismark"})));
    }

    #[test]
    fn test_handle_remove_player_reports_whether_removed() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(4);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let assign = AssignCharacter {
            correlation_id: Uuid::nil(),
            campaign_id,
            player_username: "bob".into(),
            session_id: SessionId(7),
            character: json!({"name": "Van Richten"}),
        };
        handle_assign_character(&assign, &registry, &clock).unwrap();
        let remove = RemovePlayer {
            correlation_id: Uuid::nil(),
            campaign_id,
            session_id: SessionId(7),
        };

        // Act
        let first = handle_remove_player(&remove, &registry).unwrap();
        let second = handle_remove_player(&remove, &registry).unwrap();

        // Assert
        assert!(first);
        assert!(!second);
    }

    #[test]
    fn test_handle_enter_and_leave_scene() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(5);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let scene_id = add_scene(&registry, campaign_id, &mut rng, &clock);
        let enter = EnterScene {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id,
            character_id: "ireena".into(),
        };
        let leave = LeaveScene {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id,
            character_id: "ireena".into(),
        };

        // Act / Assert
        assert!(handle_enter_scene(&enter, &registry).unwrap());
        assert!(!handle_enter_scene(&enter, &registry).unwrap());
        assert!(handle_leave_scene(&leave, &registry).unwrap());
        assert!(!handle_leave_scene(&leave, &registry).unwrap());
    }

    #[test]
    fn test_handle_enter_scene_returns_scene_not_found() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(5);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let missing = Uuid::from_u128(77);
        let enter = EnterScene {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id: missing,
            character_id: "ireena".into(),
        };

        // Act
        let result = handle_enter_scene(&enter, &registry);

        // Assert
        assert_eq!(result.err(), Some(DomainError::SceneNotFound(missing)));
    }

    #[test]
    fn test_handle_paint_tile_ignores_out_of_bounds() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(6);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let scene_id = add_scene(&registry, campaign_id, &mut rng, &clock);
        let mut command = PaintTile {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id,
            position: Position::new(1, 2),
            tile: TileTag::Wall,
        };

        // Act
        let inside = handle_paint_tile(&command, &registry, &clock).unwrap();
        command.position = Position::new(4, 0);
        let outside = handle_paint_tile(&command, &registry, &clock).unwrap();

        // Assert
        assert!(inside);
        assert!(!outside);
        let tile = registry
            .read_campaign(campaign_id, |c| c.scene(scene_id).unwrap().tile(1, 2))
            .unwrap();
        assert_eq!(tile, TileTag::Wall);
    }

    #[test]
    fn test_handle_resize_map_rejects_zero_dimension() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(7);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let scene_id = add_scene(&registry, campaign_id, &mut rng, &clock);
        let command = ResizeMap {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id,
            width: 0,
            height: 5,
        };

        // Act
        let result = handle_resize_map(&command, &registry, &clock);

        // Assert
        assert!(matches!(
            result,
            Err(DomainError::InvalidGridDimensions { width: 0, height: 5, .. })
        ));
        let size = registry
            .read_campaign(campaign_id, |c| {
                let grid = c.scene(scene_id).unwrap().grid();
                (grid.width(), grid.height())
            })
            .unwrap();
        assert_eq!(size, (4, 3));
    }

    #[test]
    fn test_handle_fill_then_clear_map() {
        // Arrange
        let registry = registry();
        let mut rng = SeededRng::from_seed(8);
        let clock = fixed_clock();
        let campaign_id = create_campaign(&registry, &mut rng, &clock);
        let scene_id = add_scene(&registry, campaign_id, &mut rng, &clock);
        let fill = FillMap {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id,
            tile: TileTag::Water,
        };
        let clear = ClearMap {
            correlation_id: Uuid::nil(),
            campaign_id,
            scene_id,
        };

        // Act
        handle_fill_map(&fill, &registry, &clock).unwrap();
        let filled = registry
            .read_campaign(campaign_id, |c| c.scene(scene_id).unwrap().tile(3, 2))
            .unwrap();
        handle_clear_map(&clear, &registry, &clock).unwrap();
        let cleared = registry
            .read_campaign(campaign_id, |c| c.scene(scene_id).unwrap().tile(3, 2))
            .unwrap();

        // Assert
        assert_eq!(filled, TileTag::Water);
        assert_eq!(cleared, TileTag::Floor);
    }
}
