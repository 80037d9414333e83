//! Tile catalog: the closed set of tile types and their gameplay properties.
//!
//! Every property lives in a single table indexed by the tag's ordinal, so
//! adding a tag means adding exactly one row.

use serde::{Deserialize, Serialize};

/// Terrain or feature occupying one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileTag {
    /// Nothing here; also what out-of-bounds reads return.
    Empty,
    /// Plain floor.
    Floor,
    /// Solid wall.
    Wall,
    /// Water, impassable on foot.
    Water,
    /// A door. Always walkable and always sight-blocking; doors have no
    /// open/closed state yet.
    Door,
    /// Grass.
    Grass,
    /// Stone.
    Stone,
    /// Wooden flooring.
    Wood,
    /// Difficult terrain, double movement cost.
    Difficult,
}

impl TileTag {
    /// Number of tile tags.
    pub const COUNT: usize = 9;

    /// Every tag, in ordinal order.
    pub const ALL: [TileTag; Self::COUNT] = [
        TileTag::Empty,
        TileTag::Floor,
        TileTag::Wall,
        TileTag::Water,
        TileTag::Door,
        TileTag::Grass,
        TileTag::Stone,
        TileTag::Wood,
        TileTag::Difficult,
    ];

    /// Returns the full property row for this tag.
    #[must_use]
    pub const fn properties(self) -> TileProperties {
        TILE_CATALOG[self as usize]
    }

    /// Whether a creature can stand on this tile.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        self.properties().walkable
    }

    /// Movement points needed to enter this tile, or `None` if it cannot be
    /// entered at all.
    #[must_use]
    pub const fn movement_cost(self) -> Option<u32> {
        self.properties().movement_cost
    }

    /// Whether this tile stops line of sight.
    #[must_use]
    pub const fn blocks_line_of_sight(self) -> bool {
        self.properties().blocks_line_of_sight
    }
}

/// Gameplay properties of a tile tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileProperties {
    /// Whether a creature can stand on the tile.
    pub walkable: bool,
    /// Whether the tile stops line of sight.
    pub blocks_line_of_sight: bool,
    /// Cost to enter; `None` means impassable.
    pub movement_cost: Option<u32>,
}

impl TileProperties {
    const fn passable(movement_cost: u32, blocks_line_of_sight: bool) -> Self {
        Self {
            walkable: true,
            blocks_line_of_sight,
            movement_cost: Some(movement_cost),
        }
    }

    const fn impassable(blocks_line_of_sight: bool) -> Self {
        Self {
            walkable: false,
            blocks_line_of_sight,
            movement_cost: None,
        }
    }
}

// Row order must match the `TileTag` discriminants.
const TILE_CATALOG: [TileProperties; TileTag::COUNT] = [
    TileProperties::impassable(false), // Empty
    TileProperties::passable(1, false), // Floor
    TileProperties::impassable(true),  // Wall
    TileProperties::impassable(false), // Water
    TileProperties::passable(1, true), // Door
    TileProperties::passable(1, false), // Grass
    TileProperties::passable(1, false), // Stone
    TileProperties::passable(1, false), // Wood
    TileProperties::passable(2, false), // Difficult
];
