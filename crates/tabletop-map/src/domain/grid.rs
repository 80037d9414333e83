//! Tile grids.
//!
//! A [`Grid`] stores its tiles row-major in one flat buffer
//! (`index = y * width + x`). The index arithmetic never leaves this module:
//! callers address cells by `(x, y)` and every access is bounds-checked.
//! Reads outside the rectangle return [`TileTag::Empty`] and writes outside
//! it are dropped, so neighbor scans never have to special-case the edges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabletop_core::clock::Clock;
use tabletop_core::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
pub use tabletop_core::config::MAX_GRID_DIMENSION;
use tabletop_core::error::DomainError;
use tracing::{debug, trace};

use super::position::Position;
use super::tile::TileTag;

/// A rectangular map of tile tags owned by one scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRecord")]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<TileTag>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl Grid {
    /// Creates a `width` x `height` grid with every cell set to Floor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGridDimensions` if either dimension is
    /// zero or exceeds [`MAX_GRID_DIMENSION`].
    pub fn new(width: u32, height: u32, clock: &dyn Clock) -> Result<Self, DomainError> {
        validate_dimensions(width, height)?;
        let now = clock.now();
        Ok(Self {
            width,
            height,
            tiles: vec![TileTag::Floor; cell_count(width, height)],
            created_at: now,
            modified_at: now,
        })
    }

    /// Creates a 15 x 15 all-Floor grid.
    #[must_use]
    pub fn with_default_size(clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            tiles: vec![TileTag::Floor; cell_count(DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT)],
            created_at: now,
            modified_at: now,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// When the grid was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When a write last landed on the grid.
    #[must_use]
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.modified_at
    }

    /// Whether `(x, y)` lies inside the grid.
    #[must_use]
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// The tile at `(x, y)`, or [`TileTag::Empty`] outside the grid.
    #[must_use]
    pub fn tile(&self, x: i32, y: i32) -> TileTag {
        self.index(x, y).map_or(TileTag::Empty, |index| self.tiles[index])
    }

    /// Writes `tag` at `(x, y)` and returns whether the write landed.
    ///
    /// Out-of-bounds writes change nothing, including the modification
    /// time. In-bounds writes always bump it, even when the value is
    /// unchanged.
    pub fn set_tile(&mut self, x: i32, y: i32, tag: TileTag, clock: &dyn Clock) -> bool {
        let Some(index) = self.index(x, y) else {
            trace!(x, y, ?tag, "ignoring out-of-bounds tile write");
            return false;
        };
        self.tiles[index] = tag;
        self.modified_at = clock.now();
        true
    }

    /// Resizes the grid, keeping the tiles in the overlap of the old and new
    /// rectangles. New cells are Floor; cells cut off by shrinking are lost.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGridDimensions` for dimensions
    /// [`Grid::new`] would reject. The grid is left untouched in that case.
    pub fn resize(
        &mut self,
        new_width: u32,
        new_height: u32,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        validate_dimensions(new_width, new_height)?;

        let mut tiles = vec![TileTag::Floor; cell_count(new_width, new_height)];
        let keep_width = self.width.min(new_width) as usize;
        let keep_height = self.height.min(new_height) as usize;
        for row in 0..keep_height {
            let from = row * self.width as usize;
            let to = row * new_width as usize;
            tiles[to..to + keep_width].copy_from_slice(&self.tiles[from..from + keep_width]);
        }

        debug!(
            from_width = self.width,
            from_height = self.height,
            to_width = new_width,
            to_height = new_height,
            "resized grid"
        );
        self.width = new_width;
        self.height = new_height;
        self.tiles = tiles;
        self.modified_at = clock.now();
        Ok(())
    }

    /// Resets every cell to Floor.
    pub fn clear(&mut self, clock: &dyn Clock) {
        self.fill(TileTag::Floor, clock);
    }

    /// Sets every cell to `tag`.
    pub fn fill(&mut self, tag: TileTag, clock: &dyn Clock) {
        self.tiles.fill(tag);
        self.modified_at = clock.now();
    }

    /// Whether a creature can stand at `(x, y)`. Always false outside the
    /// grid.
    #[must_use]
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.is_in_bounds(x, y) && self.tile(x, y).is_walkable()
    }

    /// Cost to enter `(x, y)`; `None` if impassable or outside the grid.
    #[must_use]
    pub fn movement_cost(&self, x: i32, y: i32) -> Option<u32> {
        self.tile(x, y).movement_cost()
    }

    /// Whether the tile at `(x, y)` stops line of sight. Cells outside the
    /// grid read as Empty and do not block.
    #[must_use]
    pub fn blocks_line_of_sight(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).blocks_line_of_sight()
    }

    /// Walkable orthogonal neighbors of `position`, north first, clockwise.
    #[must_use]
    pub fn walkable_neighbors(&self, position: Position) -> Vec<Position> {
        position
            .cardinal_neighbors()
            .filter(|next| self.is_walkable(next.x, next.y))
            .collect()
    }

    /// Rows from top to bottom, each `width` tiles long.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[TileTag]> + '_ {
        self.tiles.chunks_exact(self.width as usize)
    }

    /// Every cell with its coordinate, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Position, TileTag)> + '_ {
        self.rows().zip(0_i32..).flat_map(|(row, y)| {
            row.iter()
                .zip(0_i32..)
                .map(move |(tag, x)| (Position::new(x, y), *tag))
        })
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let column = u32::try_from(x).ok().filter(|column| *column < self.width)?;
        let row = u32::try_from(y).ok().filter(|row| *row < self.height)?;
        Some(row as usize * self.width as usize + column as usize)
    }
}

fn validate_dimensions(width: u32, height: u32) -> Result<(), DomainError> {
    if width == 0 || height == 0 {
        return Err(DomainError::InvalidGridDimensions {
            width,
            height,
            reason: "width and height must be at least 1",
        });
    }
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(DomainError::InvalidGridDimensions {
            width,
            height,
            reason: "width and height must not exceed 4096",
        });
    }
    Ok(())
}

fn cell_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Unvalidated wire shape of a [`Grid`].
#[derive(Deserialize)]
struct GridRecord {
    width: u32,
    height: u32,
    tiles: Vec<TileTag>,
    created_at: DateTime<Utc>,
    modified_at: DateTime<Utc>,
}

impl TryFrom<GridRecord> for Grid {
    type Error = DomainError;

    fn try_from(record: GridRecord) -> Result<Self, Self::Error> {
        validate_dimensions(record.width, record.height)?;
        let expected = cell_count(record.width, record.height);
        if record.tiles.len() != expected {
            return Err(DomainError::Validation(format!(
                "a {}x{} grid needs {expected} tiles, found {}",
                record.width,
                record.height,
                record.tiles.len()
            )));
        }
        Ok(Self {
            width: record.width,
            height: record.height,
            tiles: record.tiles,
            created_at: record.created_at,
            modified_at: record.modified_at,
        })
    }
}
