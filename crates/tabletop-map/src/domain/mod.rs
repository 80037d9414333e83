//! Domain model for tactical maps.

pub mod grid;
pub mod position;
pub mod sight;
pub mod tile;

pub use grid::{Grid, MAX_GRID_DIMENSION};
pub use position::Position;
pub use tile::{TileProperties, TileTag};
