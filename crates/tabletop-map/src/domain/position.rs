//! Grid coordinates.

use serde::{Deserialize, Serialize};

/// A cell coordinate. `x` is the column, `y` the row; negative values are
/// valid and simply lie outside every grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Position {
    /// The top-left cell.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The orthogonal neighbors in order north, east, south, west. A
    /// neighbor whose coordinate would overflow `i32` is skipped; it lies
    /// outside every grid anyway.
    pub fn cardinal_neighbors(self) -> impl Iterator<Item = Position> {
        [
            self.y.checked_sub(1).map(|y| Self::new(self.x, y)),
            self.x.checked_add(1).map(|x| Self::new(x, self.y)),
            self.y.checked_add(1).map(|y| Self::new(self.x, y)),
            self.x.checked_sub(1).map(|x| Self::new(x, self.y)),
        ]
        .into_iter()
        .flatten()
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
