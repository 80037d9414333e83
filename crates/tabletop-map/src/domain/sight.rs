//! Line of sight over a grid.

use super::grid::Grid;
use super::position::Position;

impl Grid {
    /// Whether an observer at `from` can see `to`.
    ///
    /// Walks a Bresenham line between the two cells. Both endpoints must be
    /// inside the grid; the cells strictly between them must not block
    /// sight. The endpoints themselves never block, so a wall or a closed
    /// door can always be seen from an adjacent cell.
    #[must_use]
    pub fn has_line_of_sight(&self, from: Position, to: Position) -> bool {
        if !self.is_in_bounds(from.x, from.y) || !self.is_in_bounds(to.x, to.y) {
            return false;
        }
        let path = line(from, to);
        let interior = path.len().saturating_sub(2);
        path.iter()
            .skip(1)
            .take(interior)
            .all(|cell| !self.blocks_line_of_sight(cell.x, cell.y))
    }
}

/// Cells on the Bresenham line from `from` to `to`, both included.
pub(crate) fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let step_x = if from.x < to.x { 1 } else { -1 };
    let step_y = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::with_capacity(usize::try_from(dx.max(-dy)).unwrap_or(0) + 1);
    let mut error = dx + dy;
    let mut current = from;
    loop {
        points.push(current);
        if current == to {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += step_x;
        }
        if doubled <= dx {
            error += dx;
            current.y += step_y;
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tabletop_test_support::FixedClock;

    use super::*;
    use crate::domain::tile::TileTag;

    fn open_grid(width: u32, height: u32) -> (Grid, FixedClock) {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let grid = Grid::new(width, height, &clock).unwrap();
        (grid, clock)
    }

    #[test]
    fn test_line_includes_both_endpoints() {
        let points = line(Position::new(0, 0), Position::new(3, 1));

        assert_eq!(points.first(), Some(&Position::new(0, 0)));
        assert_eq!(points.last(), Some(&Position::new(3, 1)));
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn test_line_runs_backwards_and_vertically() {
        let points = line(Position::new(2, 4), Position::new(2, 1));

        assert_eq!(
            points,
            vec![
                Position::new(2, 4),
                Position::new(2, 3),
                Position::new(2, 2),
                Position::new(2, 1),
            ]
        );
    }

    #[test]
    fn test_open_floor_has_clear_sight() {
        let (grid, _) = open_grid(5, 5);

        assert!(grid.has_line_of_sight(Position::new(0, 0), Position::new(4, 3)));
    }

    #[test]
    fn test_wall_between_blocks_sight() {
        // Arrange
        let (mut grid, clock) = open_grid(5, 5);
        grid.set_tile(2, 2, TileTag::Wall, &clock);

        // Act / Assert
        assert!(!grid.has_line_of_sight(Position::new(0, 2), Position::new(4, 2)));
        assert!(!grid.has_line_of_sight(Position::new(0, 0), Position::new(4, 4)));
        assert!(grid.has_line_of_sight(Position::new(0, 0), Position::new(4, 0)));
    }

    #[test]
    fn test_door_between_blocks_sight_even_though_walkable() {
        let (mut grid, clock) = open_grid(5, 1);
        grid.set_tile(2, 0, TileTag::Door, &clock);

        assert!(grid.is_walkable(2, 0));
        assert!(!grid.has_line_of_sight(Position::new(0, 0), Position::new(4, 0)));
    }

    #[test]
    fn test_blocking_endpoint_is_still_visible() {
        let (mut grid, clock) = open_grid(5, 1);
        grid.set_tile(4, 0, TileTag::Wall, &clock);

        assert!(grid.has_line_of_sight(Position::new(0, 0), Position::new(4, 0)));
    }

    #[test]
    fn test_water_does_not_block_sight() {
        let (mut grid, clock) = open_grid(5, 1);
        grid.set_tile(2, 0, TileTag::Water, &clock);

        assert!(grid.has_line_of_sight(Position::new(0, 0), Position::new(4, 0)));
    }

    #[test]
    fn test_out_of_bounds_endpoint_has_no_sight() {
        let (grid, _) = open_grid(3, 3);

        assert!(!grid.has_line_of_sight(Position::new(-1, 0), Position::new(2, 2)));
        assert!(!grid.has_line_of_sight(Position::new(0, 0), Position::new(3, 0)));
    }

    #[test]
    fn test_cell_sees_itself() {
        let (mut grid, clock) = open_grid(2, 2);
        grid.set_tile(1, 1, TileTag::Wall, &clock);

        assert!(grid.has_line_of_sight(Position::new(1, 1), Position::new(1, 1)));
    }
}
