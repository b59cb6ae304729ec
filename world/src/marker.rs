//! Half-cell-resolution marker steered through the carved maze.

use maze_card_core::{CellCoord, Direction, MarkerCenter};

use crate::grid::Grid;

/// Movable marker whose box is half the width and half the height of one
/// grid cell.
///
/// The center is tracked on a quarter-cell integer lattice per axis: a cell
/// center sits at `4 * index + 2` and every granted move shifts by 2 (half a
/// cell). The box spans one lattice unit to either side of the center.
/// Integer tracking keeps move resolution exact and replay-stable; the
/// continuous center the renderer consumes is derived on read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ActiveMarker {
    x: i64,
    y: i64,
}

impl ActiveMarker {
    /// Places the marker so its center coincides with the cell's center.
    pub(crate) fn centered_on(cell: CellCoord) -> Self {
        Self {
            x: i64::from(cell.column()) * 4 + 2,
            y: i64::from(cell.row()) * 4 + 2,
        }
    }

    /// Continuous center in maze-local drawing units.
    pub(crate) fn center(&self, cell_width: f32, cell_height: f32) -> MarkerCenter {
        MarkerCenter {
            x: self.x as f32 * cell_width / 4.0,
            y: self.y as f32 * cell_height / 4.0,
        }
    }

    /// Attempts a half-cell shift, honoring the walls of the occupied cell.
    ///
    /// The occupied cell is found by floor-dividing the center. A move is
    /// granted when the wall on the pressed side is already open, or when
    /// the wall is standing but the marker's far edge stays inside the
    /// occupied cell after the shift. A center that maps to no grid cell
    /// means the marker has left through the exit; every further move is
    /// refused.
    pub(crate) fn try_shift(&mut self, direction: Direction, grid: &Grid) -> bool {
        let column = self.x.div_euclid(4);
        let row = self.y.div_euclid(4);
        let Some(index) = grid.index_of(column, row) else {
            return false;
        };
        let walls = grid.walls(index);

        let wall_open = !walls.is_closed(direction.wall_side());
        // far edge after the shift: center, plus one lattice unit of box,
        // plus the two-unit step, measured against the cell's own boundary
        let stays_inside = match direction {
            Direction::Up => self.y - 3 >= row * 4,
            Direction::Right => self.x + 3 <= (column + 1) * 4,
            Direction::Down => self.y + 3 <= (row + 1) * 4,
            Direction::Left => self.x - 3 >= column * 4,
        };

        if !(wall_open || stays_inside) {
            return false;
        }

        match direction {
            Direction::Up => self.y -= 2,
            Direction::Right => self.x += 2,
            Direction::Down => self.y += 2,
            Direction::Left => self.x -= 2,
        }
        true
    }
}
