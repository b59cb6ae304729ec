//! Flat cell arena backing the maze.

use maze_card_core::{CellCoord, CellSnapshot, CellWalls};

/// Single cell of the arena; starts fully walled and unvisited.
#[derive(Clone, Debug)]
struct Cell {
    walls: CellWalls,
    visited: bool,
    is_start: bool,
}

impl Cell {
    const fn sealed() -> Self {
        Self {
            walls: CellWalls::sealed(),
            visited: false,
            is_start: false,
        }
    }
}

/// Dense row-major grid of cells, fixed in size for its whole lifetime.
///
/// Cells are addressed as `column + row * columns`. Neighbor and border
/// relations are computed arithmetically; the only operations that touch
/// wall flags are [`Grid::carve_between`] and [`Grid::carve_border`], which
/// keeps the wall-symmetry invariant in one place.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every wall standing and no cell visited.
    pub(crate) fn sealed(columns: u32, rows: u32) -> Self {
        let cell_count = columns as usize * rows as usize;
        Self {
            columns,
            rows,
            cells: vec![Cell::sealed(); cell_count],
        }
    }

    /// Number of columns in the grid.
    pub(crate) const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    pub(crate) const fn rows(&self) -> u32 {
        self.rows
    }

    /// Arena index of the cell at the given signed coordinates, or `None`
    /// for any out-of-range position.
    pub(crate) fn index_of(&self, column: i64, row: i64) -> Option<usize> {
        if column < 0 || row < 0 || column >= i64::from(self.columns) || row >= i64::from(self.rows)
        {
            return None;
        }
        Some(column as usize + row as usize * self.columns as usize)
    }

    /// Coordinates of the cell stored at the given arena index.
    pub(crate) fn coord_of(&self, index: usize) -> CellCoord {
        let column = (index % self.columns as usize) as u32;
        let row = (index / self.columns as usize) as u32;
        CellCoord::new(column, row)
    }

    /// Wall flags of the cell at the given index.
    pub(crate) fn walls(&self, index: usize) -> CellWalls {
        self.cells[index].walls
    }

    /// Read-only snapshot of the cell at the given index.
    pub(crate) fn snapshot(&self, index: usize) -> CellSnapshot {
        let cell = &self.cells[index];
        CellSnapshot {
            walls: cell.walls,
            visited: cell.visited,
            is_start: cell.is_start,
        }
    }

    /// Marks the cell as reached by generation.
    pub(crate) fn mark_visited(&mut self, index: usize) {
        self.cells[index].visited = true;
    }

    /// Marks the cell as part of the pre-opened start room.
    pub(crate) fn mark_start(&mut self, index: usize) {
        self.cells[index].visited = true;
        self.cells[index].is_start = true;
    }

    /// Removes the wall shared by two adjacent cells, clearing both facing
    /// flags in one operation.
    pub(crate) fn carve_between(&mut self, a: usize, b: usize) {
        let from = self.coord_of(a);
        let to = self.coord_of(b);
        let column_delta = i64::from(to.column()) - i64::from(from.column());
        let row_delta = i64::from(to.row()) - i64::from(from.row());
        debug_assert!(
            column_delta.abs() + row_delta.abs() == 1,
            "carve_between requires axis-aligned neighbors"
        );

        match (column_delta, row_delta) {
            (1, 0) => {
                self.cells[a].walls.right = false;
                self.cells[b].walls.left = false;
            }
            (-1, 0) => {
                self.cells[a].walls.left = false;
                self.cells[b].walls.right = false;
            }
            (0, 1) => {
                self.cells[a].walls.bottom = false;
                self.cells[b].walls.top = false;
            }
            (0, -1) => {
                self.cells[a].walls.top = false;
                self.cells[b].walls.bottom = false;
            }
            _ => {}
        }
    }

    /// Removes a single outward-facing wall on a border cell. No adjoining
    /// flag exists beyond the border, so only one side changes.
    pub(crate) fn carve_border(&mut self, index: usize, side: maze_card_core::WallSide) {
        let walls = &mut self.cells[index].walls;
        match side {
            maze_card_core::WallSide::Top => walls.top = false,
            maze_card_core::WallSide::Right => walls.right = false,
            maze_card_core::WallSide::Bottom => walls.bottom = false,
            maze_card_core::WallSide::Left => walls.left = false,
        }
    }

    /// Unvisited axis-aligned neighbors of the cell, gathered in top,
    /// right, bottom, left order.
    pub(crate) fn unvisited_neighbors(&self, index: usize) -> NeighborSet {
        let coord = self.coord_of(index);
        let column = i64::from(coord.column());
        let row = i64::from(coord.row());

        let mut neighbors = NeighborSet::default();
        for (column_delta, row_delta) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
            if let Some(neighbor) = self.index_of(column + column_delta, row + row_delta) {
                if !self.cells[neighbor].visited {
                    neighbors.push(neighbor);
                }
            }
        }
        neighbors
    }

    /// Arena indices of every cell on the outer border, in index order.
    pub(crate) fn border_cells(&self) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&index| {
                let coord = self.coord_of(index);
                coord.column() == 0
                    || coord.column() == self.columns - 1
                    || coord.row() == 0
                    || coord.row() == self.rows - 1
            })
            .collect()
    }
}

/// Fixed-capacity set of neighbor indices; a cell has at most four.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NeighborSet {
    buffer: [usize; 4],
    len: usize,
}

impl NeighborSet {
    fn push(&mut self, index: usize) {
        if self.len < self.buffer.len() {
            self.buffer[self.len] = index;
            self.len += 1;
        }
    }

    /// Number of gathered neighbors.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Neighbor at the given position within the set.
    pub(crate) fn get(&self, position: usize) -> usize {
        debug_assert!(position < self.len, "neighbor position out of range");
        self.buffer[position]
    }
}
