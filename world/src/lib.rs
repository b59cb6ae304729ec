#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state for the greeting-card animation.
//!
//! The maze is carved incrementally: the driving adapter submits one
//! [`Command::Step`] per animation frame until generation finishes, then
//! forwards directional input as [`Command::TryMove`]. All mutation funnels
//! through [`apply`]; reads go through the [`query`] module. Given the same
//! configuration and seed phrase, every run carves the same maze, places
//! the same exit, and resolves the same marker moves.

mod grid;
mod marker;
mod rng;

use maze_card_core::{
    CellCoord, Command, Direction, Event, ExitRecord, IconAnchor, MazeConfigError, WallSide,
};

use crate::{grid::Grid, marker::ActiveMarker, rng::RandomSource};

/// Offsets of the pre-opened start room relative to the start cell, in the
/// order the cells are processed. The last in-bounds entry becomes the
/// generator's first `current` cell.
const START_ROOM_OFFSETS: [(i64, i64); 9] = [
    (0, 0),
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// Construction parameters for a [`Maze`].
///
/// The full reproducibility surface of a maze is this configuration: the
/// seed phrase plus the grid and canvas dimensions. Nothing else needs to
/// cross a process boundary to rebuild an identical maze.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeConfig {
    columns: u32,
    rows: u32,
    padding_cells: u32,
    seed: String,
    width: f32,
    height: f32,
}

impl MazeConfig {
    /// Creates a new configuration from grid dimensions, the padding ring
    /// measured in cells, the seed phrase, and the canvas size.
    #[must_use]
    pub fn new(
        columns: u32,
        rows: u32,
        padding_cells: u32,
        seed: impl Into<String>,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            columns,
            rows,
            padding_cells,
            seed: seed.into(),
            width,
            height,
        }
    }

    /// Number of maze columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of maze rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of padding cells distributed around the maze.
    #[must_use]
    pub const fn padding_cells(&self) -> u32 {
        self.padding_cells
    }

    /// Seed phrase the random source is derived from.
    #[must_use]
    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Width of one cell in drawing units.
    #[must_use]
    pub fn cell_width(&self) -> f32 {
        self.width / (self.columns + self.padding_cells) as f32
    }

    /// Height of one cell in drawing units.
    #[must_use]
    pub fn cell_height(&self) -> f32 {
        self.height / (self.rows + self.padding_cells) as f32
    }

    /// Translation offset renderers apply so the padding ring surrounds the
    /// maze evenly.
    #[must_use]
    pub fn margin(&self) -> (f32, f32) {
        (
            self.cell_width() * self.padding_cells as f32 / 2.0,
            self.cell_height() * self.padding_cells as f32 / 2.0,
        )
    }

    fn validate(&self) -> Result<(), MazeConfigError> {
        if self.columns == 0 {
            return Err(MazeConfigError::ZeroColumns);
        }
        if self.rows == 0 {
            return Err(MazeConfigError::ZeroRows);
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(MazeConfigError::InvalidCanvas);
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(MazeConfigError::InvalidCanvas);
        }
        Ok(())
    }
}

/// Generation state machine. `current` exists exactly while generation is
/// in progress; both endpoints carry no cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// No step has been taken yet.
    NotStarted,
    /// The generator is extending a corridor from `current`.
    Carving { current: usize },
    /// The generator just retreated to `current` via the stack.
    Backtracking { current: usize },
    /// Corridors are carved and the exit is placed.
    Done,
}

/// Represents the authoritative maze state.
#[derive(Clone, Debug)]
pub struct Maze {
    config: MazeConfig,
    grid: Grid,
    phase: Phase,
    stack: Vec<usize>,
    rng: RandomSource,
    marker: Option<ActiveMarker>,
    start: Option<CellCoord>,
    exit: Option<ExitRecord>,
}

impl Maze {
    /// Creates a fully walled, unvisited maze ready for step-wise carving.
    ///
    /// Fails without producing a partial maze when the configuration is
    /// invalid.
    pub fn new(config: MazeConfig) -> Result<Self, MazeConfigError> {
        config.validate()?;
        let grid = Grid::sealed(config.columns(), config.rows());
        let rng = RandomSource::from_seed_phrase(config.seed());
        Ok(Self {
            config,
            grid,
            phase: Phase::NotStarted,
            stack: Vec::new(),
            rng,
            marker: None,
            start: None,
            exit: None,
        })
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            Phase::NotStarted => self.open_start_room(out_events),
            Phase::Carving { current } | Phase::Backtracking { current } => {
                self.extend_from(current, out_events);
            }
            Phase::Done => {}
        }
    }

    /// Picks the center-biased start cell, opens the clipped 3x3 start
    /// room, and places the marker. Draw order: start row, then start
    /// column.
    fn open_start_room(&mut self, out_events: &mut Vec<Event>) {
        let rows = self.grid.rows();
        let columns = self.grid.columns();
        let start_row = self.rng.int_in_range(rows / 4, rows / 4 + rows / 2);
        let start_column = self.rng.int_in_range(columns / 4, columns / 4 + columns / 2);

        let column = i64::from(start_column);
        let row = i64::from(start_row);
        let Some(start_index) = self.grid.index_of(column, row) else {
            self.phase = Phase::Done;
            return;
        };

        let mut room: Vec<usize> = Vec::with_capacity(START_ROOM_OFFSETS.len());
        let mut current = start_index;
        for (column_delta, row_delta) in START_ROOM_OFFSETS {
            if let Some(index) = self.grid.index_of(column + column_delta, row + row_delta) {
                self.grid.mark_start(index);
                room.push(index);
                current = index;
            }
        }

        // open only the walls shared by two room cells, so the room's outer
        // perimeter stays a single coherent boundary
        for &index in &room {
            let coord = self.grid.coord_of(index);
            let cell_column = i64::from(coord.column());
            let cell_row = i64::from(coord.row());
            for (column_delta, row_delta) in [(1, 0), (0, 1)] {
                if let Some(neighbor) = self
                    .grid
                    .index_of(cell_column + column_delta, cell_row + row_delta)
                {
                    if room.contains(&neighbor) {
                        self.grid.carve_between(index, neighbor);
                    }
                }
            }
        }

        let start = CellCoord::new(start_column, start_row);
        self.start = Some(start);
        self.marker = Some(ActiveMarker::centered_on(start));
        self.phase = Phase::Carving { current };
        out_events.push(Event::GenerationStarted { start });
    }

    /// One carve or backtrack step; the final step places the exit.
    fn extend_from(&mut self, current: usize, out_events: &mut Vec<Event>) {
        let neighbors = self.grid.unvisited_neighbors(current);
        if neighbors.len() > 0 {
            let chosen = neighbors.get(self.rng.pick_index(neighbors.len()));
            self.stack.push(current);
            self.grid.carve_between(current, chosen);
            self.grid.mark_visited(chosen);
            out_events.push(Event::PassageCarved {
                from: self.grid.coord_of(current),
                to: self.grid.coord_of(chosen),
            });
            self.phase = Phase::Carving { current: chosen };
        } else if let Some(previous) = self.stack.pop() {
            out_events.push(Event::Backtracked {
                to: self.grid.coord_of(previous),
            });
            self.phase = Phase::Backtracking { current: previous };
        } else {
            self.place_exit(out_events);
            self.phase = Phase::Done;
            out_events.push(Event::GenerationFinished);
        }
    }

    /// Opens one border wall, chosen uniformly, with corner sides resolved
    /// by the fixed left, right, top, bottom priority.
    fn place_exit(&mut self, out_events: &mut Vec<Event>) {
        let border = self.grid.border_cells();
        if border.is_empty() {
            return;
        }

        let index = border[self.rng.pick_index(border.len())];
        let coord = self.grid.coord_of(index);
        let columns = self.grid.columns();
        let rows = self.grid.rows();

        let side = if coord.column() == 0 {
            WallSide::Left
        } else if coord.column() == columns - 1 {
            WallSide::Right
        } else if coord.row() == 0 {
            WallSide::Top
        } else {
            WallSide::Bottom
        };
        self.grid.carve_border(index, side);

        let column = coord.column() as i32;
        let row = coord.row() as i32;
        let anchor = match side {
            WallSide::Left => IconAnchor::new(-1, row),
            WallSide::Right => IconAnchor::new(columns as i32, row),
            WallSide::Top => IconAnchor::new(column, -1),
            WallSide::Bottom => IconAnchor::new(column, rows as i32),
        };

        let exit = ExitRecord {
            cell: coord,
            side,
            anchor,
        };
        self.exit = Some(exit);
        out_events.push(Event::ExitCarved { exit });
    }

    /// Resolves a directional move request against the carved walls.
    ///
    /// Until generation finishes every request is accepted as a no-op; the
    /// marker reports its unchanged center. This pass-through is a
    /// deliberate part of the interface contract, not an oversight.
    fn try_move(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let cell_width = self.config.cell_width();
        let cell_height = self.config.cell_height();
        let done = matches!(self.phase, Phase::Done);

        let Some(marker) = self.marker.as_mut() else {
            return;
        };

        if !done {
            out_events.push(Event::MarkerMoved {
                center: marker.center(cell_width, cell_height),
            });
            return;
        }

        if marker.try_shift(direction, &self.grid) {
            out_events.push(Event::MarkerMoved {
                center: marker.center(cell_width, cell_height),
            });
        } else {
            out_events.push(Event::MarkerBlocked { direction });
        }
    }
}

/// Applies the provided command to the maze, mutating state
/// deterministically and appending the resulting events.
pub fn apply(maze: &mut Maze, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Step => maze.step(out_events),
        Command::TryMove { direction } => maze.try_move(direction, out_events),
    }
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use maze_card_core::{CellCoord, CellSnapshot, ExitRecord, MarkerCenter};

    use super::{Maze, Phase};

    /// Reports whether corridor carving and exit placement have finished.
    #[must_use]
    pub fn is_done(maze: &Maze) -> bool {
        matches!(maze.phase, Phase::Done)
    }

    /// The carved border exit; present only once generation is done.
    #[must_use]
    pub fn exit(maze: &Maze) -> Option<ExitRecord> {
        maze.exit
    }

    /// Read-only state of the cell at the given coordinates, or `None` for
    /// any out-of-range position.
    #[must_use]
    pub fn cell_at(maze: &Maze, column: u32, row: u32) -> Option<CellSnapshot> {
        maze.grid
            .index_of(i64::from(column), i64::from(row))
            .map(|index| maze.grid.snapshot(index))
    }

    /// Continuous center of the marker; absent until generation starts.
    #[must_use]
    pub fn marker_center(maze: &Maze) -> Option<MarkerCenter> {
        maze.marker
            .map(|marker| marker.center(maze.config.cell_width(), maze.config.cell_height()))
    }

    /// Center cell of the pre-opened start room, once generation started.
    #[must_use]
    pub fn start_cell(maze: &Maze) -> Option<CellCoord> {
        maze.start
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn grid_size(maze: &Maze) -> (u32, u32) {
        (maze.grid.columns(), maze.grid.rows())
    }

    /// Width of one cell in drawing units.
    #[must_use]
    pub fn cell_width(maze: &Maze) -> f32 {
        maze.config.cell_width()
    }

    /// Height of one cell in drawing units.
    #[must_use]
    pub fn cell_height(maze: &Maze) -> f32 {
        maze.config.cell_height()
    }

    /// Translation offset renderers apply for the padding ring.
    #[must_use]
    pub fn margin(maze: &Maze) -> (f32, f32) {
        maze.config.margin()
    }

    /// Seed phrase the maze was carved from; the renderer prints it.
    #[must_use]
    pub fn seed(maze: &Maze) -> &str {
        maze.config.seed()
    }
}

#[cfg(test)]
mod tests {
    use super::{query, Maze, MazeConfig};
    use maze_card_core::MazeConfigError;

    fn config(columns: u32, rows: u32) -> MazeConfig {
        MazeConfig::new(columns, rows, 0, "test", 40.0 * columns as f32, 40.0 * rows as f32)
    }

    #[test]
    fn construction_rejects_zero_dimensions() {
        assert_eq!(
            Maze::new(config(0, 5)).err(),
            Some(MazeConfigError::ZeroColumns)
        );
        assert_eq!(
            Maze::new(config(5, 0)).err(),
            Some(MazeConfigError::ZeroRows)
        );
    }

    #[test]
    fn construction_rejects_degenerate_canvases() {
        let zero_width = MazeConfig::new(3, 3, 0, "test", 0.0, 120.0);
        assert_eq!(
            Maze::new(zero_width).err(),
            Some(MazeConfigError::InvalidCanvas)
        );
        let nan_height = MazeConfig::new(3, 3, 0, "test", 120.0, f32::NAN);
        assert_eq!(
            Maze::new(nan_height).err(),
            Some(MazeConfigError::InvalidCanvas)
        );
    }

    #[test]
    fn a_fresh_maze_is_sealed_and_idle() {
        let maze = Maze::new(config(4, 3)).expect("valid configuration");
        assert!(!query::is_done(&maze));
        assert!(query::exit(&maze).is_none());
        assert!(query::marker_center(&maze).is_none());
        assert!(query::start_cell(&maze).is_none());
        for row in 0..3 {
            for column in 0..4 {
                let cell = query::cell_at(&maze, column, row).expect("cell in range");
                assert!(!cell.visited);
                assert!(!cell.is_start);
                assert!(cell.walls.top && cell.walls.right && cell.walls.bottom && cell.walls.left);
            }
        }
        assert!(query::cell_at(&maze, 4, 0).is_none());
        assert!(query::cell_at(&maze, 0, 3).is_none());
    }

    #[test]
    fn padding_shrinks_cells_and_adds_margin() {
        let maze = Maze::new(MazeConfig::new(10, 10, 4, "pad", 900.0, 900.0))
            .expect("valid configuration");
        let cell = 900.0 / 14.0;
        assert_eq!(query::cell_width(&maze), cell);
        assert_eq!(query::cell_height(&maze), cell);
        assert_eq!(query::margin(&maze), (cell * 2.0, cell * 2.0));
        assert_eq!(query::seed(&maze), "pad");
    }
}
