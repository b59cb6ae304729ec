#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze greeting-card crates.
//!
//! This crate defines the message surface that connects the driving adapter
//! and the authoritative maze. Adapters submit [`Command`] values describing
//! desired mutations, the maze executes those commands via its `apply` entry
//! point, and then broadcasts [`Event`] values for renderers and input
//! handlers to react to deterministically. No state lives in this crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directional input understood by the marker navigator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
}

impl Direction {
    /// Wall side the marker presses against when moving this way.
    #[must_use]
    pub const fn wall_side(self) -> WallSide {
        match self {
            Self::Up => WallSide::Top,
            Self::Right => WallSide::Right,
            Self::Down => WallSide::Bottom,
            Self::Left => WallSide::Left,
        }
    }
}

/// One of the four walls enclosing a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallSide {
    /// Wall shared with the cell one row up.
    Top,
    /// Wall shared with the cell one column right.
    Right,
    /// Wall shared with the cell one row down.
    Bottom,
    /// Wall shared with the cell one column left.
    Left,
}

impl WallSide {
    /// Side the adjoining cell reports for the same physical wall.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Wall flags of a single cell as observed by renderers.
///
/// Walls are symmetric by construction: the carve operations in the world
/// crate update both facing flags together, so a cell reports a side open
/// exactly when its neighbor reports the opposite side open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CellWalls {
    /// Whether the top wall is still standing.
    pub top: bool,
    /// Whether the right wall is still standing.
    pub right: bool,
    /// Whether the bottom wall is still standing.
    pub bottom: bool,
    /// Whether the left wall is still standing.
    pub left: bool,
}

impl CellWalls {
    /// All four walls standing, the state every cell starts in.
    #[must_use]
    pub const fn sealed() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }

    /// Reports whether the wall on the given side is still standing.
    #[must_use]
    pub const fn is_closed(&self, side: WallSide) -> bool {
        match side {
            WallSide::Top => self.top,
            WallSide::Right => self.right,
            WallSide::Bottom => self.bottom,
            WallSide::Left => self.left,
        }
    }
}

/// Read-only state of one grid cell, the answer to a `cell_at` query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    /// Wall flags of the cell.
    pub walls: CellWalls,
    /// Whether generation has reached the cell.
    pub visited: bool,
    /// Whether the cell belongs to the pre-opened start room.
    pub is_start: bool,
}

/// Grid position one cell beyond the border where the exit icon is drawn.
///
/// Coordinates are signed because the anchor sits outside the grid: column
/// -1 or `columns`, row -1 or `rows`, depending on the carved side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IconAnchor {
    column: i32,
    row: i32,
}

impl IconAnchor {
    /// Creates a new icon anchor at the provided signed grid position.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Signed column of the anchor.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Signed row of the anchor.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }
}

/// The single opening carved into the maze border once generation ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExitRecord {
    /// Border cell whose outer wall was removed.
    pub cell: CellCoord,
    /// Side of the border cell that was opened.
    pub side: WallSide,
    /// Position one cell beyond the border for the exit icon.
    pub anchor: IconAnchor,
}

/// Continuous maze-local coordinates of the marker's center.
///
/// Renderers translate by the configured padding margin before drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerCenter {
    /// Horizontal coordinate in drawing units.
    pub x: f32,
    /// Vertical coordinate in drawing units.
    pub y: f32,
}

/// Commands that express all permissible maze mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances maze generation by exactly one unit of work. A no-op once
    /// generation has finished.
    Step,
    /// Requests a half-cell marker move in the given direction.
    ///
    /// A request is refused exactly when the maze emits
    /// [`Event::MarkerBlocked`]; any other outcome counts as accepted,
    /// including the deliberate no-op acceptance before generation ends.
    TryMove {
        /// Direction of the attempted move.
        direction: Direction,
    },
}

/// Events broadcast by the maze after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// The start room was opened and the marker placed on the start cell.
    GenerationStarted {
        /// Center cell of the pre-opened start room.
        start: CellCoord,
    },
    /// A wall between two adjacent cells was removed symmetrically.
    PassageCarved {
        /// Cell the generator extended from.
        from: CellCoord,
        /// Newly visited cell the passage leads to.
        to: CellCoord,
    },
    /// The generator retreated along its stack to an earlier cell.
    Backtracked {
        /// Cell the generator will extend from next.
        to: CellCoord,
    },
    /// The single border exit was carved.
    ExitCarved {
        /// Full description of the opening.
        exit: ExitRecord,
    },
    /// Generation is complete; marker moves are resolved from now on.
    GenerationFinished,
    /// A marker move was accepted; the center is unchanged when input
    /// arrives before generation finishes.
    MarkerMoved {
        /// Marker center after the command.
        center: MarkerCenter,
    },
    /// A marker move was refused; the marker did not move.
    MarkerBlocked {
        /// Direction of the refused move.
        direction: Direction,
    },
}

/// Reasons maze construction may fail. No partial maze is ever produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeConfigError {
    /// The grid needs at least one column.
    #[error("maze requires at least one column")]
    ZeroColumns,
    /// The grid needs at least one row.
    #[error("maze requires at least one row")]
    ZeroRows,
    /// Canvas dimensions must be finite and positive to derive cell sizes.
    #[error("canvas dimensions must be finite and positive")]
    InvalidCanvas,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, CellWalls, Direction, ExitRecord, IconAnchor, WallSide};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn opposite_sides_pair_up() {
        assert_eq!(WallSide::Top.opposite(), WallSide::Bottom);
        assert_eq!(WallSide::Right.opposite(), WallSide::Left);
        assert_eq!(WallSide::Bottom.opposite(), WallSide::Top);
        assert_eq!(WallSide::Left.opposite(), WallSide::Right);
    }

    #[test]
    fn opposite_is_an_involution() {
        for side in [
            WallSide::Top,
            WallSide::Right,
            WallSide::Bottom,
            WallSide::Left,
        ] {
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn directions_press_against_matching_walls() {
        assert_eq!(Direction::Up.wall_side(), WallSide::Top);
        assert_eq!(Direction::Right.wall_side(), WallSide::Right);
        assert_eq!(Direction::Down.wall_side(), WallSide::Bottom);
        assert_eq!(Direction::Left.wall_side(), WallSide::Left);
    }

    #[test]
    fn sealed_walls_close_every_side() {
        let walls = CellWalls::sealed();
        for side in [
            WallSide::Top,
            WallSide::Right,
            WallSide::Bottom,
            WallSide::Left,
        ] {
            assert!(walls.is_closed(side));
        }
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(3, 8));
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::Left);
    }

    #[test]
    fn exit_record_round_trips_through_bincode() {
        let exit = ExitRecord {
            cell: CellCoord::new(0, 4),
            side: WallSide::Left,
            anchor: IconAnchor::new(-1, 4),
        };
        assert_round_trip(&exit);
    }
}
