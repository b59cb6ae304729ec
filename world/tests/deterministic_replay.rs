use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use maze_card_core::{CellCoord, Command, Direction, Event, ExitRecord};
use maze_card_world::{self as world, query, Maze, MazeConfig};

#[test]
fn deterministic_replay_produces_identical_outcomes() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = Vec::new();
    // input arriving mid-generation must not disturb the carve stream
    commands.push(Command::TryMove {
        direction: Direction::Up,
    });
    for index in 0..73 {
        commands.push(Command::Step);
        if index % 7 == 0 {
            commands.push(Command::TryMove {
                direction: Direction::Left,
            });
        }
    }
    for direction in [
        Direction::Right,
        Direction::Right,
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Down,
        Direction::Right,
    ] {
        commands.push(Command::TryMove { direction });
    }
    commands
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let config = MazeConfig::new(6, 6, 2, "romeo-juliet", 640.0, 640.0);
    let mut maze = Maze::new(config).expect("valid configuration");

    let mut log = Vec::new();
    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut maze, command, &mut events);
        log.extend(events.iter().map(EventRecord::from));
    }

    let mut walls = Vec::new();
    let (columns, rows) = query::grid_size(&maze);
    for row in 0..rows {
        for column in 0..columns {
            let cell = query::cell_at(&maze, column, row).expect("cell in range");
            walls.push((
                cell.walls.top,
                cell.walls.right,
                cell.walls.bottom,
                cell.walls.left,
                cell.visited,
                cell.is_start,
            ));
        }
    }

    ReplayOutcome {
        done: query::is_done(&maze),
        exit: query::exit(&maze),
        start: query::start_cell(&maze),
        marker: query::marker_center(&maze).map(|center| (center.x.to_bits(), center.y.to_bits())),
        walls,
        events: log,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    done: bool,
    exit: Option<ExitRecord>,
    start: Option<CellCoord>,
    marker: Option<(u32, u32)>,
    walls: Vec<(bool, bool, bool, bool, bool, bool)>,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    GenerationStarted { start: CellCoord },
    PassageCarved { from: CellCoord, to: CellCoord },
    Backtracked { to: CellCoord },
    ExitCarved { exit: ExitRecord },
    GenerationFinished,
    MarkerMoved { center_bits: (u32, u32) },
    MarkerBlocked { direction: Direction },
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match *event {
            Event::GenerationStarted { start } => Self::GenerationStarted { start },
            Event::PassageCarved { from, to } => Self::PassageCarved { from, to },
            Event::Backtracked { to } => Self::Backtracked { to },
            Event::ExitCarved { exit } => Self::ExitCarved { exit },
            Event::GenerationFinished => Self::GenerationFinished,
            Event::MarkerMoved { center } => Self::MarkerMoved {
                center_bits: (center.x.to_bits(), center.y.to_bits()),
            },
            Event::MarkerBlocked { direction } => Self::MarkerBlocked { direction },
        }
    }
}
