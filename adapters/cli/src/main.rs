#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that carves a greeting-card maze and replays input.
//!
//! The adapter owns scheduling: it submits one `Step` per loop iteration
//! until generation finishes, prints the carved maze, then forwards the
//! scripted directional input as `TryMove` commands.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use maze_card_core::{Command, Direction, Event};
use maze_card_world::{self as world, query, Maze, MazeConfig};

/// Carves a deterministic greeting-card maze and replays marker input.
#[derive(Debug, Parser)]
#[command(name = "maze-card")]
struct Args {
    /// Number of maze columns.
    #[arg(long, default_value_t = 10)]
    columns: u32,

    /// Number of maze rows.
    #[arg(long, default_value_t = 10)]
    rows: u32,

    /// Padding ring around the maze, measured in cells.
    #[arg(long, default_value_t = 4)]
    padding_cells: u32,

    /// Seed phrase, typically "<sender>-<recipient>".
    #[arg(long, default_value = "romeo-juliet")]
    seed: String,

    /// Canvas edge length in drawing units.
    #[arg(long, default_value_t = 900.0)]
    size: f32,

    /// Marker input replayed after carving: a string of u, r, d and l.
    #[arg(long, default_value = "")]
    moves: String,
}

/// Entry point for the greeting-card maze command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let moves = parse_moves(&args.moves)?;

    let config = MazeConfig::new(
        args.columns,
        args.rows,
        args.padding_cells,
        args.seed,
        args.size,
        args.size,
    );
    let mut maze = Maze::new(config).context("invalid maze configuration")?;

    let step_budget = 2 * u64::from(args.columns) * u64::from(args.rows) + 1;
    let mut events = Vec::new();
    for _ in 0..step_budget {
        events.clear();
        world::apply(&mut maze, Command::Step, &mut events);
        if query::is_done(&maze) {
            break;
        }
    }
    if !query::is_done(&maze) {
        bail!("generation exceeded its step budget");
    }

    print!("{}", render(&maze));

    for direction in moves {
        events.clear();
        world::apply(&mut maze, Command::TryMove { direction }, &mut events);
        for event in &events {
            match event {
                Event::MarkerMoved { center } => {
                    println!("moved {:?} to ({:.1}, {:.1})", direction, center.x, center.y);
                }
                Event::MarkerBlocked { direction } => {
                    println!("blocked {direction:?}");
                }
                _ => {}
            }
        }
    }

    if let Some(exit) = query::exit(&maze) {
        println!(
            "exit: {:?} wall of cell ({}, {}), icon at ({}, {})",
            exit.side,
            exit.cell.column(),
            exit.cell.row(),
            exit.anchor.column(),
            exit.anchor.row(),
        );
    }
    if let Some(center) = query::marker_center(&maze) {
        println!("marker: ({:.1}, {:.1})", center.x, center.y);
    }
    println!("seed: {}", query::seed(&maze));

    Ok(())
}

fn parse_moves(moves: &str) -> Result<Vec<Direction>> {
    moves
        .chars()
        .map(|letter| match letter {
            'u' => Ok(Direction::Up),
            'r' => Ok(Direction::Right),
            'd' => Ok(Direction::Down),
            'l' => Ok(Direction::Left),
            other => Err(anyhow!("unsupported move {other:?}, expected u, r, d or l")),
        })
        .collect()
}

/// Renders the carved maze as wall art from per-cell wall flags; the start
/// room is dotted and the marker's cell is highlighted.
fn render(maze: &Maze) -> String {
    let (columns, rows) = query::grid_size(maze);
    let marker_cell = query::marker_center(maze).map(|center| {
        (
            (center.x / query::cell_width(maze)).floor() as i64,
            (center.y / query::cell_height(maze)).floor() as i64,
        )
    });

    let mut out = String::new();
    for row in 0..rows {
        for column in 0..columns {
            let Some(cell) = query::cell_at(maze, column, row) else {
                continue;
            };
            out.push('+');
            out.push_str(if cell.walls.top { "---" } else { "   " });
        }
        out.push_str("+\n");

        for column in 0..columns {
            let Some(cell) = query::cell_at(maze, column, row) else {
                continue;
            };
            out.push(if cell.walls.left { '|' } else { ' ' });
            let body = if marker_cell == Some((i64::from(column), i64::from(row))) {
                " @ "
            } else if cell.is_start {
                " . "
            } else {
                "   "
            };
            out.push_str(body);
            if column == columns - 1 {
                out.push(if cell.walls.right { '|' } else { ' ' });
            }
        }
        out.push('\n');
    }

    for column in 0..columns {
        let Some(cell) = query::cell_at(maze, column, rows - 1) else {
            continue;
        };
        out.push('+');
        out.push_str(if cell.walls.bottom { "---" } else { "   " });
    }
    out.push_str("+\n");
    out
}
