//! Pentomino Tiling CNF Encoder
//!
//! Turns "can these shapes tile this board" into a DIMACS CNF formula for
//! an external SAT solver, maps solver output back onto the board, and can
//! solve small instances directly by backtracking.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;

use pentasat::board::{Board, Placement};
use pentasat::decode::{decode_tiling, format_tiling, parse_solver_output};
use pentasat::encoder::Encoder;
use pentasat::pentominoes;
use pentasat::{input, solver};

/// Encodes pentomino tiling puzzles as DIMACS CNF.
#[derive(Parser)]
#[command(name = "pentasat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a tiling instance as a DIMACS CNF formula.
    Encode {
        /// Board definition file, one `x y` cell per line.
        #[arg(long)]
        board: PathBuf,
        /// Directory of shape definition files; built-in pentominoes if omitted.
        #[arg(long)]
        shapes: Option<PathBuf>,
        /// Output file; stdout if omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a SAT solver's output back into a tiling.
    Decode {
        #[arg(long)]
        board: PathBuf,
        #[arg(long)]
        shapes: Option<PathBuf>,
        /// Solver output file; stdin if omitted.
        #[arg(long)]
        result: Option<PathBuf>,
    },
    /// Solve an instance directly by backtracking search.
    Solve {
        #[arg(long)]
        board: PathBuf,
        #[arg(long)]
        shapes: Option<PathBuf>,
        /// Stop after this many tilings.
        #[arg(long, default_value_t = 1)]
        max: usize,
    },
    /// Print the built-in pentomino set.
    Pieces,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Encode {
            board,
            shapes,
            output,
        } => run_encode(&board, shapes.as_deref(), output.as_deref()),
        Command::Decode {
            board,
            shapes,
            result,
        } => run_decode(&board, shapes.as_deref(), result.as_deref()),
        Command::Solve { board, shapes, max } => run_solve(&board, shapes.as_deref(), max),
        Command::Pieces => {
            run_pieces();
            Ok(())
        }
    }
}

/// Loads the board and shapes, and enumerates every shape's placements.
fn load_instance(
    board_path: &std::path::Path,
    shapes_path: Option<&std::path::Path>,
) -> anyhow::Result<(Board, Vec<Vec<Placement>>)> {
    let board = input::read_board(board_path)
        .with_context(|| format!("reading board from {}", board_path.display()))?;
    let shapes = match shapes_path {
        Some(dir) => input::read_shape_dir(dir)
            .with_context(|| format!("reading shapes from {}", dir.display()))?,
        None => pentominoes::all(),
    };

    let placements: Vec<Vec<Placement>> = shapes
        .iter()
        .map(|shape| board.enumerate_placements(shape))
        .collect();
    info!(
        "{} cells, {} shapes, {} placements",
        board.len(),
        shapes.len(),
        placements.iter().map(Vec::len).sum::<usize>()
    );
    Ok((board, placements))
}

fn run_encode(
    board_path: &std::path::Path,
    shapes_path: Option<&std::path::Path>,
    output: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let (board, placements) = load_instance(board_path, shapes_path)?;
    let encoder = Encoder::new(board.len(), placements)?;
    info!(
        "{} variables, {} clauses",
        encoder.num_vars(),
        encoder.num_clauses()
    );

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            encoder.write_dimacs(file)?;
            eprintln!(
                "Wrote {} ({} variables, {} clauses)",
                path.display(),
                encoder.num_vars(),
                encoder.num_clauses()
            );
        }
        None => encoder.write_dimacs(io::stdout().lock())?,
    }
    Ok(())
}

fn run_decode(
    board_path: &std::path::Path,
    shapes_path: Option<&std::path::Path>,
    result: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let (board, placements) = load_instance(board_path, shapes_path)?;
    let encoder = Encoder::new(board.len(), placements)?;

    let text = match result {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading solver output from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let literals = parse_solver_output(&text);
    let tiling = decode_tiling(encoder.var_map(), &literals)?;
    let unassigned = tiling.iter().filter(|cell| cell.is_none()).count();
    if unassigned > 0 {
        eprintln!("{unassigned} of {} cells unassigned", board.len());
    }
    print!("{}", format_tiling(&board, &tiling));
    Ok(())
}

fn run_solve(
    board_path: &std::path::Path,
    shapes_path: Option<&std::path::Path>,
    max: usize,
) -> anyhow::Result<()> {
    let (board, placements) = load_instance(board_path, shapes_path)?;
    let solutions = solver::solve(board.len(), &placements, Some(max));

    if solutions.is_empty() {
        println!("No tiling found");
        return Ok(());
    }
    for (index, solution) in solutions.iter().enumerate() {
        let mut assignment: Vec<Option<usize>> = vec![None; board.len()];
        for (shape, &placement) in solution.iter().enumerate() {
            for &cell in &placements[shape][placement] {
                assignment[cell] = Some(shape);
            }
        }
        println!("Tiling {}:", index + 1);
        print!("{}", format_tiling(&board, &assignment));
        println!();
    }
    Ok(())
}

/// Prints every built-in pentomino as a small ascii picture.
fn run_pieces() {
    for (name, offsets, rotations) in &pentominoes::PENTOMINOES {
        let min_x = offsets.iter().map(|&(x, _)| x).min().unwrap_or(0);
        let max_x = offsets.iter().map(|&(x, _)| x).max().unwrap_or(0);
        let min_y = offsets.iter().map(|&(_, y)| y).min().unwrap_or(0);
        let max_y = offsets.iter().map(|&(_, y)| y).max().unwrap_or(0);

        println!("{name} ({rotations} rotations)");
        for y in (min_y..=max_y).rev() {
            let row: String = (min_x..=max_x)
                .map(|x| if offsets.contains(&(x, y)) { '#' } else { ' ' })
                .collect();
            println!("  {row}");
        }
        println!();
    }
}
