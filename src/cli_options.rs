/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Mazekit.

Mazekit is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Mazekit is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Mazekit. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! # Examples
//!
//! Generate a solved 101x101 maze, scaled four times:
//!
//! ```
//! $ mazekit maze --scale 4 --output maze.png --timings
//! Maze 101x101 (seed 8839126620391453571, stack) saved to maze.png (404x404)
//! Solution: 1007 cells, 1336 cells backtracked
//! ------------------------------------
//! initializeMaze:    0.041 ms | 0.0%
//! carve         :    1.337 ms | 3.1%
//! ...
//! ```
//!
//! Replay the same maze with the recursive algorithm, and keep the grid for later:
//!
//! ```
//! $ mazekit maze --seed 8839126620391453571 -a recursive --save-grid maze.json
//! ```
//!
//! Evaluate an expression:
//!
//! ```
//! $ mazekit eval "2.9 / 3 * 34 - 6 + 3 / 4"
//!           Answer: 27.61666666666667
//! ```
//!
//! Without an expression, `mazekit eval` prompts for one until a valid expression is entered.

use clap::{Parser, Subcommand};
use log::debug;
use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::expression::{self, ExpressionError};
use crate::generator::carver::Algorithm;
use crate::maze::{self, MazeOptions, MazeReport};
use crate::picture::{Picture, PictureError};
use crate::render::Palette;

/// Generate mazes, and evaluate arithmetic expressions.
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Enable debug messages
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random maze and save it as a PNG image
    Maze(MazeArgs),

    /// Evaluate an arithmetic expression (+, -, *, /, and parentheses)
    Eval {
        /// Expression to evaluate. Prompt for it if not provided
        expression: Option<String>,
    },

    /// Resize a PNG image, optionally converting it to gray levels
    Picture {
        /// PNG image to read
        input: PathBuf,

        /// PNG image to create
        #[arg(short, long)]
        output: PathBuf,

        /// Scaling factor (bilinear interpolation)
        #[arg(short, long, default_value_t = 1.0)]
        scale: f32,

        /// Convert the image to gray levels
        #[arg(short, long, default_value_t = false)]
        gray: bool,
    },
}

#[derive(clap::Args)]
struct MazeArgs {
    /// Maze width in cells (rounded up to an odd number, 5 or greater)
    #[arg(short = 'W', long, default_value_t = 101)]
    width: usize,

    /// Maze height in cells (rounded up to an odd number, 5 or greater)
    #[arg(short = 'H', long, default_value_t = 101)]
    height: usize,

    /// Seed for the random generator, to reproduce a maze
    #[arg(short, long)]
    seed: Option<u64>,

    /// Carving algorithm
    #[arg(value_enum, short, long, default_value_t = Algorithm::Stack)]
    algorithm: Algorithm,

    /// Do not mark the solution
    #[arg(long, default_value_t = false)]
    no_solve: bool,

    /// Remove the outer border from the picture
    #[arg(long, default_value_t = false)]
    strip_border: bool,

    /// Picture scaling factor
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Margin around the maze, in pixels
    #[arg(long, default_value_t = 0)]
    margin: usize,

    /// PNG image to create
    #[arg(short, long, default_value = "maze.png")]
    output: PathBuf,

    /// Save the maze grid to this JSON file
    #[arg(long)]
    save_grid: Option<PathBuf>,

    /// Draw the maze grid from this JSON file instead of generating a new maze
    #[arg(long, conflicts_with_all = ["seed", "algorithm", "width", "height"])]
    load_grid: Option<PathBuf>,

    /// Print the time spent in each step
    #[arg(short, long, default_value_t = false)]
    timings: bool,
}

impl From<MazeArgs> for MazeOptions {
    fn from(args: MazeArgs) -> Self {
        Self {
            width: args.width,
            height: args.height,
            seed: args.seed,
            algorithm: args.algorithm,
            solve: !args.no_solve,
            strip_border: args.strip_border,
            scale: args.scale,
            margin: args.margin,
            palette: Palette::default(),
            output: args.output,
            save_grid: args.save_grid,
            load_grid: args.load_grid,
        }
    }
}

/// Parse and process command-line options. Return the process exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match args.command {
        Command::Maze(maze_args) => run_maze(maze_args),
        Command::Eval { expression } => run_eval(expression),
        Command::Picture {
            input,
            output,
            scale,
            gray,
        } => match run_picture(&input, &output, scale, gray) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{}: {e}", input.display());
                1
            }
        },
    }
}

/// Generate the maze and print a summary.
fn run_maze(args: MazeArgs) -> u8 {
    let print_timings: bool = args.timings;
    let options: MazeOptions = MazeOptions::from(args);
    debug!("{options:?}");

    let report: MazeReport = match maze::build(&options) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            return 1;
        }
    };

    println!(
        "Maze {}x{} (seed {}, {}) saved to {} ({}x{})",
        report.grid.width(),
        report.grid.height(),
        report.seed,
        report.algorithm,
        options.output.display(),
        report.picture_size.0,
        report.picture_size.1
    );
    if let Some(solution) = report.solution {
        println!(
            "Solution: {} cells, {} cells backtracked",
            solution.path_length, solution.backtracked
        );
    }
    if print_timings {
        println!("{}", report.timings.report());
    }
    0
}

/// Evaluate the expression given on the command line, or prompt for one.
fn run_eval(expression: Option<String>) -> u8 {
    let result: Result<f64, ExpressionError> = match expression {
        Some(e) => expression::evaluate_str(&e),
        None => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            match prompt_expression(stdin.lock(), &mut stdout) {
                Ok(Some(r)) => r,
                Ok(None) => return 0,
                Err(e) => {
                    eprintln!("{e}");
                    return 1;
                }
            }
        }
    };

    match result {
        Ok(value) => {
            println!("{}", format_answer(value));
            0
        }
        Err(e) => {
            eprintln!("{e}");
            1
        }
    }
}

/// Right-align the `Answer: ` label in 18 columns and print the value in full precision.
fn format_answer(value: f64) -> String {
    format!("{:>18}{value}", "Answer: ")
}

/// Prompt until a well-formed expression is entered, then return its evaluation.
///
/// Return `None` at the end of the input.
fn prompt_expression<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
) -> io::Result<Option<Result<f64, ExpressionError>>> {
    let mut line: String = String::new();
    loop {
        write!(output, "Enter Expression: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }
        let text: &str = line.trim_end_matches(['\n', '\r']);
        if text.is_empty() {
            writeln!(output, "No characters entered.")?;
            continue;
        }

        match expression::evaluate_str(text) {
            Err(e @ ExpressionError::Invalid(_)) => writeln!(output, "{e}")?,
            r => return Ok(Some(r)),
        }
    }
}

/// Resize a PNG file.
fn run_picture(
    input: &PathBuf,
    output: &PathBuf,
    scale: f32,
    gray: bool,
) -> Result<(), PictureError> {
    let mut picture: Picture = Picture::open(input)?;
    if gray {
        picture = Picture::from_grays(&picture.grays());
    }
    let resized: Picture = picture.bilinear_resize(scale)?;
    resized.save(output)?;
    println!(
        "{} ({}x{}) saved to {} ({}x{})",
        input.display(),
        picture.width(),
        picture.height(),
        output.display(),
        resized.width(),
        resized.height()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::evaluate::EvalError;
    use crate::picture::Rgb;
    use clap::CommandFactory;
    use std::io::Cursor;

    fn prompt(input: &str) -> (Option<Result<f64, ExpressionError>>, String) {
        let mut output: Vec<u8> = Vec::new();
        let result = prompt_expression(Cursor::new(input), &mut output).unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn command_line_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn maze_arguments() {
        let args: Args =
            Args::try_parse_from(["mazekit", "maze", "-W", "20", "--seed", "5", "-a", "recursive"])
                .unwrap();
        let Command::Maze(maze_args) = args.command else {
            panic!("maze subcommand expected");
        };
        let options: MazeOptions = MazeOptions::from(maze_args);
        assert_eq!(options.width, 20);
        assert_eq!(options.height, 101);
        assert_eq!(options.seed, Some(5));
        assert_eq!(options.algorithm, Algorithm::Recursive);
        assert!(options.solve);

        assert!(
            Args::try_parse_from(["mazekit", "maze", "--load-grid", "g.json", "--seed", "1"])
                .is_err()
        );
    }

    #[test]
    fn answer_keeps_every_digit() {
        assert_eq!(format_answer(12.0), "          Answer: 12");
        assert_eq!(format_answer(0.1 + 0.2), "          Answer: 0.30000000000000004");
        assert_eq!(format_answer(-2.5), "          Answer: -2.5");
    }

    #[test]
    fn prompt_retries_until_valid() {
        let (result, output) = prompt("\n3 +\n(1 + 2) * 4\n");
        assert_eq!(result, Some(Ok(12.0)));
        assert_eq!(
            output,
            "Enter Expression: No characters entered.\n\
             Enter Expression: Invalid Expression: ends with an operator\n\
             Enter Expression: "
        );
    }

    #[test]
    fn prompt_returns_evaluation_errors() {
        let (result, _) = prompt("1 / 0\n");
        assert_eq!(
            result,
            Some(Err(ExpressionError::Eval(EvalError::DivisionByZero)))
        );
    }

    #[test]
    fn prompt_stops_at_end_of_input() {
        let (result, output) = prompt("*\n");
        assert_eq!(result, None);
        assert!(output.ends_with("Enter Expression: \n"));
    }

    #[test]
    fn picture_resize_and_gray() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let input: PathBuf = dir.path().join("in.png");
        let output: PathBuf = dir.path().join("out.png");
        Picture::new(4, 2, Rgb::new(255, 0, 0)).save(&input).unwrap();

        run_picture(&input, &output, 0.5, true).unwrap();
        let result: Picture = Picture::open(&output).unwrap();
        assert_eq!((result.width(), result.height()), (2, 1));
        assert_eq!(result.pixel(0, 0), Some(Rgb::gray(54)));
    }
}
