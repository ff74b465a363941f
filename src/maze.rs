/*
maze.rs

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

//! Generate, solve, and draw a maze.
//!
//! [`build`] runs the whole pipeline for a [`MazeOptions`] object:
//!
//! 1. Create and carve a new grid, or load a grid saved previously.
//! 2. Solve the maze.
//! 3. Optionally save the grid, see [`crate::saver::grid`].
//! 4. Draw the grid, scale the picture, surround it with a margin, and save it as PNG.
//!
//! Each step is timed with [`Timings`].

use log::{debug, info};
use std::error::Error;
use std::path::PathBuf;

use crate::generator::carver::{Algorithm, Carver};
use crate::generator::grid::{CellState, Grid};
use crate::generator::solver::{self, SolveOutcome};
use crate::picture::{Picture, PictureError};
use crate::render::{self, Palette};
use crate::saver::grid::{SavedMaze, SaverGrid};
use crate::timer::Timings;

/// Parameters of the maze pipeline.
#[derive(Debug, Clone)]
pub struct MazeOptions {
    /// Grid width in cells, rounded up to an odd number.
    pub width: usize,

    /// Grid height in cells, rounded up to an odd number.
    pub height: usize,

    /// Seed for the carver. A random seed is used when `None`.
    pub seed: Option<u64>,

    pub algorithm: Algorithm,

    /// Whether to mark the solution in the maze.
    pub solve: bool,

    /// Whether to drop the sentinel border from the picture.
    pub strip_border: bool,

    /// Picture scaling factor. Whole numbers give crisp cells, other values use bilinear
    /// interpolation.
    pub scale: f32,

    /// Margin in pixels around the scaled maze, in the background color.
    pub margin: usize,

    pub palette: Palette,

    /// PNG file to create.
    pub output: PathBuf,

    /// JSON file where to save the grid.
    pub save_grid: Option<PathBuf>,

    /// JSON file from where to load a grid instead of carving a new one.
    pub load_grid: Option<PathBuf>,
}

impl Default for MazeOptions {
    fn default() -> Self {
        Self {
            width: 101,
            height: 101,
            seed: None,
            algorithm: Algorithm::Stack,
            solve: true,
            strip_border: false,
            scale: 1.0,
            margin: 0,
            palette: Palette::default(),
            output: PathBuf::from("maze.png"),
            save_grid: None,
            load_grid: None,
        }
    }
}

/// What [`build`] produced.
#[derive(Debug)]
pub struct MazeReport {
    /// Seed the maze was carved with.
    pub seed: u64,

    pub algorithm: Algorithm,

    /// Final grid, with its sentinel border.
    pub grid: Grid,

    /// Solver statistics, if the maze was solved during this run.
    pub solution: Option<SolveOutcome>,

    /// Size of the saved picture.
    pub picture_size: (usize, usize),

    /// Time spent in each step.
    pub timings: Timings,
}

/// Scale the picture: pixel replication for whole factors, bilinear interpolation otherwise.
pub fn scale_picture(picture: &Picture, factor: f32) -> Result<Picture, PictureError> {
    if factor >= 1.0 && factor.fract() == 0.0 && factor <= usize::MAX as f32 {
        picture.nearest_resize(factor as usize)
    } else {
        picture.bilinear_resize(factor)
    }
}

/// Run the maze pipeline.
///
/// # Errors
///
/// The function returns an error if the dimensions are too small, if the grid file cannot be
/// read or written, or if the picture cannot be saved.
pub fn build(options: &MazeOptions) -> Result<MazeReport, Box<dyn Error>> {
    let mut timings: Timings = Timings::new();

    let (mut grid, seed, algorithm, mut solved) = match &options.load_grid {
        Some(path) => {
            let maze: SavedMaze = SaverGrid::new(path.clone())
                .get_grid()?
                .ok_or_else(|| format!("{}: no such file", path.display()))?;
            info!(
                "Loaded maze carved on {} with seed {}",
                maze.created_local(),
                maze.seed
            );
            (maze.grid, maze.seed, maze.algorithm, maze.solved)
        }
        None => {
            let mut grid: Grid =
                timings.measure("initializeMaze", || Grid::new(options.width, options.height))?;
            let mut carver: Carver = Carver::new(options.seed);
            timings.measure("carve", || carver.carve(&mut grid, options.algorithm))?;
            (grid, carver.seed, options.algorithm, false)
        }
    };

    let mut solution: Option<SolveOutcome> = None;
    if options.solve && !solved {
        solution = Some(timings.measure("solveMaze", || solver::solve(&mut grid))?);
        solved = true;
    }
    debug!(
        "Maze {}x{}: {} path cells",
        grid.width(),
        grid.height(),
        grid.count(CellState::Path)
    );
    grid.debug();

    if let Some(path) = &options.save_grid {
        let maze: SavedMaze = SavedMaze::new(grid.clone(), seed, algorithm, solved);
        timings.measure("saveGrid", || SaverGrid::new(path.clone()).save_grid(&maze))?;
    }

    let picture: Picture = timings.measure("createPicture", || {
        let drawn: Grid = if options.strip_border {
            grid.remove_border()
        } else {
            grid.clone()
        };
        render::grid_to_picture(&drawn, &options.palette)
    })?;
    let mut picture: Picture = timings.measure("scale", || scale_picture(&picture, options.scale))?;

    if options.margin > 0 {
        let mut canvas: Picture = Picture::new(
            picture.width() + 2 * options.margin,
            picture.height() + 2 * options.margin,
            options.palette.background,
        );
        canvas.add(&picture, options.margin, options.margin);
        picture = canvas;
    }

    timings.measure("save", || picture.save(&options.output))?;

    Ok(MazeReport {
        seed,
        algorithm,
        grid,
        solution,
        picture_size: (picture.width(), picture.height()),
        timings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picture::Rgb;

    fn options(dir: &tempfile::TempDir) -> MazeOptions {
        MazeOptions {
            width: 21,
            height: 15,
            seed: Some(2024),
            output: dir.path().join("maze.png"),
            ..MazeOptions::default()
        }
    }

    #[test_log::test]
    fn builds_and_saves_a_solved_maze() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let opts: MazeOptions = options(&dir);
        let report: MazeReport = build(&opts).unwrap();

        assert_eq!(report.seed, 2024);
        assert_eq!(report.picture_size, (21, 15));
        assert!(report.solution.is_some());
        assert!(report.timings.report().contains("solveMaze"));

        let picture: Picture = Picture::open(&opts.output).unwrap();
        assert_eq!((picture.width(), picture.height()), (21, 15));
        assert_eq!(picture.pixel(1, 2), Some(Rgb::gray(127)), "entrance is on the path");
        assert_eq!(picture.pixel(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn strip_scale_and_margin() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let opts: MazeOptions = MazeOptions {
            solve: false,
            strip_border: true,
            scale: 3.0,
            margin: 2,
            ..options(&dir)
        };
        let report: MazeReport = build(&opts).unwrap();

        assert!(report.solution.is_none());
        assert_eq!(report.grid.count(CellState::Path), 0);
        assert_eq!(report.picture_size, (19 * 3 + 4, 13 * 3 + 4));

        let picture: Picture = Picture::open(&opts.output).unwrap();
        assert_eq!(picture.pixel(0, 0), Some(Rgb::BLACK), "margin");
        assert_eq!(picture.pixel(2, 2), Some(Rgb::BLACK), "solid wall corner");
        // Entrance, at (0, 1) once the border is stripped
        assert_eq!(picture.pixel(2, 2 + 3), Some(Rgb::gray(50)));
    }

    #[test]
    fn save_then_load_grid() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let grid_file: PathBuf = dir.path().join("grid.json");
        let first: MazeReport = build(&MazeOptions {
            solve: false,
            save_grid: Some(grid_file.clone()),
            ..options(&dir)
        })
        .unwrap();

        let second: MazeReport = build(&MazeOptions {
            seed: None,
            load_grid: Some(grid_file.clone()),
            save_grid: Some(grid_file.clone()),
            output: dir.path().join("solved.png"),
            ..options(&dir)
        })
        .unwrap();
        assert_eq!(second.seed, first.seed);
        assert!(second.solution.is_some(), "the loaded maze was not solved yet");

        // Solved grids are not solved again
        let third: MazeReport = build(&MazeOptions {
            load_grid: Some(grid_file),
            ..options(&dir)
        })
        .unwrap();
        assert!(third.solution.is_none());
        assert_eq!(third.grid, second.grid);
    }

    #[test]
    fn missing_grid_file() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let opts: MazeOptions = MazeOptions {
            load_grid: Some(dir.path().join("nothing.json")),
            ..options(&dir)
        };
        assert!(build(&opts).unwrap_err().to_string().contains("no such file"));
    }

    #[test]
    fn too_small() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let opts: MazeOptions = MazeOptions {
            width: 3,
            ..options(&dir)
        };
        assert!(build(&opts).is_err());
    }

    #[test]
    fn fractional_scale_uses_bilinear() {
        let picture: Picture = Picture::from_grays(&[vec![0, 100], vec![100, 0]]);
        assert_eq!(scale_picture(&picture, 2.0).unwrap().red(1, 1), 0);
        assert_eq!(scale_picture(&picture, 1.5).unwrap().width(), 3);
        assert!(scale_picture(&picture, -1.0).is_err());
    }
}
