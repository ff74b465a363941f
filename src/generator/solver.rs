/*
solver.rs

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

//! Find the way out of a carved maze.
//!
//! The solver walks depth-first from the entrance, always trying the directions in the same
//! order: down, right, up, left. Cells on the current walk are marked as [`CellState::Path`].
//! When the walk reaches a dead end, the cells are marked as [`CellState::WrongPath`] while
//! backtracking.
//!
//! The maze is left through the exit opening: as soon as the walk steps onto the sentinel
//! border, the solver stops. What remains marked as [`CellState::Path`] is the solution.

use log::debug;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use super::carver::step;
use super::grid::{CellState, Grid, GridError, MIN_DIMENSION};

/// Neighbor cells, in the order the solver tries them.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum SolveError {
    /// Every reachable cell has been explored without finding the exit.
    NoExit,

    /// The grid is too small or the walk left the grid, which only happens for grids without a
    /// sentinel border.
    Grid(GridError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolveError::NoExit => write!(f, "The maze has no exit"),
            SolveError::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl Error for SolveError {}

impl From<GridError> for SolveError {
    fn from(e: GridError) -> Self {
        SolveError::Grid(e)
    }
}

/// Result of a successful walk.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolveOutcome {
    /// Cell on the sentinel border where the walk left the maze.
    pub escaped_at: (usize, usize),

    /// Number of cells in the solution.
    pub path_length: usize,

    /// Number of cells explored and abandoned.
    pub backtracked: usize,

    /// Duration in seconds of the walk.
    pub duration: f32,
}

/// Walk from the entrance of the grid until the exit is found.
///
/// The grid cells are updated with the [`CellState::Path`] and [`CellState::WrongPath`] states.
///
/// # Errors
///
/// The function returns [`SolveError::NoExit`] if the exit cannot be reached. In that case the
/// walk eventually backs out through the entrance, and all the explored cells are marked as
/// [`CellState::WrongPath`].
pub fn solve(grid: &mut Grid) -> Result<SolveOutcome, SolveError> {
    let start_time: Instant = Instant::now();
    let (width, height) = (grid.width(), grid.height());
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(SolveError::Grid(GridError::TooSmall { width, height }));
    }
    let mut backtracked: usize = 0;
    let mut stack: Vec<(usize, usize)> = vec![grid.entrance()];

    while let Some(&(x, y)) = stack.last() {
        // Stepping onto the border means the walk went through an opening
        if x < 1 || x > width - 2 || y < 1 || y > height - 2 {
            // Backed out through the entrance: everything has been explored
            if stack.len() <= 2 {
                let (entrance_x, entrance_y) = grid.entrance();
                grid.set(entrance_x, entrance_y, CellState::WrongPath)?;
                debug!("No exit after backtracking over {} cells", backtracked + 1);
                return Err(SolveError::NoExit);
            }
            let outcome: SolveOutcome = SolveOutcome {
                escaped_at: (x, y),
                path_length: stack.len() - 1,
                backtracked,
                duration: start_time.elapsed().as_secs_f32(),
            };
            debug!("Solved: {outcome:?}");
            return Ok(outcome);
        }

        grid.set(x, y, CellState::Path)?;

        let mut moved: bool = false;
        for (dx, dy) in DIRECTIONS {
            let (next_x, next_y) = step(x, y, dx, dy)?;
            if grid.get(next_x, next_y)? == CellState::Visited {
                stack.push((next_x, next_y));
                moved = true;
                break;
            }
        }

        if !moved {
            grid.set(x, y, CellState::WrongPath)?;
            backtracked += 1;
            stack.pop();
        }
    }
    debug!("No exit after backtracking over {backtracked} cells");
    Err(SolveError::NoExit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::carver::{Algorithm, Carver};

    fn carved(width: usize, height: usize, seed: u64) -> Grid {
        let mut grid: Grid = Grid::new(width, height).unwrap();
        Carver::new(Some(seed))
            .carve(&mut grid, Algorithm::Stack)
            .unwrap();
        grid
    }

    #[test_log::test]
    fn leaves_through_the_exit() {
        for seed in 0..20 {
            let mut grid: Grid = carved(31, 21, seed);
            let outcome: SolveOutcome = solve(&mut grid).unwrap();
            let (exit_x, exit_y) = grid.exit();

            assert_eq!(outcome.escaped_at, (exit_x + 1, exit_y), "seed {seed}");
            assert_eq!(grid.get(exit_x, exit_y), Ok(CellState::Path));
            assert_eq!(grid.get(1, 2), Ok(CellState::Path));
            assert_eq!(grid.count(CellState::Path), outcome.path_length);
            assert_eq!(grid.count(CellState::WrongPath), outcome.backtracked);
        }
    }

    #[test]
    fn solution_is_a_corridor() {
        let mut grid: Grid = carved(41, 41, 99);
        solve(&mut grid).unwrap();

        // Apart from both ends, each path cell touches exactly two other path cells
        let (entrance, exit) = (grid.entrance(), grid.exit());
        for y in 1..grid.height() - 1 {
            for x in 1..grid.width() - 1 {
                if grid.get(x, y) != Ok(CellState::Path) {
                    continue;
                }
                let neighbors: usize = [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]
                    .iter()
                    .filter(|(nx, ny)| grid.get(*nx, *ny) == Ok(CellState::Path))
                    .count();
                if (x, y) == entrance || (x, y) == exit {
                    assert_eq!(neighbors, 1, "end ({x}, {y})");
                } else {
                    assert_eq!(neighbors, 2, "cell ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn closed_maze_has_no_exit() {
        let mut grid: Grid = carved(11, 11, 5);
        let (x, y) = grid.exit();
        grid.set(x, y, CellState::Unvisited).unwrap();

        assert_eq!(solve(&mut grid), Err(SolveError::NoExit));
        assert_eq!(grid.count(CellState::Path), 0);
        assert_eq!(grid.get(1, 2), Ok(CellState::WrongPath));
    }
}
