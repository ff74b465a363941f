/*
carver.rs

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

//! Carve a random maze into a grid.
//!
//! Both algorithms are a randomized depth-first search over the rooms of the grid.
//! From the current room, the carver looks two cells away in a random direction. If the room
//! over there has not been visited yet, the wall cell in between is knocked down and the carver
//! moves to that room. When all the rooms around are visited, the carver backtracks.
//!
//! The result is a perfect maze: every room is reachable, and there is exactly one path between
//! any two rooms.

use clap::ValueEnum;
use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use super::grid::{CellState, Grid, GridError};

/// Largest number of rooms accepted by [`Algorithm::Recursive`]. Each room can add a level of
/// recursion, and the call stack of the thread is not resizable.
pub const MAX_RECURSIVE_ROOMS: usize = 2_500;

/// Moves to the four neighbor rooms, skipping the wall cell in between.
const DIRECTIONS: [(isize, isize); 4] = [(0, -2), (0, 2), (-2, 0), (2, 0)];

/// Carving algorithm.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum Algorithm {
    /// Iterative depth-first search with an explicit stack.
    #[default]
    Stack,

    /// Recursive depth-first search. The recursion depth grows with the number of rooms, so
    /// mazes are limited to [`MAX_RECURSIVE_ROOMS`] rooms.
    Recursive,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Algorithm::Stack => write!(f, "stack"),
            Algorithm::Recursive => write!(f, "recursive"),
        }
    }
}

/// Return a random even coordinate between 2 and `dimension - 3`.
pub fn random_start<R: Rng>(dimension: usize, rng: &mut R) -> usize {
    2 + rng.random_range(0..(dimension - 2) / 2) * 2
}

/// Return the coordinates reached from `(x, y)` by moving `(dx, dy)`.
pub(crate) fn step(x: usize, y: usize, dx: isize, dy: isize) -> Result<(usize, usize), GridError> {
    match (x.checked_add_signed(dx), y.checked_add_signed(dy)) {
        (Some(nx), Some(ny)) => Ok((nx, ny)),
        _ => Err(GridError::OutOfBounds { x, y }),
    }
}

/// [`Carver`] object.
pub struct Carver {
    /// Seed of the random number generator.
    /// Carving the same grid with the same seed and algorithm produces the same maze.
    pub seed: u64,

    /// Number of rooms carved by the last call to [`Carver::carve`].
    pub carved: usize,

    /// Deepest backtracking stack (or recursion) reached by the last call to [`Carver::carve`].
    pub max_depth: usize,

    /// Duration in seconds of the last carving.
    pub duration: f32,

    rng: StdRng,
}

impl Carver {
    /// Create the object.
    ///
    /// Without a seed, a random one is drawn, and is then available in [`Carver::seed`].
    pub fn new(seed: Option<u64>) -> Self {
        let seed: u64 = seed.unwrap_or_else(|| rand::rng().random());
        debug!("Carver seed = {seed}");
        Self {
            seed,
            carved: 0,
            max_depth: 0,
            duration: 0.0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Carve a maze into the given grid, which must be freshly initialized.
    ///
    /// Return the room the carving started from.
    ///
    /// # Errors
    ///
    /// The method returns an error if the grid is not laid out as [`Grid::new`] does, in which
    /// case the carver walks out of the grid, or if the grid has more than
    /// [`MAX_RECURSIVE_ROOMS`] rooms for the recursive algorithm. The grid is not modified in
    /// the second case.
    pub fn carve(
        &mut self,
        grid: &mut Grid,
        algorithm: Algorithm,
    ) -> Result<(usize, usize), GridError> {
        if algorithm == Algorithm::Recursive && grid.rooms() > MAX_RECURSIVE_ROOMS {
            return Err(GridError::TooManyRooms {
                rooms: grid.rooms(),
                limit: MAX_RECURSIVE_ROOMS,
            });
        }

        let start_time: Instant = Instant::now();
        self.carved = 0;
        self.max_depth = 0;

        let x: usize = random_start(grid.width(), &mut self.rng);
        let y: usize = random_start(grid.height(), &mut self.rng);
        debug!("Carving from room ({x}, {y}) with the {algorithm} algorithm");

        match algorithm {
            Algorithm::Stack => self.carve_stack(grid, x, y)?,
            Algorithm::Recursive => self.carve_recursive(grid, x, y, 1)?,
        }

        self.duration = start_time.elapsed().as_secs_f32();
        debug!(
            "Rooms = {}  Max depth = {}  Duration = {}",
            self.carved, self.max_depth, self.duration
        );
        Ok((x, y))
    }

    /// Depth-first carving with an explicit stack.
    fn carve_stack(&mut self, grid: &mut Grid, x: usize, y: usize) -> Result<(), GridError> {
        let mut stack: Vec<(usize, usize)> = Vec::new();

        grid.set(x, y, CellState::Visited)?;
        self.carved += 1;
        stack.push((x, y));
        self.max_depth = 1;

        while let Some(&(x, y)) = stack.last() {
            let mut directions: [(isize, isize); 4] = DIRECTIONS;
            directions.shuffle(&mut self.rng);

            let mut moved: bool = false;
            for (dx, dy) in directions {
                let (next_x, next_y) = step(x, y, dx, dy)?;
                if grid.get(next_x, next_y)? != CellState::Visited {
                    // Knock down the wall between the two rooms
                    let (mid_x, mid_y) = step(x, y, dx / 2, dy / 2)?;
                    grid.set(mid_x, mid_y, CellState::Visited)?;
                    grid.set(next_x, next_y, CellState::Visited)?;
                    self.carved += 1;
                    stack.push((next_x, next_y));
                    self.max_depth = self.max_depth.max(stack.len());
                    moved = true;
                    break;
                }
            }

            // Backtrack if no moves are possible
            if !moved {
                stack.pop();
            }
        }
        Ok(())
    }

    /// Depth-first carving by recursion.
    fn carve_recursive(
        &mut self,
        grid: &mut Grid,
        x: usize,
        y: usize,
        depth: usize,
    ) -> Result<(), GridError> {
        grid.set(x, y, CellState::Visited)?;
        self.carved += 1;
        self.max_depth = self.max_depth.max(depth);

        // Dead end
        let mut dead_end: bool = true;
        for (dx, dy) in DIRECTIONS {
            let (next_x, next_y) = step(x, y, dx, dy)?;
            if grid.get(next_x, next_y)? != CellState::Visited {
                dead_end = false;
                break;
            }
        }
        if dead_end {
            return Ok(());
        }

        // Try each direction once, in a random order
        let mut directions: [(isize, isize); 4] = DIRECTIONS;
        directions.shuffle(&mut self.rng);
        for (dx, dy) in directions {
            let (next_x, next_y) = step(x, y, dx, dy)?;
            if grid.get(next_x, next_y)? != CellState::Visited {
                let (mid_x, mid_y) = step(x, y, dx / 2, dy / 2)?;
                grid.set(mid_x, mid_y, CellState::Visited)?;
                self.carve_recursive(grid, next_x, next_y, depth + 1)?;
            }
        }
        Ok(())
    }
}
