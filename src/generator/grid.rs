/*
grid.rs

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

//! Cell grid of a maze.
//!
//! The grid uses one cell for rooms and one cell for the walls between them.
//! Rooms sit at the positions where both coordinates are even, so a maze with
//! `n` rooms per row is `2n + 3` cells wide: the rooms, the walls between them,
//! one column of solid wall on each side, and a one cell sentinel border.
//!
//! A new 9x7 grid, as dumped by [`Grid::to_ascii`]:
//!
//! ```text
//! .........     . sentinel border and openings (Visited)
//! .#######.     # solid wall material (Unvisited)
//! ..?#?#?#.     ? room not yet reached by the carver (Wall)
//! .#######.
//! .#?#?#?..
//! .#######.
//! .........
//! ```
//!
//! (`to_ascii` prints passages as spaces.)
//!
//! The sentinel border is marked as visited, so that the carver never needs to check the grid
//! bounds: a step of two cells from any room lands either on another room or on the border.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use strum_macros::FromRepr;

/// Smallest accepted grid dimension. Smaller grids do not have any room.
pub const MIN_DIMENSION: usize = 5;

/// State of a grid cell.
///
/// - A `Wall` cell is a room that the carver has not reached yet. No such cell remains after
///   carving.
/// - An `Unvisited` cell is solid wall material.
/// - A `Visited` cell is an open passage. The sentinel border is also `Visited`.
/// - A `Path` cell is part of the solution found by the solver.
/// - A `WrongPath` cell has been explored by the solver and abandoned.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default, FromRepr)]
#[repr(u8)]
pub enum CellState {
    Wall,
    #[default]
    Unvisited,
    Visited,
    Path,
    WrongPath,
}

impl CellState {
    /// Character used in the text dump of the grid.
    pub fn as_char(self) -> char {
        match self {
            CellState::Wall => '?',
            CellState::Unvisited => '#',
            CellState::Visited => ' ',
            CellState::Path => '.',
            CellState::WrongPath => 'x',
        }
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum GridError {
    /// Width or height below [`MIN_DIMENSION`].
    TooSmall { width: usize, height: usize },

    /// Coordinates outside the grid.
    OutOfBounds { x: usize, y: usize },

    /// The number of cells does not match the dimensions.
    SizeMismatch { expected: usize, found: usize },

    /// The number of cells does not fit in memory.
    TooLarge { width: usize, height: usize },

    /// Too many rooms for the recursive carver.
    TooManyRooms { rooms: usize, limit: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GridError::TooSmall { width, height } => write!(
                f,
                "Both width and height must be greater than {} (got {width}x{height})",
                MIN_DIMENSION - 1
            ),
            GridError::OutOfBounds { x, y } => write!(f, "Cell ({x}, {y}) is outside the grid"),
            GridError::SizeMismatch { expected, found } => {
                write!(f, "The grid should have {expected} cells, but has {found}")
            }
            GridError::TooLarge { width, height } => {
                write!(f, "A {width}x{height} grid is too large")
            }
            GridError::TooManyRooms { rooms, limit } => write!(
                f,
                "The maze has {rooms} rooms, but the recursive algorithm is limited to {limit}"
            ),
        }
    }
}

impl Error for GridError {}

/// Maze grid, stored row by row.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Grid {
    /// Number of columns.
    width: usize,

    /// Number of rows.
    height: usize,

    /// Cells, row-major.
    #[serde(with = "crate::saver::grid::cells")]
    cells: Vec<CellState>,
}

impl Grid {
    /// Create an initialized grid.
    ///
    /// Even dimensions are rounded up to the next odd number.
    ///
    /// # Errors
    ///
    /// The method returns an error if the width or the height is below [`MIN_DIMENSION`].
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        let width: usize = width | 1;
        let height: usize = height | 1;

        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(GridError::TooSmall { width, height });
        }

        let size: usize = width
            .checked_mul(height)
            .ok_or(GridError::TooLarge { width, height })?;

        let mut grid: Grid = Self {
            width,
            height,
            cells: vec![CellState::Unvisited; size],
        };
        grid.initialize();
        debug!("Grid initialized: {width}x{height}");
        Ok(grid)
    }

    /// Verify that the number of cells matches the dimensions, for grids read from a file.
    ///
    /// # Errors
    ///
    /// The method returns an error if the grid is inconsistent.
    pub fn check(&self) -> Result<(), GridError> {
        if self.width < MIN_DIMENSION || self.height < MIN_DIMENSION {
            return Err(GridError::TooSmall {
                width: self.width,
                height: self.height,
            });
        }
        let expected: usize =
            self.width
                .checked_mul(self.height)
                .ok_or(GridError::TooLarge {
                    width: self.width,
                    height: self.height,
                })?;
        if self.cells.len() != expected {
            return Err(GridError::SizeMismatch {
                expected,
                found: self.cells.len(),
            });
        }
        Ok(())
    }

    /// Lay out the rooms, the sentinel border, and the two openings.
    fn initialize(&mut self) {
        let (width, height) = (self.width, self.height);

        // Rooms that the carver must reach
        for y in (2..height - 2).step_by(2) {
            for x in (2..width - 2).step_by(2) {
                self.cells[y * width + x] = CellState::Wall;
            }
        }

        // Sentinel border
        for x in 0..width {
            self.cells[x] = CellState::Visited;
            self.cells[(height - 1) * width + x] = CellState::Visited;
        }
        for y in 0..height {
            self.cells[y * width] = CellState::Visited;
            self.cells[y * width + width - 1] = CellState::Visited;
        }

        // Entrance and exit
        let (x, y) = self.entrance();
        self.cells[y * width + x] = CellState::Visited;
        let (x, y) = self.exit();
        self.cells[y * width + x] = CellState::Visited;
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Opening in the left side of the maze.
    pub fn entrance(&self) -> (usize, usize) {
        (1, 2)
    }

    /// Opening in the right side of the maze.
    pub fn exit(&self) -> (usize, usize) {
        (self.width - 2, self.height - 3)
    }

    /// Number of rooms, carved or not.
    pub fn rooms(&self) -> usize {
        ((self.width - 3) / 2) * ((self.height - 3) / 2)
    }

    /// Whether the coordinates are inside the grid.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Return the state of a cell.
    ///
    /// # Errors
    ///
    /// The method returns an error if the coordinates are outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Result<CellState, GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        Ok(self.cells[y * self.width + x])
    }

    /// Set the state of a cell.
    ///
    /// # Errors
    ///
    /// The method returns an error if the coordinates are outside the grid.
    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<(), GridError> {
        if !self.contains(x, y) {
            return Err(GridError::OutOfBounds { x, y });
        }
        self.cells[y * self.width + x] = state;
        Ok(())
    }

    /// Return the number of cells with the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| **c == state).count()
    }

    /// Iterate over the rows of the grid.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.width)
    }

    /// Return a copy of the grid without its outermost ring of cells.
    ///
    /// The sentinel border is only needed while carving and solving.
    pub fn remove_border(&self) -> Grid {
        let width: usize = self.width.saturating_sub(2);
        let height: usize = self.height.saturating_sub(2);
        let mut cells: Vec<CellState> = Vec::with_capacity(width * height);

        for row in self.rows().skip(1).take(height) {
            cells.extend_from_slice(&row[1..=width]);
        }
        Grid {
            width,
            height,
            cells,
        }
    }

    /// Return a text representation of the grid, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut s: String = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            s.extend(row.iter().map(|c| c.as_char()));
            s.push('\n');
        }
        s
    }

    /// Print the grid in the debug log.
    pub fn debug(&self) {
        if log_enabled!(Level::Debug) {
            for line in self.to_ascii().lines() {
                debug!("{line}");
            }
        }
    }
}
