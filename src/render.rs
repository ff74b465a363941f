/*
render.rs

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

//! Draw a maze grid into a [`Picture`].
//!
//! Each grid cell becomes one pixel. The picture is scaled afterward, see
//! [`crate::maze::scale_picture`].

use log::debug;
use std::error::Error;
use std::fmt;

use crate::generator::grid::{CellState, Grid};
use crate::picture::{Picture, Rgb};

/// Maze colors.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Palette {
    /// Solid walls.
    pub background: Rgb,

    /// Open passages and the sentinel border.
    pub passage: Rgb,

    /// Solution.
    pub path: Rgb,

    /// Cells explored by the solver but not part of the solution.
    pub wrong_path: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::BLACK,
            passage: Rgb::gray(50),
            path: Rgb::gray(127),
            wrong_path: Rgb::gray(50),
        }
    }
}

/// Type of errors.
#[derive(Debug, PartialEq)]
pub enum RenderError {
    /// The grid still has a room that the carver did not reach.
    UnreachedRoom { x: usize, y: usize },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RenderError::UnreachedRoom { x, y } => {
                write!(f, "Room ({x}, {y}) has not been carved")
            }
        }
    }
}

impl Error for RenderError {}

/// Draw the grid, one pixel per cell.
///
/// # Errors
///
/// The function returns an error if the grid has not been carved.
pub fn grid_to_picture(grid: &Grid, palette: &Palette) -> Result<Picture, RenderError> {
    let mut picture: Picture = Picture::new(grid.width(), grid.height(), palette.background);

    for (y, row) in grid.rows().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            match cell {
                CellState::Unvisited => (),
                CellState::Visited => picture.set(x, y, palette.passage),
                CellState::WrongPath => picture.set(x, y, palette.wrong_path),
                CellState::Path => picture.set(x, y, palette.path),
                CellState::Wall => return Err(RenderError::UnreachedRoom { x, y }),
            }
        }
    }
    debug!("Rendered {}x{} grid", grid.width(), grid.height());
    Ok(picture)
}
