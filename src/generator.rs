/*
generator.rs

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

//! Carve and solve random mazes.
//!
//! A maze is stored in a [`grid::Grid`] object: a rectangle of cells with odd dimensions,
//! where each cell has a [`grid::CellState`].
//! Rooms sit where both coordinates are even, with wall cells in between.
//! The outermost ring of the grid is a sentinel border that stops the walks.
//!
//! * [`carver::Carver`] opens walls between rooms with a randomized depth-first walk,
//!   which produces a perfect maze: exactly one route joins any two rooms.
//!   The carver can use an explicit stack or recursion, see [`carver::Algorithm`].
//!
//! * [`solver::solve`] walks the maze from the entrance until it reaches the border.
//!   It marks the solution cells as [`grid::CellState::Path`] and the dead ends it explored
//!   as [`grid::CellState::WrongPath`].

pub mod carver;
pub mod grid;
pub mod solver;
