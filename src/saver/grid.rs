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

//! Save and restore a maze grid.
//!
//! A saved maze can be rendered again later, with a different scale or palette, or solved if
//! it was saved before solving.
//!
//! The saved object is a serialization of the [`SavedMaze`] object in JSON format by using
//! [`serde`].
//! The grid cells are stored as one string of digits, one digit per cell, instead of a list of
//! enum names.

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::PathBuf;
use std::time::SystemTime;

use crate::generator::carver::Algorithm;
use crate::generator::grid::Grid;

/// Serialize and deserialize the cells of a [`Grid`] as a string of digits.
pub mod cells {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::generator::grid::CellState;

    /// Serialize the cells.
    pub fn serialize<S>(cells: &[CellState], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s: String = cells
            .iter()
            .map(|c| char::from(b'0' + *c as u8))
            .collect();
        serializer.serialize_str(&s)
    }

    /// Deserialize the cells.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<CellState>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = String::deserialize(deserializer)?;
        s.chars()
            .map(|ch| {
                ch.to_digit(10)
                    .and_then(|d| CellState::from_repr(d as u8))
                    .ok_or_else(|| D::Error::custom(format!("Unknown cell state `{ch}`")))
            })
            .collect()
    }
}

/// Maze and the parameters it was generated with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SavedMaze {
    /// When the maze was generated.
    pub created: SystemTime,

    /// Seed given to the carver.
    pub seed: u64,

    /// Carving algorithm.
    pub algorithm: Algorithm,

    /// Whether the solution is marked in the grid.
    pub solved: bool,

    /// Maze grid, with its sentinel border.
    pub grid: Grid,
}

impl SavedMaze {
    /// Create a [`SavedMaze`] object timestamped now.
    pub fn new(grid: Grid, seed: u64, algorithm: Algorithm, solved: bool) -> Self {
        Self {
            created: SystemTime::now(),
            seed,
            algorithm,
            solved,
            grid,
        }
    }

    /// Local date and time of the generation, for display.
    pub fn created_local(&self) -> String {
        let dt: DateTime<Local> = DateTime::from(self.created);
        format!("{}", dt.format("%c"))
    }
}

/// Object to save and restore a maze.
pub struct SaverGrid {
    /// Path to the save file.
    save_file: PathBuf,
}

impl SaverGrid {
    /// Create a [`SaverGrid`] object.
    pub fn new(save_file: PathBuf) -> Self {
        debug!("Grid file: {save_file:?}");
        Self { save_file }
    }

    /// Retrieve the saved [`SavedMaze`] object.
    ///
    /// Return the [`SavedMaze`] object or None if the file does not exist.
    pub fn get_grid(&self) -> Result<Option<SavedMaze>, Box<dyn Error>> {
        let file: File = match File::open(&self.save_file) {
            Ok(f) => f,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => return Ok(None),
                _ => return Err(Box::new(error)),
            },
        };
        let reader: BufReader<File> = BufReader::new(file);
        let maze: SavedMaze = serde_json::from_reader(reader)?;
        maze.grid.check()?;
        debug!(
            "Loaded {}x{} maze generated on {}",
            maze.grid.width(),
            maze.grid.height(),
            maze.created_local()
        );
        Ok(Some(maze))
    }

    /// Save the provided [`SavedMaze`] object.
    pub fn save_grid(&self, maze: &SavedMaze) -> Result<(), Box<dyn Error>> {
        let file: File = File::create(&self.save_file)?;
        let mut writer: BufWriter<File> = BufWriter::new(file);

        serde_json::to_writer(&mut writer, maze)?;
        writer.flush()?;
        Ok(())
    }
}
