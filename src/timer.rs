/*
timer.rs

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

//! Measure how long each phase of the maze generation takes.
//!
//! Wrap each phase in [`Timings::measure`]. Measuring the same label several times adds up the
//! durations. [`Timings::report`] returns a table with the total per label and its share of the
//! time elapsed since the [`Timings`] object was created.

use log::debug;
use std::time::Instant;

/// Width reserved for the millisecond values in the report.
const EXPECTED_MAX_DIGITS: usize = 8;

/// Accumulated phase durations.
#[derive(Debug)]
pub struct Timings {
    /// When the measurements started.
    start: Instant,

    /// Label and total duration in milliseconds, in the order the labels were first measured.
    data: Vec<(String, f64)>,
}

impl Default for Timings {
    fn default() -> Self {
        Self::new()
    }
}

impl Timings {
    /// Create a [`Timings`] object. The global clock starts now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            data: Vec::new(),
        }
    }

    /// Run `f` and add its duration to the total for `label`.
    pub fn measure<T, F: FnOnce() -> T>(&mut self, label: &str, f: F) -> T {
        let start: Instant = Instant::now();
        let ret: T = f();
        let elapsed: f64 = start.elapsed().as_secs_f64() * 1000.0;
        debug!("{label}: {elapsed:.3} ms");

        match self.data.iter_mut().find(|(l, _)| l == label) {
            Some((_, total)) => *total += elapsed,
            None => self.data.push((label.to_string(), elapsed)),
        }
        ret
    }

    /// Return the report table.
    pub fn report(&self) -> String {
        let global: f64 = self.start.elapsed().as_secs_f64() * 1000.0;
        self.format_report(global)
    }

    fn format_report(&self, global: f64) -> String {
        let label_width: usize = self.data.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        let digits: usize = EXPECTED_MAX_DIGITS;
        let border: String = "-".repeat(label_width + digits + 14);

        let mut s: String = format!("{border}\n");
        for (label, ms) in &self.data {
            let share: f64 = if global > 0.0 {
                ms / global * 100.0
            } else {
                0.0
            };
            s.push_str(&format!(
                "{label:<label_width$}: {ms:>digits$.3} ms | {share:.1}%\n"
            ));
        }
        s.push_str(&border);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_returns_the_closure_result() {
        let mut timings: Timings = Timings::new();
        assert_eq!(timings.measure("answer", || 42), 42);
        assert_eq!(timings.data.len(), 1);
        assert!(timings.report().contains("answer"));
    }

    #[test]
    fn same_label_accumulates() {
        let mut timings: Timings = Timings::new();
        timings.measure("solve", || std::thread::sleep(std::time::Duration::from_millis(2)));
        let first: f64 = timings.data[0].1;
        timings.measure("solve", || std::thread::sleep(std::time::Duration::from_millis(2)));

        assert_eq!(timings.data.len(), 1);
        assert!(timings.data[0].1 >= first + 2.0);
    }

    #[test]
    fn report_layout() {
        let timings: Timings = Timings {
            start: Instant::now(),
            data: vec![("carve".to_string(), 12.5), ("createPicture".to_string(), 2.5)],
        };
        let report: String = timings.format_report(50.0);
        let border: String = "-".repeat(13 + 8 + 14);
        let expected: String = format!(
            "{border}\ncarve        :   12.500 ms | 25.0%\ncreatePicture:    2.500 ms | 5.0%\n{border}"
        );
        assert_eq!(report, expected);
    }
}
