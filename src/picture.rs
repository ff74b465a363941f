/*
picture.rs

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

//! RGBA pixel buffer.
//!
//! A [`Picture`] stores four bytes per pixel (red, green, blue, alpha), row after row.
//! Setting a pixel outside the picture grows the buffer: the new area is opaque white, and the
//! existing pixels keep their coordinates.
//!
//! Pictures are read from and written to PNG files by using the [`image`] crate.

use image::error::{LimitError, LimitErrorKind};
use image::{ExtendedColorType, ImageError, ImageFormat, ImageReader, RgbaImage};
use log::debug;
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Number of bytes per pixel.
const CHANNELS: usize = 4;

/// Color of a pixel. Pictures are always opaque.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create an [`Rgb`] object.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a gray color.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// Type of errors.
#[derive(Debug)]
pub enum PictureError {
    /// The PNG file cannot be read, decoded, encoded, or written.
    Image(ImageError),

    /// The scaling factor is not a strictly positive number.
    InvalidScale(f32),
}

impl fmt::Display for PictureError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PictureError::Image(e) => write!(f, "{e}"),
            PictureError::InvalidScale(factor) => write!(f, "Invalid scaling factor {factor}"),
        }
    }
}

impl Error for PictureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PictureError::Image(e) => Some(e),
            PictureError::InvalidScale(_) => None,
        }
    }
}

impl From<ImageError> for PictureError {
    fn from(e: ImageError) -> Self {
        PictureError::Image(e)
    }
}

impl From<std::io::Error> for PictureError {
    fn from(e: std::io::Error) -> Self {
        PictureError::Image(ImageError::IoError(e))
    }
}

/// Pixel buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Picture {
    width: usize,
    height: usize,

    /// RGBA values, row-major.
    values: Vec<u8>,
}

impl Picture {
    /// Create a picture filled with the given color.
    pub fn new(width: usize, height: usize, color: Rgb) -> Self {
        let mut values: Vec<u8> = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            values.extend_from_slice(&[color.r, color.g, color.b, 255]);
        }
        Self {
            width,
            height,
            values,
        }
    }

    /// Create a gray picture from a matrix of gray levels, one row per vector.
    ///
    /// The width is given by the first row. An empty matrix gives an empty picture.
    pub fn from_grays(grays: &[Vec<u8>]) -> Self {
        let width: usize = grays.first().map_or(0, Vec::len);
        if width == 0 {
            return Self::default();
        }

        let mut picture: Picture = Self::new(width, grays.len(), Rgb::BLACK);
        for (y, row) in grays.iter().enumerate() {
            for (x, gray) in row.iter().take(width).enumerate() {
                picture.set(x, y, Rgb::gray(*gray));
            }
        }
        picture
    }

    /// Read a PNG file.
    ///
    /// # Errors
    ///
    /// The method returns an error if the file cannot be read or decoded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PictureError> {
        let image: RgbaImage = ImageReader::open(path.as_ref())?
            .with_guessed_format()?
            .decode()?
            .to_rgba8();
        let (width, height) = image.dimensions();
        debug!("Loaded {:?}: {width}x{height}", path.as_ref());
        Ok(Self {
            width: width as usize,
            height: height as usize,
            values: image.into_raw(),
        })
    }

    /// Write the picture to a PNG file.
    ///
    /// # Errors
    ///
    /// The method returns an error if the picture cannot be encoded (an empty picture for
    /// example) or if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PictureError> {
        let too_large = |_| {
            PictureError::Image(ImageError::Limits(LimitError::from_kind(
                LimitErrorKind::DimensionError,
            )))
        };
        let width: u32 = u32::try_from(self.width).map_err(too_large)?;
        let height: u32 = u32::try_from(self.height).map_err(too_large)?;
        image::save_buffer_with_format(
            path.as_ref(),
            self.as_raw(),
            width,
            height,
            ExtendedColorType::Rgba8,
            ImageFormat::Png,
        )?;
        debug!("Saved {:?}: {}x{}", path.as_ref(), self.width, self.height);
        Ok(())
    }

    /// Picture width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Picture height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA values, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.values
    }

    /// Offset of the pixel in the buffer, if the pixel is inside the picture.
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(CHANNELS * (y * self.width + x))
        } else {
            None
        }
    }

    /// Red component of the pixel, or 0 outside the picture.
    pub fn red(&self, x: usize, y: usize) -> u8 {
        self.offset(x, y).map_or(0, |k| self.values[k])
    }

    /// Green component of the pixel, or 0 outside the picture.
    pub fn green(&self, x: usize, y: usize) -> u8 {
        self.offset(x, y).map_or(0, |k| self.values[k + 1])
    }

    /// Blue component of the pixel, or 0 outside the picture.
    pub fn blue(&self, x: usize, y: usize) -> u8 {
        self.offset(x, y).map_or(0, |k| self.values[k + 2])
    }

    /// Color of the pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.offset(x, y)
            .map(|k| Rgb::new(self.values[k], self.values[k + 1], self.values[k + 2]))
    }

    /// Set the color of a pixel, growing the picture if needed.
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.ensure(x, y);
        let k: usize = CHANNELS * (y * self.width + x);
        self.values[k..k + CHANNELS].copy_from_slice(&[color.r, color.g, color.b, 255]);
    }

    /// Grow the picture so that it contains the given pixel.
    pub fn ensure(&mut self, x: usize, y: usize) {
        if x < self.width && y < self.height {
            return;
        }

        let new_width: usize = self.width.max(x + 1);
        let new_height: usize = self.height.max(y + 1);
        let white: [u8; CHANNELS] = [Rgb::WHITE.r, Rgb::WHITE.g, Rgb::WHITE.b, 255];
        let mut new_values: Vec<u8> = white.repeat(new_width * new_height);
        let row_len: usize = CHANNELS * self.width;

        if row_len > 0 {
            for (dy, row) in self.values.chunks_exact(row_len).enumerate() {
                let k: usize = CHANNELS * dy * new_width;
                new_values[k..k + row_len].copy_from_slice(row);
            }
        }
        debug!(
            "Picture grown from {}x{} to {new_width}x{new_height}",
            self.width, self.height
        );
        self.values = new_values;
        self.width = new_width;
        self.height = new_height;
    }

    /// Copy another picture into this one, with its top left corner at `(x, y)`.
    pub fn add(&mut self, other: &Picture, x: usize, y: usize) {
        if other.width == 0 || other.height == 0 {
            return;
        }
        self.ensure(x + other.width - 1, y + other.height - 1);
        for dy in 0..other.height {
            for dx in 0..other.width {
                if let Some(color) = other.pixel(dx, dy) {
                    self.set(x + dx, y + dy, color);
                }
            }
        }
    }

    /// Return the luminance of each pixel, one vector per row.
    pub fn grays(&self) -> Vec<Vec<u8>> {
        (0..self.height)
            .map(|y| {
                (0..self.width)
                    .map(|x| {
                        let k: usize = CHANNELS * (y * self.width + x);
                        (0.2126 * f32::from(self.values[k])
                            + 0.7152 * f32::from(self.values[k + 1])
                            + 0.0722 * f32::from(self.values[k + 2])) as u8
                    })
                    .collect()
            })
            .collect()
    }

    /// Return a resized copy of the picture, by using bilinear interpolation.
    ///
    /// # Errors
    ///
    /// The method returns an error if the factor is not a strictly positive number.
    pub fn bilinear_resize(&self, factor: f32) -> Result<Picture, PictureError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PictureError::InvalidScale(factor));
        }
        if factor == 1.0 || self.width == 0 || self.height == 0 {
            return Ok(self.clone());
        }

        let (in_width, in_height) = (self.width, self.height);
        let out_width: usize = (in_width as f32 * factor).round() as usize;
        let out_height: usize = (in_height as f32 * factor).round() as usize;
        let x_ratio: f32 = if out_width > 1 {
            (in_width - 1) as f32 / (out_width - 1) as f32
        } else {
            0.0
        };
        let y_ratio: f32 = if out_height > 1 {
            (in_height - 1) as f32 / (out_height - 1) as f32
        } else {
            0.0
        };
        debug!("Bilinear resize {in_width}x{in_height} -> {out_width}x{out_height}");

        let mut resized: Picture = Picture::new(out_width, out_height, Rgb::BLACK);
        for i in 0..out_height {
            for j in 0..out_width {
                let x_low: usize = (x_ratio * j as f32).floor() as usize;
                let y_low: usize = (y_ratio * i as f32).floor() as usize;
                let x_high: usize = (x_low + 1).min(in_width - 1);
                let y_high: usize = (y_low + 1).min(in_height - 1);
                let x_weight: f32 = x_ratio * j as f32 - x_low as f32;
                let y_weight: f32 = y_ratio * i as f32 - y_low as f32;

                // Weighted average of the four closest source pixels: first along the rows,
                // then between the two rows
                let interpolate = |channel: fn(&Picture, usize, usize) -> u8| -> u8 {
                    let a: f32 = f32::from(channel(self, x_low, y_low));
                    let b: f32 = f32::from(channel(self, x_high, y_low));
                    let c: f32 = f32::from(channel(self, x_low, y_high));
                    let d: f32 = f32::from(channel(self, x_high, y_high));
                    let top: f32 = a * (1.0 - x_weight) + b * x_weight;
                    let bottom: f32 = c * (1.0 - x_weight) + d * x_weight;
                    (top * (1.0 - y_weight) + bottom * y_weight)
                        .round()
                        .clamp(0.0, 255.0) as u8
                };

                resized.set(
                    j,
                    i,
                    Rgb::new(
                        interpolate(Picture::red),
                        interpolate(Picture::green),
                        interpolate(Picture::blue),
                    ),
                );
            }
        }
        Ok(resized)
    }

    /// Return a copy of the picture where each pixel becomes a `scale` x `scale` square.
    ///
    /// # Errors
    ///
    /// The method returns an error if the scale is zero.
    pub fn nearest_resize(&self, scale: usize) -> Result<Picture, PictureError> {
        if scale == 0 {
            return Err(PictureError::InvalidScale(0.0));
        }
        if scale == 1 {
            return Ok(self.clone());
        }

        let mut resized: Picture =
            Picture::new(self.width * scale, self.height * scale, Rgb::BLACK);
        for y in 0..resized.height {
            for x in 0..resized.width {
                let k: usize = CHANNELS * ((y / scale) * self.width + x / scale);
                let color: Rgb = Rgb::new(self.values[k], self.values[k + 1], self.values[k + 2]);
                resized.set(x, y, color);
            }
        }
        Ok(resized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_picture_is_filled_and_opaque() {
        let picture: Picture = Picture::new(3, 2, Rgb::new(1, 2, 3));
        assert_eq!(picture.as_raw().len(), 24);
        assert!(picture.as_raw().chunks(4).all(|p| p == [1, 2, 3, 255]));
    }

    #[test]
    fn out_of_bounds_reads_are_black() {
        let picture: Picture = Picture::new(2, 2, Rgb::WHITE);
        assert_eq!(picture.red(2, 0), 0);
        assert_eq!(picture.green(0, 2), 0);
        assert_eq!(picture.blue(1, 1), 255);
        assert_eq!(picture.pixel(5, 5), None);
    }

    #[test]
    fn set_grows_with_white() {
        let mut picture: Picture = Picture::new(2, 1, Rgb::BLACK);
        picture.set(1, 0, Rgb::new(10, 20, 30));
        picture.set(3, 2, Rgb::new(200, 0, 0));

        assert_eq!((picture.width(), picture.height()), (4, 3));
        assert_eq!(picture.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(picture.pixel(1, 0), Some(Rgb::new(10, 20, 30)));
        assert_eq!(picture.pixel(2, 0), Some(Rgb::WHITE));
        assert_eq!(picture.pixel(0, 1), Some(Rgb::WHITE));
        assert_eq!(picture.pixel(3, 2), Some(Rgb::new(200, 0, 0)));
    }

    #[test]
    fn empty_picture_grows() {
        let mut picture: Picture = Picture::from_grays(&[]);
        assert_eq!((picture.width(), picture.height()), (0, 0));
        picture.set(1, 1, Rgb::BLACK);
        assert_eq!(picture.pixel(0, 0), Some(Rgb::WHITE));
        assert_eq!(picture.pixel(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn add_blits_at_offset() {
        let mut canvas: Picture = Picture::new(2, 2, Rgb::BLACK);
        let stamp: Picture = Picture::new(2, 2, Rgb::new(9, 9, 9));
        canvas.add(&stamp, 1, 1);

        assert_eq!((canvas.width(), canvas.height()), (3, 3));
        assert_eq!(canvas.pixel(0, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(1, 1), Some(Rgb::gray(9)));
        assert_eq!(canvas.pixel(2, 2), Some(Rgb::gray(9)));
        assert_eq!(canvas.pixel(2, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn grays_use_luminance_weights() {
        let mut picture: Picture = Picture::new(2, 1, Rgb::new(255, 0, 0));
        picture.set(1, 0, Rgb::new(0, 255, 0));
        assert_eq!(picture.grays(), vec![vec![54, 182]]);

        let gray: Picture = Picture::from_grays(&[vec![10, 20], vec![30, 40]]);
        assert_eq!((gray.width(), gray.height()), (2, 2));
        assert_eq!(gray.pixel(1, 1), Some(Rgb::gray(40)));
    }

    #[test]
    fn bilinear_resize_interpolates() {
        let picture: Picture = Picture::from_grays(&[vec![0, 100]]);
        let resized: Picture = picture.bilinear_resize(1.5).unwrap();

        assert_eq!((resized.width(), resized.height()), (3, 2));
        assert_eq!(resized.red(0, 0), 0);
        assert_eq!(resized.red(1, 0), 50);
        assert_eq!(resized.red(2, 1), 100);
    }

    #[test]
    fn bilinear_resize_rejects_bad_factors() {
        let picture: Picture = Picture::new(4, 4, Rgb::WHITE);
        assert!(matches!(
            picture.bilinear_resize(0.0),
            Err(PictureError::InvalidScale(_))
        ));
        assert!(picture.bilinear_resize(f32::NAN).is_err());
        assert_eq!(picture.bilinear_resize(1.0).unwrap(), picture);
        assert_eq!(picture.bilinear_resize(0.5).unwrap().width(), 2);
    }

    #[test]
    fn nearest_resize_keeps_cells_crisp() {
        let picture: Picture = Picture::from_grays(&[vec![0, 255]]);
        let resized: Picture = picture.nearest_resize(3).unwrap();

        assert_eq!((resized.width(), resized.height()), (6, 3));
        assert_eq!(resized.pixel(2, 2), Some(Rgb::BLACK));
        assert_eq!(resized.pixel(3, 0), Some(Rgb::WHITE));
        assert!(picture.nearest_resize(0).is_err());
    }

    #[test]
    fn png_round_trip() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picture.png");
        let mut picture: Picture = Picture::new(3, 2, Rgb::new(50, 50, 50));
        picture.set(2, 1, Rgb::new(127, 0, 255));

        picture.save(&path).unwrap();
        assert_eq!(Picture::open(&path).unwrap(), picture);
    }

    #[test]
    fn open_missing_file_fails() {
        let dir: tempfile::TempDir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Picture::open(dir.path().join("missing.png")),
            Err(PictureError::Image(_))
        ));
    }
}
