//! The palette bitmap and nearest-color search over it.

use log::trace;
use palette_picker_types::{Color, Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::DEFAULT_PALETTE_SIZE;
use crate::mapping;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("palette size {0}x{1} is empty")]
    Empty(i32, i32),
    #[error("palette of {width}x{height} needs {expected} pixels, got {actual}")]
    PixelCount {
        width: i32,
        height: i32,
        expected: usize,
        actual: usize,
    },
}

/// How the closest palette pixel to a color is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SearchMode {
    /// Visit every pixel
    Exhaustive,
    /// Sample a grid with the given stride, then refine around the best sample
    Bounded { stride: u32 },
}

impl Default for SearchMode {
    fn default() -> Self {
        Self::Exhaustive
    }
}

/// Read-only RGB bitmap, stored row-major
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteImage {
    size: Size,
    pixels: Vec<Color>,
}

impl PaletteImage {
    pub fn new(size: Size, pixels: Vec<Color>) -> Result<Self, PaletteError> {
        if size.is_empty() {
            return Err(PaletteError::Empty(size.width, size.height));
        }
        let expected = size.area();
        if pixels.len() != expected {
            return Err(PaletteError::PixelCount {
                width: size.width,
                height: size.height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    /// Build a palette by evaluating `f` at every pixel
    pub fn from_fn(size: Size, mut f: impl FnMut(Point) -> Color) -> Result<Self, PaletteError> {
        if size.is_empty() {
            return Err(PaletteError::Empty(size.width, size.height));
        }
        let mut pixels = Vec::with_capacity(size.area());
        for y in 0..size.height {
            for x in 0..size.width {
                pixels.push(f(Point::new(x, y)));
            }
        }
        Self::new(size, pixels)
    }

    /// Hue spectrum palette: hue runs left to right, the upper half fades
    /// from white into the pure hue and the lower half from the hue to black.
    pub fn spectrum(size: Size) -> Result<Self, PaletteError> {
        let mid = (size.height / 2).max(1);
        let bottom = (size.height - 1 - mid).max(1);
        let last_column = (size.width - 1).max(1);

        Self::from_fn(size, |point| {
            let hue = (point.x * 360) as f64 / last_column as f64;
            let (saturation, value) = if point.y <= mid {
                (point.y as f64 / mid as f64, 1.0)
            } else {
                (1.0, (size.height - 1 - point.y) as f64 / bottom as f64)
            };
            let (r, g, b) = hsv_to_rgb(hue, saturation, value);
            Color::new(to_channel(r), to_channel(g), to_channel(b))
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Color at `point`, `None` outside the bitmap
    pub fn pixel(&self, point: Point) -> Option<Color> {
        if !mapping::is_valid(point, self.size) {
            return None;
        }
        self.pixels.get(self.index(point)).copied()
    }

    /// Pixel whose color is closest to `color`.
    ///
    /// Ties resolve to the first pixel in row-major order.
    pub fn closest_point(&self, color: Color, mode: SearchMode) -> Point {
        let found = match mode {
            SearchMode::Bounded { stride } if stride > 1 => {
                self.bounded_search(color, stride.min(i32::MAX as u32) as i32)
            }
            _ => self.search_region(color, 0..self.size.width, 0..self.size.height, 1).0,
        };
        trace!("closest palette pixel to {} is {:?} ({:?})", color, found, mode);
        found
    }

    fn bounded_search(&self, color: Color, stride: i32) -> Point {
        let stride = stride.min(self.size.width.max(self.size.height));
        let (sample, distance) =
            self.search_region(color, 0..self.size.width, 0..self.size.height, stride);
        if distance == 0 {
            return sample;
        }

        let xs = (sample.x - stride + 1).max(0)..(sample.x + stride).min(self.size.width);
        let ys = (sample.y - stride + 1).max(0)..(sample.y + stride).min(self.size.height);
        let (refined, refined_distance) = self.search_region(color, xs, ys, 1);

        if refined_distance < distance {
            refined
        } else {
            sample
        }
    }

    fn search_region(
        &self,
        color: Color,
        xs: std::ops::Range<i32>,
        ys: std::ops::Range<i32>,
        step: i32,
    ) -> (Point, u32) {
        let step = step.max(1) as usize;
        let mut best = Point::new(xs.start, ys.start);
        let mut best_distance = u32::MAX;

        for y in ys.step_by(step) {
            for x in xs.clone().step_by(step) {
                let point = Point::new(x, y);
                let distance = self.pixels[self.index(point)].distance_squared(&color);
                if distance < best_distance {
                    best = point;
                    best_distance = distance;
                    if distance == 0 {
                        return (best, 0);
                    }
                }
            }
        }

        (best, best_distance)
    }

    fn index(&self, point: Point) -> usize {
        point.y as usize * self.size.width as usize + point.x as usize
    }
}

impl Default for PaletteImage {
    fn default() -> Self {
        let size = Size::new(DEFAULT_PALETTE_SIZE, DEFAULT_PALETTE_SIZE);
        // The spectrum constructor only fails for empty sizes
        Self::spectrum(size).unwrap_or_else(|_| Self {
            size: Size::new(1, 1),
            pixels: vec![Color::WHITE],
        })
    }
}

fn to_channel(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}
