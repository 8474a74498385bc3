// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field of scalars, laid out row-major
/// the same way `image::ImageBuffer` lays out its pixels.  Used for the
/// per-pixel energy of an image and for the running minimum-cost grid
/// the planner builds on top of it.
///
/// Every cell starts as `P::default()`; for the `f64` maps used here
/// that is `0.0`, and several cells of both maps are *meant* to stay
/// there.  See `EnergyMap` and `CumulativeEnergyMap`.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub width: u32,
    pub height: u32,
    cells: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A map of the given dimensions, every cell at `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            cells: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major buffer.  Returns `None` if the buffer
    /// length does not match the dimensions.
    pub fn from_raw(width: u32, height: u32, cells: Vec<P>) -> Option<Self> {
        if cells.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            cells,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.  This
    // particular variant is the same one used in image.rs.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// One full row, left to right.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.cells[start..start + self.width as usize]
    }

    /// Every cell, row-major.
    pub fn as_slice(&self) -> &[P] {
        &self.cells
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.cells[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.cells[index]
    }
}
