// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render an energy map as a greyscale image, for looking at what the
//! carver thinks is important.

use crate::energy::EnergyMap;
use image::{GrayImage, Luma};
use num_traits::clamp;

/// Scale the energies linearly so that the largest maps to 255.  An
/// all-zero map renders as solid black.
pub fn energy_to_image(energy: &EnergyMap) -> GrayImage {
    let (width, height) = energy.dimensions();
    let factor = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    GrayImage::from_fn(width, height, |x, y| {
        let e = energy[(x, y)];
        let level = if factor > 0.0 { e * 255.0 / factor } else { 0.0 };
        Luma([clamp(level.round(), 0.0, 255.0) as u8])
    })
}
