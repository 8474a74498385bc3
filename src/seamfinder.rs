// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam
//!
//! Given a cumulative energy map, choose the cheapest interior cell of
//! the bottom row and walk back up to the top, one row at a time.

use crate::cq;
use crate::cumulative::{cumulative_energy, CumulativeEnergyMap};
use crate::energy::calculate_energy;
use crate::flipper::Flipper;
use image::{GenericImageView, Pixel, Primitive};

/// One column index per row, top to bottom.  Neighbouring entries never
/// differ by more than one, and every entry is an interior column.
pub type Seam = Vec<u32>;

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to let the carver ask for the next
/// seam in either direction without knowing how it was chosen.
pub trait SeamFinder {
    /// The next top-to-bottom seam: one x coordinate per row.
    fn find_vertical_seam(&self) -> Seam;

    /// The next left-to-right seam: one y coordinate per column.
    fn find_horizontal_seam(&self) -> Seam;
}

// Which way to go from `x` when stepping up into row `y`.  Straight up
// wins every tie; a diagonal is taken only when it is strictly cheaper,
// and when both diagonals are, the cheaper one, left on a tie.  Outside
// the interior a candidate does not exist, which infinity expresses
// without a special case.
fn next_column(cum: &CumulativeEnergyMap, x: u32, y: u32) -> u32 {
    let (first, last) = (*cum.interior().start(), *cum.interior().end());
    let left = cq!(x > first, cum[(x - 1, y)], f64::INFINITY);
    let right = cq!(x < last, cum[(x + 1, y)], f64::INFINITY);

    let (mut column, mut cost) = (x, cum[(x, y)]);
    if left < cost {
        column = x - 1;
        cost = left;
    }
    if right < cost {
        column = x + 1;
    }
    column
}

/// Given a cumulative energy map, return the list of x-coordinates
/// that, when mapped with the range (0..height), give the XY
/// coordinates for each pixel in the seam to be removed.
///
/// The seam starts at the cheapest interior cell of the bottom row.
/// Ties are broken to the right: the scan runs left to right and a
/// cell equal to the best seen so far replaces it.
///
/// # Panics
///
/// If the map has no interior column, i.e. is narrower than three pixels.
pub fn cumulative_to_vertical_seam(cum: &CumulativeEnergyMap) -> Seam {
    let height = cum.height();
    if height == 0 {
        return Seam::new();
    }
    assert!(
        cum.width() >= 3,
        "a vertical seam needs an image at least three pixels wide"
    );

    let bottom = height - 1;
    let mut seam_col = *cum.interior().start();
    for x in cum.interior() {
        if cum[(x, bottom)] <= cum[(seam_col, bottom)] {
            seam_col = x;
        }
    }

    // Working backwards, generate a vec of x coordinates that map to
    // the seam, reverse and return.
    (0..height)
        .rev()
        .fold(Vec::with_capacity(height as usize), |mut acc, y| {
            if y < bottom {
                seam_col = next_column(cum, seam_col, y);
            }
            acc.push(seam_col);
            acc
        })
        .into_iter()
        .rev()
        .collect()
}

/// The seam engine: an image reference holder that runs the energy,
/// planning and backtracking passes on demand.  Horizontal seams are
/// vertical seams of the image seen through a `Flipper`.
pub struct GradientSeams<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    image: &'a I,
}

impl<'a, I, P, S> GradientSeams<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Takes a reference to an image, and holds onto it.
    pub fn new(image: &'a I) -> Self {
        GradientSeams { image }
    }
}

impl<'a, I, P, S> SeamFinder for GradientSeams<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    fn find_vertical_seam(&self) -> Seam {
        cumulative_to_vertical_seam(&cumulative_energy(&calculate_energy(self.image)))
    }

    fn find_horizontal_seam(&self) -> Seam {
        let flipped = Flipper { image: self.image };
        cumulative_to_vertical_seam(&cumulative_energy(&calculate_energy(&flipped)))
    }
}
