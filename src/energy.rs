// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the sum of two directional gradients, each
//! taken over the six pixels on either side of it:
//!
//! ```text
//!        dx = Σ | (TL + 2L + BL) - (TR + 2R + BR) |
//!        dy = Σ | (TL + 2T + TR) - (BL + 2B + BR) |
//!    e(x,y) = dx + dy
//! ```
//!
//! where the sums run over the red, green, blue and alpha channels.
//! The center pixel never contributes, and neither do the two
//! neighbours lying on the axis the gradient crosses.
//!
//! Border pixels are not computed at all.  They are zero, which makes
//! the outermost rows and columns the cheapest pixels in the image.

use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Primitive, Rgba};
use itertools::iproduct;
use num_traits::NumCast;

/// Per-pixel energy of an image.  Same dimensions as the image; every
/// cell on the first or last row or column is `0.0`.
pub type EnergyMap = TwoDimensionalMap<f64>;

type Channels = [f64; 4];

// Pixel -> [r, g, b, a], with straight (not premultiplied) alpha.
// Every pixel type the image crate knows how to build can be widened
// to RGBA, which is what lets the energy function stay generic over
// Luma, Rgb and friends.
#[inline]
fn rgba_channels<P, S>(p: &P) -> Channels
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let Rgba(rgba) = p.to_rgba();
    let mut out = [0.0; 4];
    for (o, c) in out.iter_mut().zip(rgba.iter()) {
        *o = <f64 as NumCast>::from(*c).unwrap_or(0.0);
    }
    out
}

// (a + 2b + c) - (d + 2e + f), absolute, summed over the channels.
#[inline]
fn weighted_difference(near: [&Channels; 3], far: [&Channels; 3]) -> f64 {
    (0..4)
        .map(|ch| {
            (near[0][ch] + 2.0 * near[1][ch] + near[2][ch]
                - far[0][ch]
                - 2.0 * far[1][ch]
                - far[2][ch])
                .abs()
        })
        .sum()
}

/// Compute the energy of every pixel in an image.
///
/// Images narrower or shorter than three pixels are entirely border,
/// and come back as an all-zero map.
pub fn calculate_energy<I, P, S>(image: &I) -> EnergyMap
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut emap = EnergyMap::new(width, height);
    if width < 3 || height < 3 {
        return emap;
    }

    // Every pixel gets read by up to six of its neighbours; convert once.
    let mut rgba: TwoDimensionalMap<Channels> = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        rgba[(x, y)] = rgba_channels(&image.get_pixel(x, y));
    }
    let at = |x: u32, y: u32| &rgba[(x, y)];

    for (y, x) in iproduct!(1..height - 1, 1..width - 1) {
        let (left, right, up, down) = (x - 1, x + 1, y - 1, y + 1);
        let dx = weighted_difference(
            [at(left, up), at(left, y), at(left, down)],
            [at(right, up), at(right, y), at(right, down)],
        );
        let dy = weighted_difference(
            [at(left, up), at(x, up), at(right, up)],
            [at(left, down), at(x, down), at(right, down)],
        );
        emap[(x, y)] = dx + dy;
    }
    emap
}
