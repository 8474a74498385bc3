// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image dimensional flipper
//!
//! A utility proxy for the image crate's `GenericImageView` trait that
//! maps the width to the original height, and vice versa, as well as
//! every x to y and vice versa.
//!
//! Every part of the carver is written in terms of rows and vertical
//! seams.  Seen through a `Flipper`, the rows of an image are its
//! columns, and a vertical seam of the flipped view is a horizontal
//! seam of the image underneath.

use image::{GenericImageView, ImageBuffer, Pixel, Primitive};

/// A read-only, transposed view of an image.  Pixel (x, y) of the view
/// is pixel (y, x) of the image.
pub struct Flipper<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    pub image: &'a I,
}

impl<'a, I, P, S> GenericImageView for Flipper<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    type Pixel = P;

    fn dimensions(&self) -> (u32, u32) {
        let (x, y) = self.image.dimensions();
        (y, x)
    }

    fn width(&self) -> u32 {
        self.image.height()
    }

    fn height(&self) -> u32 {
        self.image.width()
    }

    fn get_pixel(&self, x: u32, y: u32) -> P {
        self.image.get_pixel(y, x)
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        let (x, y, w, h) = self.image.bounds();
        (y, x, h, w)
    }
}

/// Copy an image into a new buffer with rows and columns exchanged.
/// Transposing the result again gives back the original, pixel for
/// pixel.
pub fn transpose<I, P, S>(image: &I) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let view = Flipper { image };
    let (width, height) = view.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| view.get_pixel(x, y))
}
