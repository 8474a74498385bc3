// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::seamcarver::Axis;
use failure::Fail;

/// Everything that can stop a carve.  The carving passes themselves
/// cannot fail; these are all raised before the first seam is removed,
/// or at the codec boundary.
#[derive(Debug, Fail)]
pub enum CarveError {
    #[fail(
        display = "cannot enlarge an image: requested {} {} exceeds the current {}",
        axis, requested, current
    )]
    Enlarge {
        axis: Axis,
        current: u32,
        requested: u32,
    },

    #[fail(
        display = "cannot carve {} down to {}: seams need at least three pixels to work in",
        axis, requested
    )]
    TooSmall { axis: Axis, requested: u32 },

    #[fail(display = "image error: {}", _0)]
    Image(#[cause] image::ImageError),

    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] std::io::Error),
}

impl From<image::ImageError> for CarveError {
    fn from(err: image::ImageError) -> Self {
        CarveError::Image(err)
    }
}

impl From<std::io::Error> for CarveError {
    fn from(err: std::io::Error) -> Self {
        CarveError::Io(err)
    }
}
