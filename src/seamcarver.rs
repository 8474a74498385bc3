// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The main seamcarver routine, with helpers for the horizontal and
//! vertical operations.  Only the vertical operation does any real
//! work; the horizontal one transposes the image, removes a vertical
//! seam, and transposes it back.

use crate::error::CarveError;
use crate::flipper::transpose;
use crate::seamfinder::{GradientSeams, SeamFinder};
use image::{GenericImageView, ImageBuffer, Pixel, Primitive};
use log::{debug, info, trace};
use std::fmt;

/// Copy an image, leaving out the pixel at `seam[y]` on every row `y`.
/// Everything to the right of the seam moves one column left.
///
/// # Panics
///
/// If the seam is shorter than the image is tall.
pub fn remove_vertical_seam<I, P, S>(image: &I, seam: &[u32]) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let (width, height) = image.dimensions();
    let mut imgbuf = ImageBuffer::new(width.saturating_sub(1), height);
    for y in 0..height {
        let skip = seam[y as usize];
        for (nx, x) in (0..width).filter(|x| *x != skip).enumerate() {
            imgbuf.put_pixel(nx as u32, y, image.get_pixel(x, y));
        }
    }
    imgbuf
}

/// Copy an image, leaving out the pixel at `seam[x]` in every column
/// `x`.  Everything below the seam moves one row up.
pub fn remove_horizontal_seam<I, P, S>(image: &I, seam: &[u32]) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    transpose(&remove_vertical_seam(&transpose(image), seam))
}

/// Remove the cheapest top-to-bottom seam, returning an image one
/// pixel narrower.
///
/// # Panics
///
/// If the image is narrower than three pixels.
pub fn carve_vertical<I, P, S>(image: &I) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let seam = GradientSeams::new(image).find_vertical_seam();
    remove_vertical_seam(image, &seam)
}

/// Remove the cheapest left-to-right seam, returning an image one
/// pixel shorter.
///
/// # Panics
///
/// If the image is shorter than three pixels.
pub fn carve_horizontal<I, P, S>(image: &I) -> ImageBuffer<P, Vec<S>>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    transpose(&carve_vertical(&transpose(image)))
}

/// Which dimension a seam removal shrinks.  Removing a vertical seam
/// shrinks the width; removing a horizontal one shrinks the height.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    fn turn(self) -> Self {
        match self {
            Axis::Width => Axis::Height,
            Axis::Height => Axis::Width,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => write!(f, "width"),
            Axis::Height => write!(f, "height"),
        }
    }
}

// The logged start is the seam's last entry: its column in the bottom
// row, or for a horizontal seam its row in the rightmost column.
fn carveonce<P, S>(image: &ImageBuffer<P, Vec<S>>, direction: Axis) -> ImageBuffer<P, Vec<S>>
where
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let finder = GradientSeams::new(image);
    let (seam, next) = match direction {
        Axis::Width => {
            let seam = finder.find_vertical_seam();
            let next = remove_vertical_seam(image, &seam);
            (seam, next)
        }
        Axis::Height => {
            let seam = finder.find_horizontal_seam();
            let next = remove_horizontal_seam(image, &seam);
            (seam, next)
        }
    };
    debug!(
        "carved {}: seam starts at {}, {}x{} -> {}x{}",
        direction,
        seam.last().copied().unwrap_or_default(),
        image.width(),
        image.height(),
        next.width(),
        next.height()
    );
    trace!("{} seam: {:?}", direction, seam);
    next
}

// The last removal along an axis runs on an image one pixel larger
// than the target, and that image needs an interior column, so a
// target that takes any seams must be at least two.
fn seams_to_remove(axis: Axis, current: u32, requested: u32) -> Result<u32, CarveError> {
    if requested > current {
        return Err(CarveError::Enlarge {
            axis,
            current,
            requested,
        });
    }
    let seams = current - requested;
    if seams > 0 && requested < 2 {
        return Err(CarveError::TooSmall { axis, requested });
    }
    Ok(seams)
}

/// Check a resize before doing any work: returns how many vertical and
/// how many horizontal seams it takes to get from `current` to
/// `target`, both given as (width, height).
pub fn plan_seams(current: (u32, u32), target: (u32, u32)) -> Result<(u32, u32), CarveError> {
    Ok((
        seams_to_remove(Axis::Width, current.0, target.0)?,
        seams_to_remove(Axis::Height, current.1, target.1)?,
    ))
}

/// A struct for holding the image to be carved.
pub struct SeamCarver<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    image: &'a I,
}

impl<'a, I, P, S> SeamCarver<'a, I, P, S>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: &'a I) -> Self {
        Self { image }
    }

    // The entire energy map and cumulative map are recalculated for
    // every seam.  Only the columns either side of the last seam
    // actually change, but each seam is chosen on a fresh map.

    /// Given a desired new width and height, repeatedly carve seams out
    /// of the image.  While both dimensions still need to shrink the
    /// carver alternates, a horizontal seam and then a vertical one;
    /// whatever is left over is carved from the one remaining axis.
    ///
    /// The source image is never modified.  Both sizes are checked
    /// before any seam is removed.
    pub fn carve(&self, newwidth: u32, newheight: u32) -> Result<ImageBuffer<P, Vec<S>>, CarveError> {
        let (mut width, mut height) = self.image.dimensions();
        let (seams_x, seams_y) = plan_seams((width, height), (newwidth, newheight))?;
        info!(
            "carving {}x{} to {}x{}: {} vertical and {} horizontal seams",
            width, height, newwidth, newheight, seams_x, seams_y
        );

        let mut scratch = ImageBuffer::from_fn(width, height, |x, y| self.image.get_pixel(x, y));
        let mut direction = Axis::Height;

        while width > newwidth && height > newheight {
            scratch = carveonce(&scratch, direction);
            direction = direction.turn();
            width = scratch.width();
            height = scratch.height();
        }
        while width > newwidth {
            scratch = carveonce(&scratch, Axis::Width);
            width = scratch.width();
        }
        while height > newheight {
            scratch = carveonce(&scratch, Axis::Height);
            height = scratch.height();
        }
        Ok(scratch)
    }
}

/// Carve an image down to `newwidth` by `newheight`.  Shorthand for
/// `SeamCarver::new(image).carve(newwidth, newheight)`.
pub fn seamcarve<I, P, S>(
    image: &I,
    newwidth: u32,
    newheight: u32,
) -> Result<ImageBuffer<P, Vec<S>>, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    SeamCarver::new(image).carve(newwidth, newheight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgba, RgbaImage};
    use log::{LevelFilter, Log, Metadata, Record};
    use std::cell::RefCell;
    use std::sync::Once;

    thread_local! {
        static CAPTURED: RefCell<Vec<String>> = RefCell::new(Vec::new());
    }

    // Tests run on several threads at once; each sees only the debug
    // lines logged from its own thread.
    struct Capture;

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::Level::Debug
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                CAPTURED.with(|c| c.borrow_mut().push(record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn captured_debug_lines<F: FnOnce()>(work: F) -> Vec<String> {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            log::set_boxed_logger(Box::new(Capture)).unwrap();
            log::set_max_level(LevelFilter::Debug);
        });
        CAPTURED.with(|c| c.borrow_mut().clear());
        work();
        CAPTURED.with(|c| c.borrow_mut().drain(..).collect())
    }

    fn noisy(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let v = ((x * 53 + y * 29 + x * y * 7) % 256) as u8;
            Rgba([v, v.wrapping_mul(3), 255 - v, 255])
        })
    }

    #[test]
    fn vertical_removal_drops_one_pixel_per_row() {
        let buf = GrayImage::from_fn(4, 3, |x, y| Luma([(10 * y + x) as u8]));
        let out = remove_vertical_seam(&buf, &[1, 2, 1]);
        assert_eq!(out.dimensions(), (3, 3));
        assert_eq!(out.into_raw(), vec![0, 2, 3, 10, 11, 13, 20, 22, 23]);
    }

    #[test]
    fn horizontal_removal_drops_one_pixel_per_column() {
        let buf = GrayImage::from_fn(3, 4, |x, y| Luma([(10 * y + x) as u8]));
        let out = remove_horizontal_seam(&buf, &[1, 2, 1]);
        assert_eq!(out.dimensions(), (3, 3));
        assert_eq!(out.into_raw(), vec![0, 1, 2, 20, 11, 22, 30, 31, 32]);
    }

    #[test]
    fn single_carves_shrink_one_axis() {
        let buf = noisy(8, 6);
        assert_eq!(carve_vertical(&buf).dimensions(), (7, 6));
        assert_eq!(carve_horizontal(&buf).dimensions(), (8, 5));
    }

    #[test]
    fn uniform_image_stays_uniform() {
        let colour = Rgba([12, 34, 56, 255]);
        let buf = RgbaImage::from_pixel(10, 10, colour);
        let out = SeamCarver::new(&buf).carve(8, 8).unwrap();
        assert_eq!(out.dimensions(), (8, 8));
        assert!(out.pixels().all(|p| *p == colour));
    }

    #[test]
    fn same_size_is_a_copy() {
        let buf = noisy(9, 7);
        let out = seamcarve(&buf, 9, 7).unwrap();
        assert_eq!(out, buf);
    }

    #[test]
    fn rounds_start_with_a_horizontal_seam() {
        let buf = noisy(12, 9);
        let out = seamcarve(&buf, 11, 8).unwrap();
        assert_eq!(out, carve_vertical(&carve_horizontal(&buf)));
    }

    #[test]
    fn leftover_seams_come_from_one_axis() {
        let buf = noisy(12, 9);
        let out = seamcarve(&buf, 9, 8).unwrap();
        let expected = carve_vertical(&carve_vertical(&carve_vertical(&carve_horizontal(&buf))));
        assert_eq!(out, expected);
    }

    #[test]
    fn refuses_to_enlarge() {
        let buf = noisy(6, 6);
        match seamcarve(&buf, 7, 6) {
            Err(CarveError::Enlarge {
                axis: Axis::Width,
                current: 6,
                requested: 7,
            }) => (),
            other => panic!("unexpected {:?}", other.map(|i| i.dimensions())),
        }
        match seamcarve(&buf, 6, 10) {
            Err(CarveError::Enlarge {
                axis: Axis::Height, ..
            }) => (),
            other => panic!("unexpected {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn refuses_targets_without_an_interior() {
        let buf = noisy(5, 5);
        assert!(matches!(
            seamcarve(&buf, 1, 5),
            Err(CarveError::TooSmall {
                axis: Axis::Width,
                requested: 1
            })
        ));
        assert!(matches!(
            seamcarve(&buf, 5, 0),
            Err(CarveError::TooSmall {
                axis: Axis::Height,
                ..
            })
        ));
        assert_eq!(seamcarve(&buf, 2, 2).unwrap().dimensions(), (2, 2));
    }

    #[test]
    fn plans_count_seams_per_axis() {
        assert_eq!(plan_seams((10, 7), (4, 7)).unwrap(), (6, 0));
        assert_eq!(plan_seams((3, 3), (3, 3)).unwrap(), (0, 0));
        assert!(plan_seams((3, 3), (4, 3)).is_err());
    }

    #[test]
    fn each_seam_is_logged_with_its_start() {
        // Every cumulative cost is zero, so the rightmost interior
        // index wins: column 4 of 6, then row 3 of 5.
        let buf = RgbaImage::from_pixel(6, 5, Rgba([7, 7, 7, 255]));
        let lines = captured_debug_lines(|| {
            let narrower = carveonce(&buf, Axis::Width);
            carveonce(&narrower, Axis::Height);
        });
        assert_eq!(
            lines,
            vec![
                "carved width: seam starts at 4, 6x5 -> 5x5",
                "carved height: seam starts at 3, 5x5 -> 5x4",
            ]
        );
    }

    #[test]
    fn logged_start_matches_the_seam_removed() {
        let buf = noisy(9, 7);
        let start = *GradientSeams::new(&buf).find_vertical_seam().last().unwrap();
        let lines = captured_debug_lines(|| {
            carveonce(&buf, Axis::Width);
        });
        assert_eq!(
            lines,
            vec![format!("carved width: seam starts at {}, 9x7 -> 8x7", start)]
        );
    }

    #[test]
    fn axes_alternate() {
        assert_eq!(Axis::Width.turn(), Axis::Height);
        assert_eq!(Axis::Height.turn(), Axis::Width);
    }
}
