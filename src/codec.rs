// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing image files
//!
//! Input formats are detected from a file's contents, never its
//! extension.  Output is always PNG, and is written to a temporary file
//! beside the destination that only takes the destination's name once
//! the whole image has been encoded.

use crate::error::CarveError;
use image::io::Reader;
use image::{DynamicImage, ImageOutputFormat, RgbaImage};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tempfile::NamedTempFile;

/// Open an image file and sniff its format.
pub fn open_image<Q: AsRef<Path>>(path: Q) -> Result<Reader<BufReader<File>>, CarveError> {
    Ok(Reader::open(path)?.with_guessed_format()?)
}

/// The (width, height) of an image file, read from its header alone.
pub fn read_dimensions<Q: AsRef<Path>>(path: Q) -> Result<(u32, u32), CarveError> {
    Ok(open_image(path)?.into_dimensions()?)
}

/// Decode an image file as 8-bit RGBA.
pub fn read_rgba<Q: AsRef<Path>>(path: Q) -> Result<RgbaImage, CarveError> {
    Ok(open_image(path)?.decode()?.to_rgba8())
}

/// Encode an image as PNG at `path`.  On any failure nothing is left at
/// `path`, and whatever was there before is untouched.
pub fn write_png<D, Q>(image: D, path: Q) -> Result<(), CarveError>
where
    D: Into<DynamicImage>,
    Q: AsRef<Path>,
{
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    image
        .into()
        .write_to(tmp.as_file_mut(), ImageOutputFormat::Png)?;
    // A failed persist hands the temporary back, and dropping it
    // deletes it.
    tmp.persist(path).map_err(io::Error::from)?;
    Ok(())
}
