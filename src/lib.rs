// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image shrinking.
//!
//! Seams, connected one-pixel paths of low energy, are removed one at
//! a time until an image reaches its target size.  Each removal runs
//! the same four passes: energy, cumulative energy, backtracking, and
//! removal.  Horizontal seams reuse the vertical passes on a
//! transposed image.

#[macro_use]
pub mod ternary;

pub mod twodmap;

pub mod energy;
pub use energy::{calculate_energy, EnergyMap};

pub mod cumulative;
pub use cumulative::{cumulative_energy, CumulativeEnergyMap};

pub mod flipper;
pub use flipper::{transpose, Flipper};

pub mod seamfinder;
pub use seamfinder::{cumulative_to_vertical_seam, GradientSeams, Seam, SeamFinder};

pub mod seamcarver;
pub use seamcarver::{
    carve_horizontal, carve_vertical, remove_horizontal_seam, remove_vertical_seam, seamcarve,
    plan_seams, Axis, SeamCarver,
};

pub mod error;
pub use error::CarveError;

pub mod dump;
pub use dump::energy_to_image;

pub mod codec;
pub use codec::{open_image, read_dimensions, read_rgba, write_png};
