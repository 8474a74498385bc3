// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The minimum-cost-to-reach grid
//!
//! A single top-to-bottom dynamic programming pass over an energy map.
//! Each interior cell holds its own energy plus the cheapest of the
//! (up to) three cells above it.

use crate::cq;
use crate::energy::EnergyMap;
use crate::twodmap::TwoDimensionalMap;
use std::ops::{Index, RangeInclusive};

/// The cheapest cost of reaching every pixel from the top of the image.
///
/// Not every cell is computed.  The cells that are not stay at zero,
/// and the seam locator depends on exactly which ones those are:
///
/// * Row 0 is zero.  Row 0 of the energy map is a border row, and so
///   is zero itself; the planner does not copy it.
/// * Columns 0 and `width - 1` are zero on every row.  Seams never
///   enter them.
/// * Every other cell is written exactly once.
///
/// A map narrower than three pixels has no interior and is all zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeEnergyMap(TwoDimensionalMap<f64>);

impl CumulativeEnergyMap {
    pub fn width(&self) -> u32 {
        self.0.width
    }

    pub fn height(&self) -> u32 {
        self.0.height
    }

    /// The columns seams are allowed to occupy: `1..=width - 2`.  Empty
    /// for maps narrower than three pixels.
    pub fn interior(&self) -> RangeInclusive<u32> {
        match self.0.width {
            0..=2 => RangeInclusive::new(1, 0),
            w => RangeInclusive::new(1, w - 2),
        }
    }

    /// One full row of costs, edge columns included.
    pub fn row(&self, y: u32) -> &[f64] {
        self.0.row(y)
    }
}

impl Index<(u32, u32)> for CumulativeEnergyMap {
    type Output = f64;

    fn index(&self, point: (u32, u32)) -> &f64 {
        &self.0[point]
    }
}

/// Build the cumulative energy map for an energy map.
///
/// For each row after the first, and each interior column `x`:
///
/// ```text
///    cum(x, y) = e(x, y) + min(cum(x-1, y-1), cum(x, y-1), cum(x+1, y-1))
/// ```
///
/// At the leftmost interior column only `x` and `x+1` are considered;
/// at the rightmost only `x-1` and `x`.  When those are the same column
/// (a three pixel wide image) the only candidate is `x` itself.  The
/// candidates are exactly the cells the seam locator may step to, so
/// the cost along any located seam never decreases going down.
pub fn cumulative_energy(energy: &EnergyMap) -> CumulativeEnergyMap {
    let (width, height) = energy.dimensions();
    let mut cum: TwoDimensionalMap<f64> = TwoDimensionalMap::new(width, height);
    if width < 3 {
        return CumulativeEnergyMap(cum);
    }

    let (first, last) = (1, width - 2);
    for y in 1..height {
        for x in first..=last {
            let from = cq!(x == first, x, x - 1);
            let to = cq!(x == last, x, x + 1);
            let cheapest = (from..=to)
                .map(|px| cum[(px, y - 1)])
                .fold(f64::INFINITY, f64::min);
            cum[(x, y)] = energy[(x, y)] + cheapest;
        }
    }
    CumulativeEnergyMap(cum)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENERGY_DATA: [f64; 20] = [
        9., 9., 0., 9., 9., //
        9., 1., 9., 8., 9., //
        9., 9., 9., 9., 0., //
        9., 9., 9., 0., 9.,
    ];

    fn energy_map(width: u32, height: u32, data: &[f64]) -> EnergyMap {
        EnergyMap::from_raw(width, height, data.to_vec()).unwrap()
    }

    #[test]
    fn fills_interior_columns_row_by_row() {
        let cum = cumulative_energy(&energy_map(5, 4, &ENERGY_DATA));
        assert_eq!(cum.row(0), &[0., 0., 0., 0., 0.]);
        assert_eq!(cum.row(1), &[0., 1., 9., 8., 0.]);
        assert_eq!(cum.row(2), &[0., 10., 10., 17., 0.]);
        assert_eq!(cum.row(3), &[0., 19., 19., 10., 0.]);
    }

    #[test]
    fn edge_columns_and_top_row_stay_zero() {
        let data: Vec<f64> = (0..42).map(|i| (i % 7) as f64 + 1.0).collect();
        let cum = cumulative_energy(&energy_map(7, 6, &data));
        for y in 0..6 {
            assert_eq!(cum[(0, y)], 0.0);
            assert_eq!(cum[(6, y)], 0.0);
        }
        assert!(cum.row(0).iter().all(|c| *c == 0.0));
        assert!((1..6).all(|y| cum.interior().all(|x| cum[(x, y)] > 0.0)));
    }

    #[test]
    fn three_wide_map_is_a_single_column_sum() {
        let data = [0., 0., 0., 0., 5., 0., 0., 7., 0.];
        let cum = cumulative_energy(&energy_map(3, 3, &data));
        assert_eq!(cum.interior(), 1..=1);
        assert_eq!(cum[(1, 1)], 5.0);
        assert_eq!(cum[(1, 2)], 12.0);
    }

    #[test]
    fn narrow_maps_have_no_interior() {
        let cum = cumulative_energy(&energy_map(2, 2, &[1., 2., 3., 4.]));
        assert!(cum.interior().next().is_none());
        assert_eq!(cum.row(1), &[0., 0.]);
    }
}
