// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// A one-line conditional expression.  Rust's `if` is already an
/// expression, but `cargo fmt` spreads it over five lines, and the
/// border rules of the planner and the backtracker read as a table
/// once they each fit on one line.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn picks_the_matching_arm() {
        let width = 5u32;
        assert_eq!(cq!(width > 3, width - 2, 1), 3);
        assert_eq!(cq!(width > 8, width - 2, 1), 1);
    }
}
