// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{value_t, App, Arg};
use failure::{Error, ResultExt};
use log::{error, info};
use seamshrink::{
    calculate_energy, energy_to_image, plan_seams, read_dimensions, read_rgba, write_png,
    SeamCarver,
};
use std::process;
use std::time::Instant;

fn run() -> Result<(), Error> {
    let matches = App::new("seamshrink")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Shrink an image by seam carving")
        .arg(
            Arg::with_name("INPUT")
                .help("The image to shrink")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Where to write the result, always as PNG")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("WIDTH")
                .help("Target width, no larger than the input's")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("HEIGHT")
                .help("Target height, no larger than the input's")
                .required(true)
                .index(4),
        )
        .arg(
            Arg::with_name("energy-map")
                .long("energy-map")
                .value_name("PATH")
                .takes_value(true)
                .help("Also write the input's energy map as a greyscale PNG"),
        )
        .get_matches();

    let input = matches.value_of("INPUT").unwrap_or_default();
    let output = matches.value_of("OUTPUT").unwrap_or_default();
    let width = value_t!(matches, "WIDTH", u32).unwrap_or_else(|e| e.exit());
    let height = value_t!(matches, "HEIGHT", u32).unwrap_or_else(|e| e.exit());

    // Reading the header is enough to reject a bad size.
    let dimensions = read_dimensions(input).with_context(|_| format!("cannot open {}", input))?;
    plan_seams(dimensions, (width, height))?;

    let start = Instant::now();
    let image = read_rgba(input).with_context(|_| format!("cannot decode {}", input))?;

    if let Some(path) = matches.value_of("energy-map") {
        write_png(energy_to_image(&calculate_energy(&image)), path)
            .with_context(|_| format!("cannot write {}", path))?;
    }

    let carved = SeamCarver::new(&image).carve(width, height)?;
    info!("seamcarving took {:?}", start.elapsed());

    write_png(carved, output).with_context(|_| format!("cannot write {}", output))?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        error!("{}", err);
        for cause in err.iter_causes() {
            error!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
