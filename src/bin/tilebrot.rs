// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use clap::{App, Arg, ArgMatches};
use crossbeam::channel::unbounded;
use failure::Error;
use log::debug;
use num::Complex;
use std::str::FromStr;

use tilebrot::preview::ascii_preview;
use tilebrot::{RenderConfig, RenderStats, Tile, TileGrid};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const ITERATIONS: &str = "iterations";
const TILE: &str = "tile";
const THREADS: &str = "threads";
const PREVIEW: &str = "preview";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("tilebrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Tiled Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; the format follows the extension (png, pgm, ...)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("640x480")
                .validator(|s| validate_pair::<u16>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-2.0,-1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Left lower corner of the viewport"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.5,1.25")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Right upper corner of the viewport"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration cap per point"),
        )
        .arg(
            Arg::with_name(TILE)
                .required(false)
                .long(TILE)
                .short("T")
                .takes_value(true)
                .default_value("256")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        65536,
                        "Could not parse tile size",
                        "Tile size must be between 1 and 65536",
                    )
                })
                .help("Edge length of a render tile, in pixels"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver"),
        )
        .arg(
            Arg::with_name(PREVIEW)
                .long(PREVIEW)
                .short("p")
                .help("Print an ASCII preview of the result"),
        )
        .get_matches()
}

fn config(matches: &ArgMatches) -> Result<RenderConfig, Error> {
    let value = |name| value_or_default(matches, name);
    let (width, height) = parse_pair::<usize>(value(SIZE), 'x')
        .ok_or_else(|| failure::err_msg("Error parsing image dimensions"))?;
    let leftlower = parse_complex(value(LEFTLOWER))
        .ok_or_else(|| failure::err_msg("Error parsing left lower point"))?;
    let rightupper = parse_complex(value(RIGHTUPPER))
        .ok_or_else(|| failure::err_msg("Error parsing right upper point"))?;
    Ok(RenderConfig {
        width,
        height,
        max_iter: u32::from_str(value(ITERATIONS))?,
        x_min: leftlower.re,
        x_max: rightupper.re,
        y_min: leftlower.im,
        y_max: rightupper.im,
        tile_size: usize::from_str(value(TILE))?,
        threads: usize::from_str(value(THREADS))?,
    })
}

fn report(stats: &RenderStats) {
    println!("Resolution: {}x{}", stats.resolution.0, stats.resolution.1);
    println!("Iterations: {}", stats.max_iter);
    println!(
        "Tiles: {}x{} ({}x{})",
        stats.tiles.0, stats.tiles.1, stats.tile_size, stats.tile_size
    );
    println!("Render time: {:.2} seconds", stats.elapsed.as_secs_f64());
    println!("Speed: {:.2} megapixels/sec", stats.megapixels_per_second());
}

fn run() -> Result<(), Error> {
    let matches = args();
    let config = config(&matches)?;
    config.validate()?;
    let total = TileGrid::new(config.resolution(), config.tile_size)?.len();

    let (tx, rx) = unbounded::<Tile>();
    let rendered = crossbeam::scope(|spawner| {
        spawner.spawn(move |_| {
            for (done, tile) in rx.iter().enumerate() {
                debug!("tile {}/{} at {},{}", done + 1, total, tile.x, tile.y);
            }
        });
        let rendered = tilebrot::render_with_stats(&config, Some(&tx));
        drop(tx);
        rendered
    })
    .map_err(|_| failure::err_msg("Progress observer panicked"))?;
    let (image, stats) = rendered?;

    report(&stats);
    if matches.is_present(PREVIEW) {
        let preview = ascii_preview(&image, image.width(), image.height(), 40, 20)
            .ok_or_else(|| failure::err_msg("Image buffer does not match its shape"))?;
        print!("{}", preview);
    }
    image.save(value_or_default(&matches, OUTPUT))?;
    Ok(())
}

fn value_or_default<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches.value_of(name).unwrap_or_default()
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
