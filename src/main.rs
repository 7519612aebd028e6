// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use gcode_post::files::{output_path, transform_file};
use gcode_post::machine::{Machine, Options};

#[derive(Parser, Debug)]
#[command(name = "gcode-post", version,
          about = "Rewrite a G-code file for a machine, expanding arcs into line segments")]
struct Cli {
    /// Path of the file to process.
    #[arg(short, long)]
    file: PathBuf,

    /// Machine command set to use.
    #[arg(short, long, value_enum, default_value_t = Machine::Snapmaker)]
    machine: Machine,

    /// Points sampled per arc, including both endpoints.
    #[arg(short = 'n', long, default_value_t = 100,
          value_parser = clap::value_parser!(u32).range(2..))]
    points: u32,

    /// Output path; defaults to `<name>-transformed.<ext>` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log more (-v for every rewrite, -vv for every line).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(None)
        .init();

    let path = cli.file.canonicalize()
                       .with_context(|| format!("cannot resolve {}", cli.file.display()))?;
    let target = cli.output.unwrap_or_else(|| output_path(&path));
    let options = Options { num_points: cli.points as usize };
    transform_file(cli.machine, &path, &target, &options)?;
    Ok(())
}
