// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Command-line parsing.

use anyhow::{anyhow, bail, Context, Result};
use artwall_detection::DetectionMode;
use std::path::PathBuf;
use std::str::FromStr;

pub const USAGE: &str = "\
Usage:
  artwall <scene.json> [options]
  artwall --demo-room <width> <depth> <height> [options]

Options:
  --artworks <n>         Number of artworks to place (default: catalog size, or 8)
  --catalog <file>       Artwork metadata (JSON array of {title, description, image})
  --config <file>        Detection config (JSON, partial allowed)
  --placement <file>     Placement config (JSON, partial allowed)
  --spacing <m>          Minimum distance between artworks
  --height <m>           Height of artwork centers above the floor
  --mode <raycast|faces> Detection mode
  --faces                Shorthand for --mode faces
  --debug                Log per-stage diagnostics
  --output <file>        Write the layout here instead of stdout
  -h, --help             Show this help";

/// Where the scene comes from
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Scene(PathBuf),
    DemoRoom { width: f64, depth: f64, height: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub input: Input,
    pub artworks: Option<usize>,
    pub catalog: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub placement: Option<PathBuf>,
    pub spacing: Option<f64>,
    pub height: Option<f64>,
    pub mode: Option<DetectionMode>,
    pub debug: bool,
    pub output: Option<PathBuf>,
}

/// Parsed command line; `None` means help was requested
pub fn parse(args: &[String]) -> Result<Option<Options>> {
    let Some(first) = args.first() else {
        return Ok(None);
    };
    if first == "--help" || first == "-h" {
        return Ok(None);
    }

    let mut i = 0;
    let input = if first == "--demo-room" {
        let width = value(args, 1, first)?;
        let depth = value(args, 2, first)?;
        let height = value(args, 3, first)?;
        i += 4;
        Input::DemoRoom { width, depth, height }
    } else if first.starts_with("--") {
        bail!("Expected a scene file or --demo-room, got {}", first);
    } else {
        i += 1;
        Input::Scene(PathBuf::from(first))
    };

    let mut options = Options {
        input,
        artworks: None,
        catalog: None,
        config: None,
        placement: None,
        spacing: None,
        height: None,
        mode: None,
        debug: false,
        output: None,
    };

    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--artworks" => {
                i += 1;
                options.artworks = Some(value(args, i, flag)?);
            }
            "--catalog" => {
                i += 1;
                options.catalog = Some(value(args, i, flag)?);
            }
            "--config" => {
                i += 1;
                options.config = Some(value(args, i, flag)?);
            }
            "--placement" => {
                i += 1;
                options.placement = Some(value(args, i, flag)?);
            }
            "--spacing" => {
                i += 1;
                options.spacing = Some(value(args, i, flag)?);
            }
            "--height" => {
                i += 1;
                options.height = Some(value(args, i, flag)?);
            }
            "--mode" => {
                i += 1;
                options.mode = Some(value(args, i, flag)?);
            }
            "--faces" => {
                options.mode = Some(DetectionMode::Faces);
            }
            "--debug" => {
                options.debug = true;
            }
            "--output" => {
                i += 1;
                options.output = Some(value(args, i, flag)?);
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("Unknown option: {}", other),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn value<T>(args: &[String], index: usize, flag: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = args
        .get(index)
        .with_context(|| format!("Missing value for {}", flag))?;
    raw.parse()
        .map_err(|e| anyhow!("Invalid value '{}' for {}: {}", raw, flag, e))
}
