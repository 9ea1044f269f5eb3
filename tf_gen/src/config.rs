use std::{ffi::OsString, path::PathBuf};

use clap::ArgMatches;
use nalgebra::{point, Point2};
use tf_lib::{baked::LutKind, CurveOptions, Table};

/// App configuration
/// Config is built from args parsed by `clap`
#[derive(Debug)]
pub struct Config {
    /// Directory of stored transfer functions
    pub library: PathBuf,
    /// Transfer function name
    pub name: String,
    /// Start from default curve instead of loading
    pub create: bool,
    /// Stored file may be replaced
    pub overwrite: bool,
    /// Points added before baking
    pub added_points: Vec<Point2<f32>>,
    /// Baked table
    pub table: Table,
    /// Function or preintegration table
    pub kind: LutKind,
    pub options: CurveOptions,
    // Output file name
    pub file_name: OsString,
}

impl Config {
    pub fn from_args(args: ArgMatches) -> Result<Config, String> {
        let library = args
            .value_of_os("library")
            .ok_or("Missing library")?
            .into();

        let name = args.value_of("name").ok_or("Missing name")?.to_string();

        let added_points = match args.values_of("add") {
            Some(values) => parse_points(values)?,
            None => Vec::new(),
        };

        let table = match args.value_of("table") {
            Some("color-alpha") | None => Table::ColorAlpha,
            Some("ambient-specular") => Table::AmbientSpecular,
            Some("advanced") => Table::Advanced,
            Some(other) => return Err(format!("Unknown table {other}")),
        };

        let kind = if args.is_present("preintegrated") {
            LutKind::Preintegrated
        } else {
            LutKind::Function
        };

        let resolution = args
            .value_of("resolution")
            .ok_or("Missing resolution")?
            .parse::<usize>()
            .map_err(|e| format!("Bad resolution: {e}"))?;

        let options = CurveOptions::builder()
            .resolution(resolution)
            .clamp_controls(args.is_present("clamp-controls"))
            .build()
            .map_err(|e| e.to_string())?;

        let file_name = args
            .value_of_os("output-file")
            .ok_or("Missing output file")?
            .into();

        Ok(Config {
            library,
            name,
            create: args.is_present("create"),
            overwrite: args.is_present("overwrite"),
            added_points,
            table,
            kind,
            options,
            file_name,
        })
    }
}

/// Pair up flat list of coordinates
fn parse_points<'a, I>(values: I) -> Result<Vec<Point2<f32>>, String>
where
    I: Iterator<Item = &'a str>,
{
    let coords = values
        .map(|v| v.trim().parse::<f32>().map_err(|e| format!("Bad coordinate {v}: {e}")))
        .collect::<Result<Vec<f32>, String>>()?;

    if coords.len() % 2 != 0 {
        return Err("Points need two coordinates".into());
    }

    Ok(coords.chunks_exact(2).map(|c| point![c[0], c[1]]).collect())
}
