//! Argument parsing and validation
//! Uses library `clap`

use std::ffi::OsStr;

use clap::{Arg, Command, ValueHint};

// Tables must have at least two samples
pub fn is_resolution(num: &str) -> Result<(), String> {
    let n = num.parse::<u32>();
    match n {
        Ok(n) => {
            if n >= 2 {
                Ok(())
            } else {
                Err("Resolution must be at least 2".into())
            }
        }
        Err(_) => Err("Number required".into()),
    }
}

pub fn is_float_number(num: &str) -> Result<(), String> {
    match num.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(()),
        _ => Err("Number required".into()),
    }
}

pub fn is_curve_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Name must not be empty".into());
    }
    if name.contains(|c: char| c == '/' || c == '\\') {
        return Err("Name must not contain path separators".into());
    }
    Ok(())
}

pub const TABLE_NAMES: &[&str] = &["color-alpha", "ambient-specular", "advanced"];

pub fn get_command<'a>() -> Command<'a> {
    Command::new("Tf-gen")
        .version("0.1.0")
        .about("Transfer function table baker")
        .arg(
            Arg::new("library")
                .help("Directory with stored transfer functions")
                .long("library")
                .short('L')
                .value_name("DIR")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::DirPath)
                .default_value_os(OsStr::new(".")),
        )
        .arg(
            Arg::new("name")
                .help("Name of transfer function, file <DIR>/<NAME>.xml")
                .long("name")
                .short('n')
                .required(true)
                .value_name("NAME")
                .validator(is_curve_name),
        )
        .arg(
            Arg::new("create")
                .help("Start from default curve and store it in library")
                .long("create")
                .short('c'),
        )
        .arg(
            Arg::new("overwrite")
                .help("Allow replacing stored transfer function, also stores added points")
                .long("overwrite"),
        )
        .arg(
            Arg::new("add")
                .help("Add control point, can be repeated")
                .long("add")
                .short('a')
                .multiple_occurrences(true)
                .number_of_values(2)
                .value_names(&["X", "Y"])
                .use_value_delimiter(true)
                .require_value_delimiter(true)
                .require_equals(true)
                .validator(is_float_number),
        )
        .arg(
            Arg::new("table")
                .help("Which table to bake")
                .long("table")
                .short('t')
                .default_value("color-alpha")
                .value_name("TABLE")
                .possible_values(TABLE_NAMES),
        )
        .arg(
            Arg::new("preintegrated")
                .help("Bake preintegration table instead of 1D function")
                .long("preintegrated")
                .short('p'),
        )
        .arg(
            Arg::new("resolution")
                .help("Samples per table side")
                .long("resolution")
                .short('r')
                .value_name("N")
                .default_value("256")
                .validator(is_resolution),
        )
        .arg(
            Arg::new("clamp-controls")
                .help("Keep control handles inside the unit square")
                .long("clamp-controls"),
        )
        .arg(
            Arg::new("output-file")
                .help("File name to output")
                .long("output-file")
                .short('o')
                .value_name("FILE")
                .allow_invalid_utf8(true)
                .value_hint(ValueHint::FilePath)
                .default_value_os(OsStr::new("a.lut")),
        )
}
