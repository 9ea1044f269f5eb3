use config::Config;

mod args;
mod bake;
mod config;
mod file;
mod header;

use crate::{args::get_command, bake::bake};

pub fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cmd = get_command();
    let args = cmd.get_matches();

    let cfg = match Config::from_args(args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    log::debug!("{:?}", cfg);

    if let Err(e) = bake(&cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("Baking finished, result in {:#?}", cfg.file_name);
}
