mod cmd;

use crate::cmd::cli::Cli;
use crate::cmd::config::Config;

use clap::Parser;
use env_logger::{Builder, Env};
use std::process;

fn main() {
    let cli = Cli::parse();
    let default_level = if cli.quiet { "warn" } else { "info" };
    Builder::from_env(Env::new().filter_or("OLSFIT_LOG", default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut cfg: Config = cli.into_config();
    if let Err(e) = cfg.run() {
        if !e.is_reported() {
            eprintln!("{e}");
        }
        process::exit(1);
    }
}
