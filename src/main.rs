mod asset_name;
mod atlas;
mod commands;
mod image;
mod options;
mod padding;

use std::process;

use structopt::StructOpt;

use crate::options::{Options, Subcommand};

fn main() {
    let Options { global, command } = Options::from_args();

    let default_filter = match global.verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let log_env = env_logger::Env::default().default_filter_or(default_filter);
    env_logger::Builder::from_env(log_env).init();

    match run(global, command) {
        Ok(_) => {}
        Err(err) => {
            eprintln!("Error: {:?}", err);
            process::exit(1);
        }
    }
}

fn run(global: options::GlobalOptions, command: Subcommand) -> Result<(), anyhow::Error> {
    match command {
        Subcommand::Pack(pack_options) => commands::pack(global, pack_options),
        Subcommand::List(list_options) => commands::list(global, list_options),
        Subcommand::Lookup(lookup_options) => commands::lookup(global, lookup_options),
    }
}
