#[macro_use]
extern crate log;
extern crate env_logger;
extern crate serde_json;
extern crate serde;

mod simcontrol;
mod modules;
mod util;

use log::LevelFilter;
use env_logger::Builder;
use std::process::exit;

fn main() {
    let invocation = simcontrol::parse_arguments();

    let level = if invocation.args.verbose {
        LevelFilter::Trace
    } else if invocation.args.debug {
        LevelFilter::Debug
    } else if invocation.args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    // Logs go to stderr, stdout only carries the forwarded results
    Builder::new()
        .filter_level(level)
        .init();

    if let Err(error) = simcontrol::main(&invocation) {
        error!("simcontrol run failed: {}", error.message());
        exit(error.exit_code());
    }
}
