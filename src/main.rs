use std::process::ExitCode;

mod cli;
mod config;
mod error;
mod logging;
mod mkdir;
mod mode;
mod path;
mod report;
mod runner;

fn main() -> ExitCode {
    logging::init();
    let cli = cli::parse();
    runner::run(cli)
}
