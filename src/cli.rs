use std::path::PathBuf;

use clap::Parser;
use clap::builder::{OsStringValueParser, TypedValueParser};

use crate::mode::Mode;

/// Command line surface of `md`.
#[derive(Parser, Debug)]
#[command(
    name = "md",
    version,
    about = "Create the DIRECTORY(ies), if they do not already exist.",
    after_help = "Examples:\n  \
        md test      creates directory 'test' if it doesn't exist\n  \
        md a b c     creates directories 'a', 'b' and 'c'\n  \
        md -vp a/b   creates 'a' and 'a/b', printing a message for each"
)]
pub struct Cli {
    /// No error if existing, make parent directories as needed.
    #[arg(short = 'p', long = "parents")]
    pub parents: bool,
    /// Print a message for each created directory.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
    /// With --verbose, also print the working directory the directory was created in.
    #[arg(short = 'e', long = "explicit")]
    pub explicit: bool,
    /// Permission bits (octal) for the final directory of each operand.
    #[arg(short = 'm', long = "mode", value_name = "MODE")]
    pub mode: Option<Mode>,
    /// Read defaults from this TOML file.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
    // Empty strings pass through so they fail per operand, not as a usage error.
    #[arg(
        value_name = "DIRECTORY",
        required = true,
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    pub directories: Vec<PathBuf>,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
