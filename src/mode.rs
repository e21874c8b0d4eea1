use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use snafu::prelude::*;

/// Permission bits applied to a newly created directory.
///
/// The value is handed to `mkdir(2)` unchanged, so the process umask still
/// applies on top of it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Mode(u32);

impl Mode {
    /// rwxrwxr-x
    pub const DEFAULT: Mode = Mode(0o775);

    const MAX: u32 = 0o7777;

    pub fn bits(self) -> u32 {
        self.0
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04o}", self.0)
    }
}

/// Rejected `--mode` value.
#[derive(Debug, Snafu)]
#[snafu(display("invalid mode '{input}': expected octal digits between 0 and 7777"))]
pub struct ParseModeError {
    input: String,
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        ensure!(
            !digits.is_empty() && digits.bytes().all(|b| (b'0'..=b'7').contains(&b)),
            ParseModeSnafu { input: s }
        );
        let bits = u32::from_str_radix(digits, 8)
            .ok()
            .filter(|bits| *bits <= Self::MAX)
            .context(ParseModeSnafu { input: s })?;
        Ok(Mode(bits))
    }
}

impl TryFrom<String> for Mode {
    type Error = ParseModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
