use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;
use crate::mkdir::CreateOptions;
use crate::mode::Mode;
use crate::report::Verbosity;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "MD_CONFIG";

/// Defaults loaded from `<config_dir>/md/config.toml` (or `--config`).
#[derive(Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MdConfig {
    #[serde(default)]
    pub parents: bool,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub explicit: bool,
    pub mode: Option<Mode>,
}

/// Effective settings for one invocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Options {
    pub create: CreateOptions,
    pub verbosity: Verbosity,
}

impl Options {
    /// Command line flags win over file defaults. Boolean flags can only
    /// switch a behaviour on.
    pub fn merge(config: &MdConfig, cli: &Cli) -> Self {
        Self {
            create: CreateOptions {
                parents: cli.parents || config.parents,
                mode: cli.mode.or(config.mode).unwrap_or_default(),
            },
            verbosity: Verbosity::from_flags(
                cli.verbose || config.verbose,
                cli.explicit || config.explicit,
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConfigPathSource {
    Explicit,
    Environment,
    UserDefault,
}

impl ConfigPathSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigPathSource::Explicit => "explicit",
            ConfigPathSource::Environment => "environment",
            ConfigPathSource::UserDefault => "user-default",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfigPath {
    pub path: Utf8PathBuf,
    pub source: ConfigPathSource,
}

/// Pick the config file to read, if any. An explicit or environment path is
/// returned even when missing so the caller reports it; the user default is
/// only used when present.
pub fn resolve_config_path(
    explicit: Option<PathBuf>,
    env: Option<OsString>,
) -> Result<Option<ResolvedConfigPath>> {
    let chosen = explicit
        .map(|path| (path, ConfigPathSource::Explicit))
        .or_else(|| {
            env.filter(|value| !value.is_empty())
                .map(|value| (PathBuf::from(value), ConfigPathSource::Environment))
        });

    if let Some((path, source)) = chosen {
        let path = Utf8PathBuf::from_path_buf(path)
            .map_err(|_| anyhow!("config path must be valid UTF-8"))?;
        return Ok(Some(ResolvedConfigPath { path, source }));
    }

    let Some(mut path) = dirs::config_dir() else {
        return Ok(None);
    };
    path.push("md");
    path.push("config.toml");
    if !path.is_file() {
        return Ok(None);
    }
    let path =
        Utf8PathBuf::from_path_buf(path).map_err(|_| anyhow!("config path must be valid UTF-8"))?;
    Ok(Some(ResolvedConfigPath {
        path,
        source: ConfigPathSource::UserDefault,
    }))
}

/// Load a configuration file from disk and deserialize it.
pub fn load_from_path(path: &Utf8Path) -> Result<MdConfig> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path))?;
    toml::from_str(&raw).with_context(|| format!("parsing config {}", path))
}

/// Resolve and load the defaults for this invocation.
pub fn load(explicit: Option<PathBuf>) -> Result<MdConfig> {
    let env = std::env::var_os(CONFIG_ENV);
    match resolve_config_path(explicit, env)? {
        Some(resolved) => {
            debug!(
                path = %resolved.path,
                source = resolved.source.as_str(),
                "loading config"
            );
            load_from_path(&resolved.path)
        }
        None => Ok(MdConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn write_config(dir: &TempDir, body: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("config.toml")).unwrap();
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn parses_all_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "parents = true\nverbose = true\nexplicit = true\nmode = \"750\"\n",
        );
        let config = load_from_path(&path).unwrap();
        assert_eq!(
            config,
            MdConfig {
                parents: true,
                verbose: true,
                explicit: true,
                mode: Some("750".parse().unwrap()),
            }
        );
    }

    #[test]
    fn rejects_unknown_keys_and_bad_modes() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "recursive = true\n");
        assert!(load_from_path(&path).is_err());

        let path = write_config(&dir, "mode = \"999\"\n");
        let err = format!("{:#}", load_from_path(&path).unwrap_err());
        assert!(err.contains("invalid mode"), "{err}");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load(Some(missing)).is_err());
    }

    #[test]
    fn explicit_path_beats_environment() {
        let resolved = resolve_config_path(
            Some(PathBuf::from("cli.toml")),
            Some(OsString::from("env.toml")),
        )
        .unwrap()
        .unwrap();
        assert_eq!(resolved.source, ConfigPathSource::Explicit);
        assert_eq!(resolved.path, "cli.toml");

        let resolved = resolve_config_path(None, Some(OsString::from("env.toml")))
            .unwrap()
            .unwrap();
        assert_eq!(resolved.source, ConfigPathSource::Environment);
    }

    #[test]
    fn flags_override_file_defaults() {
        let config = MdConfig {
            parents: true,
            verbose: false,
            explicit: true,
            mode: Some("750".parse().unwrap()),
        };

        let cli = Cli::try_parse_from(["md", "x"]).unwrap();
        let options = Options::merge(&config, &cli);
        assert!(options.create.parents);
        assert_eq!(options.create.mode.bits(), 0o750);
        assert_eq!(options.verbosity, Verbosity::Quiet);

        let cli = Cli::try_parse_from(["md", "-v", "-m", "700", "x"]).unwrap();
        let options = Options::merge(&config, &cli);
        assert_eq!(options.create.mode.bits(), 0o700);
        assert_eq!(options.verbosity, Verbosity::Explicit);
    }

    #[test]
    fn defaults_without_config() {
        let cli = Cli::try_parse_from(["md", "x"]).unwrap();
        let options = Options::merge(&MdConfig::default(), &cli);
        assert_eq!(options, Options::default());
        assert_eq!(options.create.mode, Mode::DEFAULT);
    }
}
