use std::path::PathBuf;

use blockfall_engine::{PieceSeed, SessionConfig};
use clap::{Parser, Subcommand};
use log::LevelFilter;

use self::{play::PlayArg, simulate::SimulateArg};
use crate::{logger, util};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Run a headless game with random input and print a JSON summary
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Session settings shared by every mode.
///
/// Values are layered: built-in defaults, then the `--config` file, then
/// individual flags.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionConfigArg {
    /// JSON file with session settings
    #[clap(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Board width in columns
    #[clap(long)]
    width: Option<u16>,
    /// Board height in rows
    #[clap(long)]
    height: Option<u16>,
    /// Piece sequence seed (32 hex digits)
    #[clap(long, value_name = "HEX")]
    seed: Option<PieceSeed>,
}

impl SessionConfigArg {
    pub(crate) fn resolve(&self) -> anyhow::Result<SessionConfig> {
        let base = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => SessionConfig::default(),
        };
        let config = self.apply_overrides(base);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, base: SessionConfig) -> SessionConfig {
        SessionConfig {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            seed: self.seed.or(base.seed),
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct LogArg {
    /// Write log records to this file
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
    /// Maximum level of records written to the log file
    #[clap(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Default for LogArg {
    fn default() -> Self {
        Self {
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl LogArg {
    pub(crate) fn init(&self) -> anyhow::Result<()> {
        if let Some(path) = &self.log_file {
            logger::init(path, self.log_level)?;
        }
        Ok(())
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let result = match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg),
        Mode::Simulate(arg) => simulate::run(&arg),
    };
    logger::flush();
    result
}

#[cfg(test)]
mod tests {
    use std::fs;

    use clap::{Args as _, CommandFactory as _, FromArgMatches as _};

    use super::*;

    #[test]
    fn test_command_args() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let arg = SessionConfigArg {
            width: Some(10),
            ..SessionConfigArg::default()
        };
        let config = arg.resolve().unwrap();
        assert_eq!((config.width, config.height), (10, 25));
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_flags_override_config_file() {
        let path = std::env::temp_dir().join(format!(
            "blockfall-config-test-{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "width": 8, "height": 12, "seed": "000000000000000000000000000000aa" }"#,
        )
        .unwrap();

        let arg = SessionConfigArg {
            config: Some(path.clone()),
            height: Some(20),
            ..SessionConfigArg::default()
        };
        let config = arg.resolve();
        fs::remove_file(&path).unwrap();

        let config = config.unwrap();
        assert_eq!((config.width, config.height), (8, 20));
        assert_eq!(
            config.seed,
            Some("000000000000000000000000000000aa".parse().unwrap())
        );
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let arg = SessionConfigArg {
            height: Some(100),
            ..SessionConfigArg::default()
        };
        let err = arg.resolve().unwrap_err();
        assert!(err.to_string().contains("height 100"));
    }

    #[test]
    fn test_missing_config_file() {
        let arg = SessionConfigArg {
            config: Some("/nonexistent/blockfall.json".into()),
            ..SessionConfigArg::default()
        };
        let err = arg.resolve().unwrap_err();
        assert!(err.to_string().contains("Failed to open config file"));
    }

    #[test]
    fn test_default_log_arg_matches_flags() {
        let matches = LogArg::augment_args(clap::Command::new("blockfall"))
            .try_get_matches_from(["blockfall"])
            .unwrap();
        let parsed = LogArg::from_arg_matches(&matches).unwrap();
        let default = LogArg::default();
        assert_eq!(parsed.log_level, default.log_level);
        assert_eq!(default.log_level, LevelFilter::Info);
        assert_eq!(parsed.log_file, default.log_file);
        assert!(CommandArgs::try_parse_from(["blockfall"]).unwrap().mode.is_none());
    }

    #[test]
    fn test_parse_simulate_args() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "simulate",
            "--ticks",
            "50",
            "--seed",
            "0123456789abcdef0123456789abcdef",
        ])
        .unwrap();
        assert!(matches!(args.mode, Some(Mode::Simulate(_))));

        assert!(CommandArgs::try_parse_from(["blockfall", "play", "--seed", "xyz"]).is_err());
    }
}
