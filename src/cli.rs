//! Command line arguments

use crate::config::{Config, ConfigError};
use crate::tests::TestMode;
use clap::Parser;
use std::path::PathBuf;

/// Test the two hardware switches on an input device.
///
/// Without options, asks for each switch in turn and exits 0 on pass, 1 on
/// fail. With `-w`, waits for a single press and exits with 1 for switch 1,
/// 2 for switch 2, -2 on timeout and -1 on any other error.
#[derive(Debug, Parser)]
#[command(name = "switch-testkit", version, about, long_about)]
pub struct Cli {
    /// Wait for a single key press and report which switch it was
    #[arg(short = 'w', long = "wait")]
    pub wait: bool,

    /// Seconds to wait for user response [default: 10]
    #[arg(short = 't', long = "timeout", value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Input event device to read
    #[arg(short = 'd', long = "device", value_name = "PATH")]
    pub device: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Write a JSON report of the switch test to this file
    #[arg(long = "report", value_name = "PATH", conflicts_with = "wait")]
    pub report: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> TestMode {
        if self.wait {
            TestMode::WaitOnce
        } else {
            TestMode::Sequence
        }
    }

    /// Load the configuration named by `-c`, or the default config file, and
    /// apply command line overrides.
    ///
    /// A missing default file yields defaults; a file that exists but cannot
    /// be read or parsed is an error.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Apply command line overrides on top of a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if let Some(timeout) = self.timeout {
            config.switch.timeout_secs = timeout;
        }
        if let Some(device) = &self.device {
            config.switch.device = device.clone();
        }
        if self.no_color {
            config.log.color = false;
        }
        config.log.raise_verbosity(self.verbose);
    }
}
