//! Switch TestKit - Hardware switch diagnostic utility
//!
//! Exit codes follow the two modes: 0 pass / 1 fail for the switch test, and
//! 1, 2, -2 (timeout) or -1 (error) when waiting for a single press.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use log::{debug, error};
use std::process;

use switch_testkit::{
    cli::Cli,
    config::LogConfig,
    logging,
    report::SequenceReport,
    switch::{DeviceStream, EventWaiter, SwitchTable},
    tests::{LogObserver, Sequencer, TestMode},
};

/// Exit status for usage and setup errors
const EXIT_ERROR: i32 = -1;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EXIT_ERROR,
            };
            process::exit(code);
        }
    };

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            // Setup may fail before the configured logger is installed
            logging::init(&LogConfig::default());
            error!("{:#}", e);
            EXIT_ERROR
        }
    };
    process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let config = cli.load_config().context("loading config")?;
    logging::init(&config.log);

    let device = &config.switch.device;
    let mode = cli.mode();
    debug!("running {} mode on {}", mode, device.display());

    // Closed on drop, on every return path
    let mut stream = DeviceStream::open(device)
        .with_context(|| format!("opening input device {}", device.display()))?;

    let switches = SwitchTable::default();
    let mut sequencer = Sequencer::new(EventWaiter::new(switches.clone()), config.timeout());

    match mode {
        TestMode::WaitOnce => Ok(sequencer.wait_once(&mut stream).exit_code()),
        TestMode::Sequence => {
            let verdict = sequencer.run_sequence(&mut stream, &switches, &mut LogObserver);
            if let Some(path) = &cli.report {
                let report =
                    SequenceReport::new(device, sequencer.timeout(), sequencer.steps(), &verdict);
                report
                    .export_json(path)
                    .with_context(|| format!("writing report to {}", path.display()))?;
            }
            Ok(verdict.exit_code())
        }
    }
}
