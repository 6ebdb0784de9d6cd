//! Logger setup
//!
//! Output goes through `env_logger` without timestamps or module targets so
//! the prompts read like plain console text. `RUST_LOG` still wins over the
//! configured level when set.

use crate::config::LogConfig;
use env_logger::{Builder, Env, WriteStyle};

/// Build a logger from `config` without installing it
pub fn builder(config: &LogConfig) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(config.level)
        .format_timestamp(None)
        .format_target(false)
        .write_style(write_style(config.color))
        .parse_env(Env::default());
    builder
}

/// Install the global logger. Later calls are ignored.
pub fn init(config: &LogConfig) {
    let _ = builder(config).try_init();
}

fn write_style(color: bool) -> WriteStyle {
    if color {
        WriteStyle::Auto
    } else {
        WriteStyle::Never
    }
}
