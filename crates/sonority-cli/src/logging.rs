use anyhow::{bail, Result};
use twyg::LogLevel;

use crate::config::LoggingConfig;

/// Install twyg as the global logger.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let opts = twyg::OptsBuilder::new()
        .coloured(config.coloured)
        .level(parse_level(&config.level)?)
        .report_caller(config.report_caller)
        .build()
        .map_err(|e| anyhow::anyhow!("Invalid logging options: {e:?}"))?;

    twyg::setup(opts).map_err(|e| anyhow::anyhow!("Could not set up logging: {e:?}"))?;
    Ok(())
}

fn parse_level(level: &str) -> Result<LogLevel> {
    Ok(match level.to_ascii_lowercase().as_str() {
        "trace" => LogLevel::Trace,
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" | "warning" => LogLevel::Warn,
        "error" => LogLevel::Error,
        other => bail!("Unknown log level: {other}\n\nValid levels: trace, debug, info, warn, error"),
    })
}
