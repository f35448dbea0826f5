//! Operational helpers: logging setup.

use thumbgen_types::{config::OpsConfig, Result, ThumbgenError};
use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global fmt subscriber. Output goes to stderr so stdout stays
/// free for machine-readable reports.
pub fn init_tracing(config: &OpsConfig) -> Result<()> {
    let filter = log_filter(&config.log_level)?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| ThumbgenError::Configuration(format!("tracing init error: {err}")))?;
    Ok(())
}

fn log_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|err| ThumbgenError::Configuration(format!("failed to create log filter: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_directive_filters() {
        assert!(log_filter("debug").is_ok());
        assert!(log_filter("thumbgen_gcode=trace,info").is_ok());
    }

    #[test]
    fn invalid_level_falls_back_to_info() {
        assert!(log_filter("thumbgen=loud").is_ok());
    }
}
