//! Logging setup
//!
//! # Environment Variables
//!
//! - `PARABENCH_LOG`: EnvFilter directives (default: `warn`)
//! - `PARABENCH_LOG_FORMAT`: `pretty` (default) or `json`
//!
//! Logs go to stderr so stdout carries only the demo output (and, in worker
//! mode, only protocol lines).

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILTER_ENV: &str = "PARABENCH_LOG";
pub const LOG_FORMAT_ENV: &str = "PARABENCH_LOG_FORMAT";
const DEFAULT_FILTER: &str = "warn";

pub fn init_logging() -> Result<()> {
    let log_format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))?;

    match log_format.as_str() {
        "json" => {
            // Machine-readable structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .try_init()?;
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
