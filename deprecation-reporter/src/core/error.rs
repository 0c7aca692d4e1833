/*!
Errors raised while wiring a reporter from configuration
*/

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading configuration or opening configured sinks.
///
/// Reporting itself never fails; these only surface at setup time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to open sink output {}: {source}", path.display())]
    OpenSink {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
