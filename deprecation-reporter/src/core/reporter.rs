/*!
The reporter legacy extension code calls when it hits a superseded path
*/

use std::sync::Arc;

use deprecation_notice::{DeprecationNotice, DeprecationOptions};
use tracing::trace;

use crate::core::{
    config::ReporterConfig,
    error::ConfigError,
    sinks::{DeprecationSink, SinkSet},
};

/// Builds a [`DeprecationNotice`] per call and forwards it to an injected sink.
///
/// The reporter keeps no state of its own: it never validates, deduplicates or
/// batches. Every call to [`report`](Self::report) reaches the sink exactly once.
/// Clones share the same sink.
#[derive(Clone)]
pub struct DeprecationReporter {
    sink: Arc<dyn DeprecationSink>,
}

impl DeprecationReporter {
    pub fn new(sink: impl DeprecationSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }

    /// Wrap a sink that is also held elsewhere
    pub fn from_shared(sink: Arc<dyn DeprecationSink>) -> Self {
        Self { sink }
    }

    /// Assemble the enabled sinks from `config` behind a new reporter
    pub fn from_config(config: &ReporterConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(SinkSet::from_config(&config.sinks)?))
    }

    /// Report that the code path identified by `options` is deprecated.
    ///
    /// `message` is forwarded verbatim, including when empty.
    pub fn report(&self, message: impl Into<String>, options: impl Into<DeprecationOptions>) {
        self.report_notice(DeprecationNotice::from_options(message, options.into()));
    }

    /// Forward a notice that was built by the caller
    pub fn report_notice(&self, notice: DeprecationNotice) {
        trace!(
            "Reporting deprecation {} to {} sink",
            notice.identifier(),
            self.sink.name()
        );
        self.sink.accept(&notice);
    }

    /// Name of the sink behind this reporter
    pub fn sink_name(&self) -> &'static str {
        self.sink.name()
    }
}

impl std::fmt::Debug for DeprecationReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeprecationReporter")
            .field("sink", &self.sink.name())
            .finish()
    }
}
