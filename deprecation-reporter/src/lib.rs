/*!
Report deprecated extension points to pluggable sinks
*/

pub mod core;
pub mod shims;

pub use crate::core::{
    config::{ReporterConfig, SinkConfig, SinkPlugin, TerminalFormat},
    error::ConfigError,
    reporter::DeprecationReporter,
    sinks::{
        CaptureSink, DeprecationSink, FnSink, JsonLinesSink, NullSink, SinkSet, TerminalSink,
        TracingSink,
    },
};
pub use deprecation_notice::{
    DeprecationId, DeprecationNotice, DeprecationOptions, NoticeMetadata, Severity,
};
