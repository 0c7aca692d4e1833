/*!
Pluggable sinks that surface deprecation notices
*/

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use deprecation_notice::{DeprecationNotice, Severity};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::core::{
    config::{SinkConfig, SinkPlugin, TerminalFormat},
    error::ConfigError,
};

/// Receiver of deprecation notices.
///
/// `accept` runs synchronously on the reporting thread and must not fail back
/// into the caller. Sinks doing I/O log their own failures and return.
pub trait DeprecationSink: Send + Sync {
    /// Name of the sink, used in diagnostics
    fn name(&self) -> &'static str;

    /// Handle one notice
    fn accept(&self, notice: &DeprecationNotice);
}

impl<S: DeprecationSink + ?Sized> DeprecationSink for Arc<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn accept(&self, notice: &DeprecationNotice) {
        (**self).accept(notice)
    }
}

impl<S: DeprecationSink + ?Sized> DeprecationSink for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn accept(&self, notice: &DeprecationNotice) {
        (**self).accept(notice)
    }
}

/// Adapts a closure into a sink
pub struct FnSink<F>(pub F);

impl<F> DeprecationSink for FnSink<F>
where
    F: Fn(&DeprecationNotice) + Send + Sync,
{
    fn name(&self) -> &'static str {
        "Fn"
    }

    fn accept(&self, notice: &DeprecationNotice) {
        (self.0)(notice)
    }
}

/// Forwards every notice to each member sink, in insertion order
#[derive(Default)]
pub struct SinkSet {
    sinks: Vec<Box<dyn DeprecationSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the enabled sinks described by `configs`
    pub fn from_config(configs: &[SinkConfig]) -> Result<Self, ConfigError> {
        let mut sinks: Vec<Box<dyn DeprecationSink>> = Vec::new();

        for config in configs {
            if !config.enabled {
                continue;
            }

            let sink: Box<dyn DeprecationSink> = match &config.plugin {
                SinkPlugin::Tracing => Box::new(TracingSink),
                SinkPlugin::Terminal { format } => Box::new(TerminalSink::stderr(*format)),
                SinkPlugin::JsonLines { path } => Box::new(JsonLinesSink::open(path)?),
                SinkPlugin::Null => Box::new(NullSink),
            };

            sinks.push(sink);
        }

        info!("Initialized deprecation sink set with {} sinks", sinks.len());
        Ok(Self { sinks })
    }

    pub fn push(&mut self, sink: impl DeprecationSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn with(mut self, sink: impl DeprecationSink + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Names of the member sinks, in delivery order
    pub fn names(&self) -> Vec<&'static str> {
        self.sinks.iter().map(|sink| sink.name()).collect()
    }
}

impl DeprecationSink for SinkSet {
    fn name(&self) -> &'static str {
        "SinkSet"
    }

    fn accept(&self, notice: &DeprecationNotice) {
        for sink in &self.sinks {
            sink.accept(notice);
        }
    }
}

/// Emits each notice as a `tracing` event on the `deprecation` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DeprecationSink for TracingSink {
    fn name(&self) -> &'static str {
        "Tracing"
    }

    fn accept(&self, notice: &DeprecationNotice) {
        let metadata = notice.metadata();
        let since = metadata.since.as_deref();
        let drop_from = metadata.drop_from.as_deref();
        let url = metadata.url.as_deref();

        match notice.severity() {
            Severity::Warning => warn!(
                target: "deprecation",
                id = %notice.identifier(),
                since,
                drop_from,
                url,
                "{}",
                notice.message()
            ),
            Severity::Pending => info!(
                target: "deprecation",
                id = %notice.identifier(),
                since,
                drop_from,
                url,
                "{}",
                notice.message()
            ),
        }
    }
}

/// Writes a human-readable block per notice to stderr or an injected writer
pub struct TerminalSink {
    format: TerminalFormat,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSink {
    pub fn stderr(format: TerminalFormat) -> Self {
        Self::with_writer(format, io::stderr())
    }

    pub fn with_writer(format: TerminalFormat, writer: impl Write + Send + 'static) -> Self {
        Self {
            format,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    pub fn format_notice(&self, notice: &DeprecationNotice) -> String {
        let metadata = notice.metadata();
        match self.format {
            TerminalFormat::Plain => {
                let mut text = format!(
                    "DEPRECATION [{}]: {}",
                    notice.identifier(),
                    notice.message()
                );
                if let Some(since) = &metadata.since {
                    text.push_str(&format!("\n  since: {since}"));
                }
                if let Some(drop_from) = &metadata.drop_from {
                    text.push_str(&format!("\n  removed in: {drop_from}"));
                }
                if let Some(url) = &metadata.url {
                    text.push_str(&format!("\n  see: {url}"));
                }
                text
            }
            TerminalFormat::Colored => {
                let label = match notice.severity() {
                    Severity::Warning => "\x1b[33m⚠ DEPRECATION\x1b[0m",
                    Severity::Pending => "\x1b[36mℹ PENDING DEPRECATION\x1b[0m",
                };
                let mut text = format!(
                    "{label} \x1b[2m[{}]\x1b[0m\n{}",
                    notice.identifier(),
                    notice.message()
                );
                if let Some(since) = &metadata.since {
                    text.push_str(&format!("\n\x1b[36mSince:\x1b[0m {since}"));
                }
                if let Some(drop_from) = &metadata.drop_from {
                    text.push_str(&format!("\n\x1b[36mRemoved in:\x1b[0m {drop_from}"));
                }
                if let Some(url) = &metadata.url {
                    text.push_str(&format!("\n\x1b[36mSee:\x1b[0m {url}"));
                }
                text
            }
            TerminalFormat::Json => serde_json::to_string(notice)
                .unwrap_or_else(|_| "JSON serialization failed".to_string()),
        }
    }
}

impl DeprecationSink for TerminalSink {
    fn name(&self) -> &'static str {
        "Terminal"
    }

    fn accept(&self, notice: &DeprecationNotice) {
        let text = self.format_notice(notice);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{text}").and_then(|_| writer.flush()) {
            error!("Terminal sink failed to write notice {}: {}", notice.identifier(), e);
        }
    }
}

/// One line of a JSON-lines deprecation log
#[derive(Serialize)]
struct JsonLine<'a> {
    reported_at: DateTime<Utc>,
    #[serde(flatten)]
    notice: &'a DeprecationNotice,
}

/// Appends one compact JSON object per line, one line per notice
pub struct JsonLinesSink {
    file_path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file_path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file_path)
            .map_err(|source| ConfigError::OpenSink {
                path: file_path.clone(),
                source,
            })?;

        Ok(Self {
            file_path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_line(&self, notice: &DeprecationNotice) -> Result<(), Box<dyn std::error::Error>> {
        let line = JsonLine {
            reported_at: Utc::now(),
            notice,
        };
        let json_str = serde_json::to_string(&line)?;

        let mut file = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(file, "{}", json_str)?;
        file.flush()?;
        Ok(())
    }
}

impl DeprecationSink for JsonLinesSink {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn accept(&self, notice: &DeprecationNotice) {
        if let Err(e) = self.write_line(notice) {
            error!(
                "JSON sink failed to append notice {} to {:?}: {}",
                notice.identifier(),
                self.file_path,
                e
            );
        }
    }
}

/// Collects notices in memory; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct CaptureSink {
    notices: Arc<Mutex<Vec<DeprecationNotice>>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far
    pub fn notices(&self) -> Vec<DeprecationNotice> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drain the buffer
    pub fn take(&self) -> Vec<DeprecationNotice> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DeprecationNotice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DeprecationSink for CaptureSink {
    fn name(&self) -> &'static str {
        "Capture"
    }

    fn accept(&self, notice: &DeprecationNotice) {
        self.lock().push(notice.clone());
    }
}

/// Discards every notice
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DeprecationSink for NullSink {
    fn name(&self) -> &'static str {
        "Null"
    }

    fn accept(&self, _notice: &DeprecationNotice) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use deprecation_notice::DeprecationOptions;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_test::traced_test;

    /// Writer whose output stays readable after being moved into a sink
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn sample() -> DeprecationNotice {
        DeprecationNotice::from_options(
            "`oldHook` is deprecated. Use `newHook` instead.",
            DeprecationOptions::new("app.widgets.old-hook")
                .since("2.9.0")
                .drop_from("3.0.0"),
        )
    }

    #[test]
    fn sink_set_delivers_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&order);
        let second = Arc::clone(&order);

        let set = SinkSet::new()
            .with(FnSink(move |_: &DeprecationNotice| first.lock().unwrap().push("first")))
            .with(FnSink(move |_: &DeprecationNotice| second.lock().unwrap().push("second")));

        set.accept(&sample());
        assert_eq!(*order.lock().unwrap(), ["first", "second"]);
    }

    #[test]
    fn empty_sink_set_accepts_silently() {
        let set = SinkSet::new();
        assert!(set.is_empty());
        set.accept(&sample());
    }

    #[test]
    fn capture_sink_clones_share_buffer() {
        let capture = CaptureSink::new();
        let handle = capture.clone();

        capture.accept(&sample());
        capture.accept(&sample());

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.take(), vec![sample(), sample()]);
        assert!(capture.is_empty());
    }

    #[test]
    fn shared_sinks_forward_through_arc() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sink: Arc<dyn DeprecationSink> = Arc::new(FnSink(move |_: &DeprecationNotice| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        sink.accept(&sample());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(sink.name(), "Fn");
    }

    #[test]
    fn terminal_plain_lists_metadata() {
        let buffer = SharedBuffer::default();
        let sink = TerminalSink::with_writer(TerminalFormat::Plain, buffer.clone());

        sink.accept(&sample());

        assert_eq!(
            buffer.contents(),
            "DEPRECATION [app.widgets.old-hook]: `oldHook` is deprecated. Use `newHook` instead.\n  since: 2.9.0\n  removed in: 3.0.0\n"
        );
    }

    #[test]
    fn terminal_colored_marks_pending() {
        let sink = TerminalSink::with_writer(TerminalFormat::Colored, io::sink());
        let notice = DeprecationNotice::from_options(
            "soon",
            DeprecationOptions::new("app.x").severity(Severity::Pending),
        );

        let text = sink.format_notice(&notice);
        assert!(text.contains("PENDING DEPRECATION"));
        assert!(text.contains("[app.x]"));
    }

    #[test]
    fn terminal_json_is_parseable() {
        let sink = TerminalSink::with_writer(TerminalFormat::Json, io::sink());
        let text = sink.format_notice(&sample());
        let back: DeprecationNotice = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn json_lines_sink_appends_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deprecations.jsonl");
        let sink = JsonLinesSink::open(&path).unwrap();

        sink.accept(&sample());
        sink.accept(&DeprecationNotice::new("", "app.empty"));

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["identifier"], "app.widgets.old-hook");
        assert_eq!(lines[0]["since"], "2.9.0");
        assert!(lines[0]["reported_at"].is_string());
        assert_eq!(lines[1]["message"], "");
    }

    #[test]
    fn json_lines_sink_keeps_multiline_messages_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deprecations.jsonl");
        let sink = JsonLinesSink::open(&path).unwrap();
        assert_eq!(sink.path(), path.as_path());

        sink.accept(&DeprecationNotice::new("first line\nsecond line", "app.multi"));
        sink.accept(&sample());

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(serde_json::from_str::<serde_json::Value>(line).is_ok());
        }
    }

    #[test]
    fn json_lines_sink_reports_unopenable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deprecations.jsonl");

        let result = JsonLinesSink::open(&path);
        assert!(matches!(result, Err(ConfigError::OpenSink { .. })));
    }

    #[traced_test]
    #[test]
    fn tracing_sink_emits_warning_with_id() {
        TracingSink.accept(&sample());

        assert!(logs_contain("`oldHook` is deprecated"));
        assert!(logs_contain("app.widgets.old-hook"));
        assert!(logs_contain("WARN"));
    }

    #[traced_test]
    #[test]
    fn tracing_sink_leaves_out_missing_metadata() {
        TracingSink.accept(&sample());

        assert!(logs_contain("since="));
        assert!(logs_contain("drop_from="));
        assert!(!logs_contain("url="));
    }

    #[traced_test]
    #[test]
    fn tracing_sink_logs_pending_at_info() {
        let notice = DeprecationNotice::from_options(
            "pending removal",
            DeprecationOptions::new("app.pending").severity(Severity::Pending),
        );
        TracingSink.accept(&notice);

        assert!(logs_contain("INFO"));
        assert!(logs_contain("pending removal"));
        assert!(!logs_contain("WARN"));
    }
}
