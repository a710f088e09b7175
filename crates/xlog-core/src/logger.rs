//! Explicit logger handle

use crate::domain::{LoggerConfig, Severity};
use crate::service::{process_tag, LineFormat, SwallowErrors};
use std::fmt;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;
use tracing::Dispatch;
use tracing_core::callsite::DefaultCallsite;
use tracing_core::field::Value;
use tracing_core::{Event, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use xlog_rotate::RotatingFile;

/// A configured logging pipeline plus its own level gate.
///
/// The pipeline lives in a private [`Dispatch`] that the emission macros
/// write to directly, so the application's global `tracing` subscriber is
/// left alone.
#[derive(Debug)]
pub struct Logger {
    level: AtomicI32,
    process_tag: String,
    dispatch: Dispatch,
    sink: Option<Arc<RotatingFile>>,
}

impl Logger {
    /// Build a logger writing to the rotated file described by `config`.
    ///
    /// Nothing touches the disk until the first line is written; a bad path
    /// only shows up as lines that never arrive.
    pub fn new(config: &LoggerConfig) -> Self {
        let sink = Arc::new(RotatingFile::new(
            &config.file_path,
            config.rotation_policy(),
        ));
        let mut logger = Self::with_writer(
            SwallowErrors::new(Arc::clone(&sink)),
            config.min_level,
            config.include_timezone,
        );
        logger.sink = Some(sink);
        logger
    }

    /// Build a logger over any `MakeWriter`
    pub fn with_writer<W>(writer: W, min_level: Severity, include_timezone: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let process_tag = process_tag();
        let layer = tracing_subscriber::fmt::layer()
            .event_format(LineFormat::new(process_tag.clone(), include_timezone))
            .with_writer(writer)
            .log_internal_errors(false);
        let dispatch = Dispatch::new(tracing_subscriber::registry().with(layer));

        Self {
            level: AtomicI32::new(min_level.rank()),
            process_tag,
            dispatch,
            sink: None,
        }
    }

    /// Change the threshold. Out-of-range values are accepted as-is.
    pub fn set_level(&self, level: impl Into<i32>) {
        self.level.store(level.into(), Ordering::Relaxed);
    }

    pub fn level(&self) -> i32 {
        self.level.load(Ordering::Relaxed)
    }

    /// Whether a call at `severity` passes this logger's gate
    pub fn enabled(&self, severity: Severity) -> bool {
        self.level() <= severity.rank()
    }

    pub fn process_tag(&self) -> &str {
        &self.process_tag
    }

    /// Active log file, for file-backed loggers
    pub fn log_file(&self) -> Option<&Path> {
        self.sink.as_deref().map(RotatingFile::path)
    }

    /// Hand one event from a macro call site to this logger's pipeline.
    ///
    /// Bypasses the thread's current dispatcher and `tracing`'s static level
    /// caps; callers check [`Logger::enabled`] first.
    #[doc(hidden)]
    pub fn emit(
        &self,
        callsite: &'static DefaultCallsite,
        meta: &'static Metadata<'static>,
        message: fmt::Arguments<'_>,
    ) {
        // Registers the callsite on first use
        let _ = callsite.interest();
        if !self.dispatch.enabled(meta) {
            return;
        }

        let fields = meta.fields();
        let Some(field) = fields.field("message") else {
            return;
        };
        let values = [(&field, Some(&message as &dyn Value))];
        self.dispatch.event(&Event::new(meta, &fields.value_set(&values)));
    }

    /// Push anything the sink holds to disk; errors are ignored
    pub fn flush(&self) {
        if let Some(sink) = &self.sink {
            let mut writer: &RotatingFile = sink;
            let _ = writer.flush();
        }
    }
}
