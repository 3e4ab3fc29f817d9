use anyhow::Context;
use chrono::Local;
use hostmon_common::logline::LOG_TIMESTAMP_FORMAT;
use std::path::Path;
use tracing::{Event, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::{DefaultFields, Writer};
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Writes `<timestamp>:<LEVEL>:<message fields>` lines, one per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventLogFormat;

impl<S, N> FormatEvent<S, N> for EventLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut fields = String::new();
        ctx.field_format()
            .format_fields(Writer::new(&mut fields), event)?;
        // One event per line, whatever the field values contain.
        let fields = fields.replace(['\r', '\n'], " ");
        writeln!(
            writer,
            "{}:{}:{}",
            Local::now().format(LOG_TIMESTAMP_FORMAT),
            event.metadata().level(),
            fields
        )
    }
}

pub type EventLogLayer<S> = fmt::Layer<S, DefaultFields, EventLogFormat, RollingFileAppender>;

/// File layer appending to `log_file`. Writes are blocking so the exporter
/// sees every line as soon as the event returns.
pub fn event_log_layer<S>(log_file: &Path) -> anyhow::Result<EventLogLayer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let dir = log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = log_file
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("invalid log file path: {}", log_file.display()))?;
    std::fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(name)
        .build(dir)
        .with_context(|| format!("cannot open event log {}", log_file.display()))?;

    Ok(fmt::layer()
        .with_ansi(false)
        .event_format(EventLogFormat)
        .with_writer(appender))
}

/// Console output filtered by `RUST_LOG` plus the event log file.
pub fn init(log_file: &Path) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("hostmon=info".parse()?))
        .with(fmt::layer())
        .with(event_log_layer(log_file)?)
        .try_init()?;
    Ok(())
}
