use tracing::Event;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::registry::LookupSpan;

use crate::config::LoggingConfig;

pub struct ShabakaFormat {
    pub engine_name: String,
}

impl<S, N> FormatEvent<S, N> for ShabakaFormat
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S");

        write!(
            writer,
            "{} {}::{}::{}::{}::",
            metadata.level(),
            timestamp,
            self.engine_name,
            metadata.file().unwrap_or("unknown"),
            metadata.line().unwrap_or(0),
        )?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the global subscriber. Diagnostics go to stderr (or a daily
/// rolling file when a log directory is configured) so stdout stays
/// machine-readable. Keep the returned guard alive for the process
/// lifetime when file logging is active.
pub fn setup_tracing(engine_name: &str, config: &LoggingConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let format = ShabakaFormat { engine_name: engine_name.to_string() };

    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, format!("{engine_name}.log"));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            if config.json {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_writer(writer)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(false)
                    .with_writer(writer)
                    .event_format(format)
                    .init();
            }
            Some(guard)
        }
        None => {
            if config.json {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(env_filter)
                    .with_writer(std::io::stderr)
                    .init();
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_ansi(true)
                    .with_writer(std::io::stderr)
                    .event_format(format)
                    .init();
            }
            None
        }
    }
}
