use std::io::IsTerminal;

use crate::config::AppConfig;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber. Console output goes to stderr; stdout is
/// reserved for the benchmark report. Keep the guard alive until exit.
pub fn init_logging(config: &AppConfig) -> WorkerGuard {
    let file_appender = match config.rotation.as_str() {
        "hourly" => tracing_appender::rolling::hourly(&config.log_dir, &config.log_file),
        "daily" => tracing_appender::rolling::daily(&config.log_dir, &config.log_file),
        _ => tracing_appender::rolling::never(&config.log_dir, &config.log_file),
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // sqlx logs every statement at info; that would drown the run
    let filter_str = format!("{},sqlx=warn", config.log_level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    let ansi = std::io::stderr().is_terminal();
    build_subscriber(filter, config.use_json, non_blocking, std::io::stderr, ansi).init();

    guard
}

/// File layer plus a console layer, both in the configured format.
fn build_subscriber<F, C>(
    filter: EnvFilter,
    use_json: bool,
    file_writer: F,
    console_writer: C,
    ansi: bool,
) -> impl Subscriber + Send + Sync + 'static
where
    F: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    C: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (json_layers, text_layers) = if use_json {
        let file_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(file_writer)
            .with_ansi(false);
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_writer(console_writer)
            .with_ansi(false);
        (Some(file_layer.and_then(console_layer)), None)
    } else {
        let file_layer = fmt::layer()
            .with_target(false)
            .with_writer(file_writer)
            .with_ansi(false);
        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(console_writer)
            .with_ansi(ansi);
        (None, Some(file_layer.and_then(console_layer)))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layers)
        .with(text_layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        fn writer_fn(&self) -> impl Fn() -> Captured + Send + Sync + 'static {
            let this = self.clone();
            move || this.clone()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_errors_reach_console_in_both_formats() {
        for use_json in [false, true] {
            let file = Captured::default();
            let console = Captured::default();
            let subscriber = build_subscriber(
                EnvFilter::new("info"),
                use_json,
                file.writer_fn(),
                console.writer_fn(),
                false,
            );

            tracing::subscriber::with_default(subscriber, || {
                tracing::debug!("filtered out");
                tracing::error!(code = "INSERT_FAILED", "insert benchmark aborted: boom");
            });

            let console_text = console.text();
            assert!(console_text.contains("insert benchmark aborted: boom"), "json={}", use_json);
            assert!(console_text.contains("INSERT_FAILED"), "json={}", use_json);
            assert!(!console_text.contains("filtered out"));
            assert!(!console_text.contains('\u{1b}'), "no escape codes when ansi is off");
            assert!(file.text().contains("insert benchmark aborted: boom"));

            if use_json {
                assert!(console_text.trim_start().starts_with('{'));
            }
        }
    }

    #[test]
    fn test_ansi_only_when_requested() {
        let console = Captured::default();
        let subscriber = build_subscriber(
            EnvFilter::new("info"),
            false,
            io::sink,
            console.writer_fn(),
            true,
        );

        tracing::subscriber::with_default(subscriber, || tracing::warn!("colored"));

        assert!(console.text().contains('\u{1b}'));
    }
}
