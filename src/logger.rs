//! File logging for the client.
//!
//! The terminal is owned by the UI, so logs go to a daily rolling file.

use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "quiz-studio.log";
const DEFAULT_FILTER: &str = "info,quiz_studio=debug";

/// Keeps the background writer alive; drop it only at exit.
pub struct Logger {
    _guard: WorkerGuard,
}

impl Logger {
    pub fn init(dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(dir)?;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let (writer, guard) = non_blocking(rolling::daily(dir, LOG_FILE));

        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_filter(filter);

        // A second init (e.g. in tests) keeps the first subscriber.
        let _ = tracing_subscriber::registry().with(layer).try_init();

        Ok(Self { _guard: guard })
    }
}
