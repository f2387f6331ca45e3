use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Sets up tracing with a human-readable console layer and a JSON file layer
/// under logs/, rotated daily.
pub fn init_logging() {
    let _ = fs::create_dir_all("logs");

    let file_appender = tracing_appender::rolling::daily("logs", "crisis_locator.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("crisis_locator=info".parse().unwrap()),
        )
        .with(fmt::layer().json().with_writer(file_writer))
        .with(fmt::layer().with_writer(std::io::stdout))
        .init();

    // The guard flushes buffered log lines on drop; the subscriber lives for
    // the whole process, so leak it
    std::mem::forget(guard);
}
