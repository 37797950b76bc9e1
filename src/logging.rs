use tracing::Level;
use tracing_subscriber::fmt::time::SystemTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

/// Build the default filter directive for `level`
///
/// `RUST_LOG` takes precedence when it is set and valid.
pub fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("index_workloads={},warn", level)))
}

/// Initialize logging to stderr with configurable settings
///
/// Output files are the product of both binaries, so log lines never go to
/// stdout.
pub fn init_logging(level: Level, json_output: bool) {
    let env_filter = env_filter(level);

    if json_output {
        let fmt_layer = fmt::layer()
            .json()
            .with_timer(SystemTime)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(fmt_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(SystemTime)
            .with_target(false)
            .with_writer(std::io::stderr);

        Registry::default().with(env_filter).with(fmt_layer).init();
    }
}
