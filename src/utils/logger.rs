use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global subscriber. `RUST_LOG` wins over `level`; `verbose`
/// raises this crate to debug.
pub fn init_cli_logger(level: &str, verbose: bool) {
    let default_directive = if verbose {
        format!("student_roster=debug,roster=debug,{}", level)
    } else {
        format!("student_roster={level},roster={level},warn")
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}
