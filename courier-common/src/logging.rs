use tracing_subscriber::{EnvFilter, prelude::*};

const WORKSPACE_TARGETS: [&str; 5] = [
    "courier",
    "courier_common",
    "courier_notify",
    "courier_relay",
    "courier_store",
];

/// Initialise the global tracing subscriber.
///
/// Filtering is directive based: `LOG_LEVEL` accepts anything [`EnvFilter`]
/// does, from a bare level (`debug`) to per-crate directives
/// (`courier_relay=trace`). Unset or unparseable, it falls back to `TRACE`
/// (debug builds) or `INFO` scoped to the workspace crates, leaving
/// third-party crates silent.
pub fn init() {
    let default = if cfg!(debug_assertions) {
        "trace"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
        EnvFilter::new(
            WORKSPACE_TARGETS
                .map(|target| format!("{target}={default}"))
                .join(","),
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_file(false)
                .with_line_number(false)
                .compact()
                .with_ansi(true)
                .with_timer(tracing_subscriber::fmt::time::ChronoUtc::rfc_3339()),
        )
        .init();
}
