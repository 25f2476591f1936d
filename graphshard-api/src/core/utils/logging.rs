use std::sync::OnceLock;
use tracing_subscriber::{
    fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Filter for the graphshard crates at `default_level`, `RUST_LOG` wins when it is set.
pub fn get_log_env(default_level: String) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "graphshard_api={},graphshard_core={}",
            default_level, default_level
        ))
    })
}

/// Install the global subscriber once, later calls are no-ops.
pub fn init_global_logger(log_level: String) {
    static INIT: OnceLock<()> = OnceLock::new();

    INIT.get_or_init(|| {
        let filter = get_log_env(log_level);
        // another subscriber may already be installed by the embedding application
        let _ = Registry::default()
            .with(filter)
            .with(fmt::layer().with_span_events(FmtSpan::CLOSE))
            .try_init();
    });
}

pub fn global_info_logger() {
    init_global_logger("INFO".to_string())
}

pub fn global_debug_logger() {
    init_global_logger("DEBUG".to_string())
}

pub fn global_trace_logger() {
    init_global_logger("TRACE".to_string())
}
