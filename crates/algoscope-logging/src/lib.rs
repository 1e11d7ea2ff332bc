//! Tracing subscriber setup shared by the algoscope binaries.
//!
//! `RUST_LOG` wins when set; otherwise the caller's default directives apply.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Library crates that emit events, by tracing target.
pub const TARGETS: [&str; 5] = [
    "algoscope_core",
    "algoscope_graph",
    "algoscope_path",
    "algoscope_engine",
    "algoscope_vis",
];

/// Directives used when `RUST_LOG` is unset: `info` for every target in
/// [`TARGETS`].
pub const DEFAULT_DIRECTIVES: &str =
    "algoscope_core=info,algoscope_graph=info,algoscope_path=info,algoscope_engine=info,algoscope_vis=info";

/// Build the filter from `RUST_LOG`, falling back to `default_directives`.
pub fn filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Install the global subscriber. Returns `false` if one was already set,
/// which lets tests call this more than once.
pub fn init(default_directives: &str) -> bool {
    tracing_subscriber::registry()
        .with(filter(default_directives))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Install a subscriber that writes through the test harness's capture.
pub fn init_for_tests() -> bool {
    tracing_subscriber::registry()
        .with(filter("debug"))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init()
        .is_ok()
}
