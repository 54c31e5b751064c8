pub mod build_info;

use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Crate targets that log at `info` unless `RUST_LOG` says otherwise.
const DEFAULT_DIRECTIVES: [&str; 3] = [
    "gig_insights=info",
    "gig_core=warn",
    "gig_storage_json=warn",
];

/// Installs the global subscriber once. Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = DEFAULT_DIRECTIVES
            .iter()
            .filter_map(|directive| directive.parse::<Directive>().ok())
            .fold(EnvFilter::from_default_env(), EnvFilter::add_directive);

        // Another subscriber may already be installed by an embedding host.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
