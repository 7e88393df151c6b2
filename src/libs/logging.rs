use super::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

/// Installs the `tracing` subscriber when debug mode is on. In normal mode
/// nothing is installed and library logging stays silent.
pub fn init() {
    if !is_debug_mode() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{}=debug", env!("CARGO_PKG_NAME"))));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
