use tracing_subscriber::EnvFilter;

/// Logs vers stderr. `RUST_LOG` prend le pas sur le niveau par défaut.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
