//! Tracing initialization and subscriber setup.

use super::file_writer::FileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Sets up a `tracing-subscriber` registry that:
/// 1. Filters events with `RUST_LOG`, or `config.log_level` when unset
/// 2. Formats them with the `fmt` layer
/// 3. Writes to `config.log_file` (rotating) or, when unset, to stderr
///
/// # Initialization Behavior
///
/// - Creates the log file's directory if needed
/// - Falls back to stderr if that directory cannot be created
/// - Idempotent: only the first call takes effect
///
/// # Example
///
/// ```rust
/// use product_hub::observability::init_tracing;
/// use product_hub::Config;
///
/// init_tracing(&Config::default());
/// tracing::info!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let file_writer = config
        .log_file
        .as_ref()
        .filter(|path| match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(dir) => std::fs::create_dir_all(dir).is_ok(),
            None => true,
        })
        .map(|path| Arc::new(FileWriter::new(path.clone())));

    let (file_layer, stderr_layer) = match file_writer {
        Some(writer) => (
            Some(fmt::layer().with_ansi(false).with_writer(writer)),
            None,
        ),
        None => (None, Some(fmt::layer().with_writer(std::io::stderr))),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
}
