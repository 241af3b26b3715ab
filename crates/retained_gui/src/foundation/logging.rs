//! Logger setup driven by `GuiConfig::log_level`

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// `default_filter` is used unless `RUST_LOG` is set. Calling this more than
/// once keeps the first logger.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized, keeping existing configuration");
    }
}
