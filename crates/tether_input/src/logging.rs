//! Tracing setup
//!
//! Android routes events to logcat under the configured tag; everywhere else
//! gets a formatted stderr subscriber filtered by `RUST_LOG` or the configured
//! directive. Safe to call more than once; only the first call installs.

use crate::config::LoggingConfig;

#[cfg(target_os = "android")]
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = match tracing_android::layer(&config.tag) {
        Ok(layer) => Some(layer),
        Err(e) => {
            eprintln!("logcat layer unavailable for tag {:?}: {}", config.tag, e);
            None
        }
    };
    // Without logcat the filtered registry still installs
    let subscriber = tracing_subscriber::registry().with(filter).with(layer);
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[cfg(not(target_os = "android"))]
pub fn init_logging(config: &LoggingConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
