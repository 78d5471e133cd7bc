use pricebook_core::config::{LogFormat, LoggingConfig};
use tracing::Level;

/// Installs the global subscriber. Events go to stderr so command payloads on
/// stdout stay machine-readable.
pub fn init(logging: &LoggingConfig) {
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let installed = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    // a subscriber set by an embedding process stays in place
    let _ = installed;
}
