use crate::config::{LogFormat, LoggingConfig, DEFAULT_LOG_DIRECTIVE};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` directives are combined with
/// the crate default and the configured level.
pub fn init(config: &LoggingConfig) {
    let mut filter = EnvFilter::from_default_env().add_directive(
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .expect("default log directive is valid"),
    );

    if let Some(directive) = config.level.as_deref().and_then(|l| l.parse().ok()) {
        filter = filter.add_directive(directive);
    }

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match config.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
