use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "learngl_engine=debug,wgpu=warn").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub target: LogTarget,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            target: LogTarget::Stdout,
        }
    }
}

/// Stream log records are written to.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LogTarget {
    /// Diagnostics share the console stream with the program's output.
    #[default]
    Stdout,
    Stderr,
}

impl LogTarget {
    fn to_env_logger(self) -> env_logger::Target {
        match self {
            LogTarget::Stdout => env_logger::Target::Stdout,
            LogTarget::Stderr => env_logger::Target::Stderr,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// Subsequent calls are ignored. Records go to `config.target`. Filter precedence:
/// `config.env_filter`, then `RUST_LOG`, then `info`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            // wgpu/naga are chatty at info; keep them at warn unless asked.
            builder
                .filter_level(log::LevelFilter::Info)
                .filter_module("wgpu_core", log::LevelFilter::Warn)
                .filter_module("wgpu_hal", log::LevelFilter::Warn)
                .filter_module("naga", log::LevelFilter::Warn);
        }

        builder
            .target(config.target.to_env_logger())
            .write_style(config.write_style);

        // try_init: a test harness or embedding binary may have installed a logger already.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_go_to_stdout_by_default() {
        let config = LoggingConfig::default();
        assert_eq!(config.target, LogTarget::Stdout);
        assert!(matches!(config.target.to_env_logger(), env_logger::Target::Stdout));
        assert!(matches!(LogTarget::Stderr.to_env_logger(), env_logger::Target::Stderr));
    }

    #[test]
    fn init_is_idempotent() {
        init_logging(LoggingConfig {
            env_filter: Some("debug".into()),
            ..Default::default()
        });
        init_logging(LoggingConfig::default());
        log::info!("still alive after double init");
    }
}
