//! Logger setup for the `rastery` binary.
//!
//! The library only talks to the `log` facade. The binary picks a level from
//! its `-v` count, and the resulting filter is scoped to this crate so that
//! SDL and image decoding stay at `warn`.

use log::LevelFilter;

const CRATE: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Level for this crate's own modules.
    pub level: LevelFilter,
    /// Full `env_logger` filter, e.g. `"rastery::render=trace"`. Takes
    /// precedence over both `level` and `RUST_LOG`.
    pub filter: Option<String>,
    /// Per-frame timing is easier to read with millisecond stamps.
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            filter: None,
            timestamps: false,
        }
    }
}

impl LoggingConfig {
    /// `-v` raises the crate level to debug, `-vv` and beyond to trace.
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        Self {
            level,
            timestamps: verbosity > 0,
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// The filter string handed to `env_logger`: an explicit filter, then
    /// `RUST_LOG`, then the crate-scoped default for `level`.
    pub fn filter_spec(&self) -> String {
        if let Some(filter) = &self.filter {
            return filter.clone();
        }
        match std::env::var("RUST_LOG") {
            Ok(filter) if !filter.trim().is_empty() => filter,
            _ => default_filter(self.level),
        }
    }
}

/// `warn` everywhere, `level` for this crate.
pub fn default_filter(level: LevelFilter) -> String {
    format!("warn,{CRATE}={}", level.to_string().to_lowercase())
}

/// Installs the global logger. Returns `false` when one was already set,
/// which happens when tests install their own.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let spec = config.filter_spec();
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(&spec);
    if config.timestamps {
        builder.format_timestamp_millis();
    } else {
        builder.format_timestamp(None);
    }

    let installed = builder.try_init().is_ok();
    if installed {
        log::debug!("logging with filter {spec:?}");
    }
    installed
}
