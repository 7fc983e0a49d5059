//! Log output for the `enumgen` binary.
//!
//! A subscriber writing to stderr is always installed so `warn` events (values
//! outside the 32-bit range, for instance) are never lost. The filter is chosen
//! in this order:
//!
//! 1. `ENUMGEN_LOG`
//! 2. `RUST_LOG`
//! 3. `-v`/`--verbose`: `info` for the enumgen crates, which surfaces every
//!    skipped provisional extension
//! 4. `warn`
//!
//! `ENUMGEN_LOG_FORMAT` picks `text` (default), `tree` or `json`.
//!
//! ```bash
//! # Excluded contributions and dropped values
//! ENUMGEN_LOG=enumgen_registry=debug enumgen --check
//!
//! # Nested fetch / parse spans
//! ENUMGEN_LOG=trace ENUMGEN_LOG_FORMAT=tree enumgen
//! ```

use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub const LOG_ENV: &str = "ENUMGEN_LOG";
pub const LOG_FORMAT_ENV: &str = "ENUMGEN_LOG_FORMAT";

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,enumgen_registry=info,enumgen_cli=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One line per event, no timestamps.
    #[default]
    Text,
    /// Indented spans via `tracing-tree`.
    Tree,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    /// Case-insensitive; `None` for names that are not a known format.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "tree" => Some(Self::Tree),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Filter directives and output format for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub filter: String,
    pub format: LogFormat,
    /// Value of `ENUMGEN_LOG_FORMAT` that was not recognised, if any.
    pub unknown_format: Option<String>,
}

impl LogSettings {
    /// Pick the filter and format from raw environment values. Blank values
    /// count as unset.
    pub fn resolve(
        enumgen_log: Option<&str>,
        rust_log: Option<&str>,
        format: Option<&str>,
        verbose: bool,
    ) -> Self {
        let filter = non_blank(enumgen_log)
            .or_else(|| non_blank(rust_log))
            .unwrap_or(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
            .to_string();

        let (format, unknown_format) = match non_blank(format) {
            None => (LogFormat::default(), None),
            Some(raw) => match LogFormat::parse(raw) {
                Some(format) => (format, None),
                None => (LogFormat::default(), Some(raw.to_string())),
            },
        };

        Self {
            filter,
            format,
            unknown_format,
        }
    }

    pub fn from_env(verbose: bool) -> Self {
        let enumgen_log = std::env::var(LOG_ENV).ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        let format = std::env::var(LOG_FORMAT_ENV).ok();
        Self::resolve(
            enumgen_log.as_deref(),
            rust_log.as_deref(),
            format.as_deref(),
            verbose,
        )
    }

    /// Invalid directives are skipped rather than rejected.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder().parse_lossy(&self.filter)
    }

    /// Install the global subscriber. Fails if one is already set.
    pub fn install(&self) -> Result<(), TryInitError> {
        let layer: Box<dyn Layer<Registry> + Send + Sync> = match self.format {
            LogFormat::Text => fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false)
                .boxed(),
            LogFormat::Tree => tracing_tree::HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_indent_lines(true)
                .with_targets(true)
                .boxed(),
            LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
        };

        tracing_subscriber::registry()
            .with(layer.with_filter(self.env_filter()))
            .try_init()?;

        if let Some(raw) = &self.unknown_format {
            tracing::warn!(value = %raw, "unknown {LOG_FORMAT_ENV}, using text output");
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve settings from the environment and install them.
pub fn init_tracing(verbose: bool) {
    let _ = LogSettings::from_env(verbose).install();
}
