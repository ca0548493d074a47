//! Logging configuration derived from CLI flags and the environment.

use ir_common::OutputFormat;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive for ir-core.
pub const LOG_ENV: &str = "IR_LOG";

/// Crates whose events pass the default filter.
const LOG_TARGETS: &[&str] = &[
    "ir_core",
    "ir_store",
    "ir_consolidate",
    "ir_report",
    "ir_common",
];

/// Log output format on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line, for callers already reading JSON payloads.
    Jsonl,
}

impl From<OutputFormat> for LogFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => LogFormat::Jsonl,
            OutputFormat::Human => LogFormat::Human,
        }
    }
}

/// Verbosity requested with `-q` / `-v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    /// No flag given; the environment decides.
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
}

impl Verbosity {
    /// `-q` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::VeryVerbose,
        }
    }

    /// Level forced by the flags, if any.
    pub fn level(self) -> Option<LevelFilter> {
        match self {
            Verbosity::Quiet => Some(LevelFilter::ERROR),
            Verbosity::Normal => None,
            Verbosity::Verbose => Some(LevelFilter::DEBUG),
            Verbosity::VeryVerbose => Some(LevelFilter::TRACE),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogConfig {
    pub format: LogFormat,
    pub verbosity: Verbosity,
}

impl LogConfig {
    pub fn new(format: OutputFormat, verbose: u8, quiet: bool) -> Self {
        Self {
            format: format.into(),
            verbosity: Verbosity::from_flags(verbose, quiet),
        }
    }

    /// Event filter: flags, then `IR_LOG`, then `RUST_LOG`, then `info` for
    /// the ir crates.
    pub fn filter(&self) -> EnvFilter {
        if let Some(level) = self.verbosity.level() {
            return EnvFilter::new(default_directives(level));
        }
        EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(default_directives(LevelFilter::INFO)))
    }
}

fn default_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_ascii_lowercase();
    LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}
