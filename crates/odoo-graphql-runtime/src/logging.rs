//! Logging config and setup

mod defaults;
mod format_style;
mod log_rotation_kind;

pub use format_style::FormatStyle;
pub use log_rotation_kind::LogRotationKind;
use schemars::JsonSchema;
use serde::Deserialize;
use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::{EnvFilter, Layer as LayerTrait, Registry};

use crate::parsers;

const LOG_FILE_PREFIX: &str = "odoo_graphql";

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(
        default = "defaults::log_level",
        deserialize_with = "parsers::from_str"
    )]
    #[schemars(schema_with = "level")]
    pub level: Level,

    /// Directory to write log files to. Logs go to stderr when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Log file rotation period to use when log file path provided
    /// [default: Daily]
    #[serde(default = "defaults::default_rotation")]
    pub rotation: LogRotationKind,

    #[serde(default)]
    pub format: FormatStyle,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            path: None,
            rotation: defaults::default_rotation(),
            format: Default::default(),
        }
    }
}

type LoggingLayerResult = (
    Box<dyn LayerTrait<Registry> + Send + Sync>,
    Option<WorkerGuard>,
);

/// Builds the formatting layer for a [`Logging`] config.
///
/// Without an explicit writer, logs go to a rolling file under `logging.path` or to stderr.
#[derive(Default)]
pub struct LoggingLayerBuilder {
    writer: Option<BoxMakeWriter>,
    ansi_enabled: bool,
}

impl LoggingLayerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writer<W>(mut self, mw: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        self.writer = Some(BoxMakeWriter::new(mw));
        self
    }

    /// Only applies to a writer given through [`Self::with_writer`]
    pub fn with_ansi_enabled(mut self, enabled: bool) -> Self {
        self.ansi_enabled = enabled;
        self
    }

    pub fn build(mut self, logging: &Logging) -> LoggingLayerResult {
        let (writer, guard, ansi) = match self.writer.take() {
            Some(writer) => (writer, None, self.ansi_enabled),
            None => default_writer(logging),
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);
        let layer = match logging.format {
            FormatStyle::Full => layer.boxed(),
            FormatStyle::Compact => layer.compact().boxed(),
            FormatStyle::Json => layer.json().boxed(),
            FormatStyle::Pretty => layer.pretty().boxed(),
        };

        (layer, guard)
    }
}

/// Picks the rolling file under `logging.path`, falling back to stderr when the file can't
/// be set up. Colors are only used when stderr is a terminal.
fn default_writer(logging: &Logging) -> (BoxMakeWriter, Option<WorkerGuard>, bool) {
    if let Some(dir) = logging.path.as_deref() {
        match rolling_file(dir, logging.rotation.clone()) {
            Ok(appender) => {
                let (writer, guard) = tracing_appender::non_blocking(appender);
                return (BoxMakeWriter::new(writer), Some(guard), false);
            }
            Err(err) => eprintln!(
                "Failed to set up log file in '{}', logging to stderr: {err:#}",
                dir.display()
            ),
        }
    }

    // stdout carries command output
    (
        BoxMakeWriter::new(std::io::stderr),
        None,
        std::io::stderr().is_terminal(),
    )
}

fn rolling_file(
    dir: &Path,
    rotation: LogRotationKind,
) -> Result<RollingFileAppender, anyhow::Error> {
    std::fs::create_dir_all(dir)?;
    let appender = RollingFileAppender::builder()
        .rotation(rotation.into())
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix("log")
        .build(dir)?;
    Ok(appender)
}

impl Logging {
    pub fn env_filter(&self) -> Result<EnvFilter, anyhow::Error> {
        let mut env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        if self.level == Level::INFO {
            env_filter = env_filter
                .add_directive("hyper_util=warn".parse()?)
                .add_directive("reqwest=warn".parse()?);
        }
        Ok(env_filter)
    }

    /// Install the global subscriber. Keep the returned guard alive until exit so buffered
    /// file logs are flushed.
    pub fn install(&self) -> Result<Option<WorkerGuard>, anyhow::Error> {
        let (layer, guard) = LoggingLayerBuilder::new().build(self);
        tracing_subscriber::registry()
            .with(layer)
            .with(self.env_filter()?)
            .try_init()?;
        Ok(guard)
    }
}

fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    // Only used to generate the schema
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}
