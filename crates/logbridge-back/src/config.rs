//! Logger configuration.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::encoder::{EncoderConfig, LevelEncoding, TimeEncoding};
use crate::engine::IoCore;
use crate::error::{BackendError, BackendResult};
use crate::level::{AtomicLevel, Level};
use crate::logger::Logger;
use crate::sink::{self, Locked, WriteSyncer};

/// Where encoded lines go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Standard output.
    Stdout,
    /// Standard error.
    #[default]
    Stderr,
    /// Append to a file, creating it and its directory if needed.
    File(PathBuf),
}

/// Declarative logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum level written.
    #[serde(default)]
    pub level: Level,
    /// Development mode: `DPanic` entries panic.
    #[serde(default)]
    pub development: bool,
    /// Attach call sites to entries from the direct API.
    #[serde(default = "default_true")]
    pub caller: bool,
    /// Encoder settings.
    #[serde(default)]
    pub encoder: EncoderConfig,
    /// Output target.
    #[serde(default)]
    pub output: OutputTarget,
}

fn default_true() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: Level::default(),
            development: false,
            caller: true,
            encoder: EncoderConfig::default(),
            output: OutputTarget::default(),
        }
    }
}

impl LoggerConfig {
    /// Production settings at `level`.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Development settings: debug level, capital levels, RFC 3339
    /// timestamps, `DPanic` panics.
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::Debug,
            development: true,
            encoder: EncoderConfig::default()
                .with_level_encoding(LevelEncoding::Capital)
                .with_time_encoding(TimeEncoding::Rfc3339),
            ..Default::default()
        }
    }

    /// Set the output target.
    #[must_use]
    pub fn with_output(mut self, output: OutputTarget) -> Self {
        self.output = output;
        self
    }

    /// Set the encoder settings.
    #[must_use]
    pub fn with_encoder(mut self, encoder: EncoderConfig) -> Self {
        self.encoder = encoder;
        self
    }

    /// Disable call-site annotation.
    #[must_use]
    pub fn without_caller(mut self) -> Self {
        self.caller = false;
        self
    }

    fn open_sink(&self) -> BackendResult<Arc<dyn WriteSyncer>> {
        match &self.output {
            OutputTarget::Stdout => Ok(sink::stdout()),
            OutputTarget::Stderr => Ok(sink::stderr()),
            OutputTarget::File(path) => {
                if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir).map_err(|e| {
                        BackendError::Config(format!("failed to create log directory: {e}"))
                    })?;
                }
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .map_err(|e| {
                        BackendError::Config(format!(
                            "failed to open log file {}: {e}",
                            path.display()
                        ))
                    })?;
                Ok(Arc::new(Locked::new(file, "file")))
            },
        }
    }

    /// Build a logger and the handle controlling its threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be opened.
    pub fn build_with_level(&self) -> BackendResult<(Logger, AtomicLevel)> {
        let sink = self.open_sink()?;
        let level = AtomicLevel::new(self.level);
        let core = IoCore::new(self.encoder.clone(), sink, level.clone());
        let logger = Logger::new(core)
            .with_development(self.development)
            .with_caller(self.caller);
        debug!(
            level = %self.level,
            development = self.development,
            output = ?self.output,
            "Logger built"
        );
        Ok((logger, level))
    }

    /// Build a logger.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be opened.
    pub fn build(&self) -> BackendResult<Logger> {
        self.build_with_level().map(|(logger, _)| logger)
    }
}
