//! JSON line encoding.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::BackendResult;
use crate::field::{Field, FieldKind};
use crate::level::Level;

/// How levels are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelEncoding {
    /// `info`, `error`, ...
    #[default]
    Lowercase,
    /// `INFO`, `ERROR`, ...
    Capital,
}

impl LevelEncoding {
    fn encode(self, level: Level) -> &'static str {
        match self {
            Self::Lowercase => level.as_str(),
            Self::Capital => level.capital_str(),
        }
    }
}

/// How timestamps are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeEncoding {
    /// Integer milliseconds since the Unix epoch.
    #[default]
    EpochMillis,
    /// RFC 3339 string with millisecond precision.
    Rfc3339,
}

/// How call sites are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerEncoding {
    /// Last directory and file name.
    #[default]
    Short,
    /// Path as recorded.
    Full,
}

/// Encoder configuration.
///
/// Any key left empty drops that element from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Key for the message.
    #[serde(default = "default_message_key")]
    pub message_key: String,
    /// Key for the level.
    #[serde(default = "default_level_key")]
    pub level_key: String,
    /// Key for the timestamp.
    #[serde(default = "default_time_key")]
    pub time_key: String,
    /// Key for the call site.
    #[serde(default = "default_caller_key")]
    pub caller_key: String,
    /// Level rendering.
    #[serde(default)]
    pub level_encoding: LevelEncoding,
    /// Timestamp rendering.
    #[serde(default)]
    pub time_encoding: TimeEncoding,
    /// Call-site rendering.
    #[serde(default)]
    pub caller_encoding: CallerEncoding,
}

fn default_message_key() -> String {
    "msg".to_string()
}

fn default_level_key() -> String {
    "level".to_string()
}

fn default_time_key() -> String {
    "ts".to_string()
}

fn default_caller_key() -> String {
    "caller".to_string()
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            message_key: default_message_key(),
            level_key: default_level_key(),
            time_key: default_time_key(),
            caller_key: default_caller_key(),
            level_encoding: LevelEncoding::default(),
            time_encoding: TimeEncoding::default(),
            caller_encoding: CallerEncoding::default(),
        }
    }
}

impl EncoderConfig {
    /// Deterministic output for examples and tests: level and message only.
    #[must_use]
    pub fn example() -> Self {
        Self::default().without_time().without_caller()
    }

    /// Drop the timestamp.
    #[must_use]
    pub fn without_time(mut self) -> Self {
        self.time_key = String::new();
        self
    }

    /// Drop the call site.
    #[must_use]
    pub fn without_caller(mut self) -> Self {
        self.caller_key = String::new();
        self
    }

    /// Set the level rendering.
    #[must_use]
    pub fn with_level_encoding(mut self, encoding: LevelEncoding) -> Self {
        self.level_encoding = encoding;
        self
    }

    /// Set the timestamp rendering.
    #[must_use]
    pub fn with_time_encoding(mut self, encoding: TimeEncoding) -> Self {
        self.time_encoding = encoding;
        self
    }

    /// Set the call-site rendering.
    #[must_use]
    pub fn with_caller_encoding(mut self, encoding: CallerEncoding) -> Self {
        self.caller_encoding = encoding;
        self
    }
}

/// Encodes entries as single-line JSON objects.
///
/// Context fields added with [`JsonEncoder::add_fields`] are encoded once and
/// copied into every line. Namespaces stay open until the end of the line.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    config: Arc<EncoderConfig>,
    context: Vec<u8>,
    open_namespaces: usize,
}

impl JsonEncoder {
    /// Create an encoder with no context.
    #[must_use]
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config: Arc::new(config),
            context: Vec::new(),
            open_namespaces: 0,
        }
    }

    /// Encoder configuration.
    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Append context fields. On error the encoder is left unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if a field cannot be written as JSON.
    pub fn add_fields(&mut self, fields: &[Field]) -> BackendResult<()> {
        let mut context = self.context.clone();
        let mut open = self.open_namespaces;
        for field in fields {
            write_field(&mut context, field, &mut open)?;
        }
        self.context = context;
        self.open_namespaces = open;
        Ok(())
    }

    /// Encode one entry with its fields as a newline-terminated line.
    ///
    /// # Errors
    ///
    /// Returns an error if any element cannot be written as JSON.
    pub fn encode_entry(&self, entry: &Entry, fields: &[Field]) -> BackendResult<Vec<u8>> {
        let config = &*self.config;
        let mut line = Vec::with_capacity(self.context.len().saturating_add(128));
        line.push(b'{');

        if !config.time_key.is_empty() {
            write_key(&mut line, &config.time_key)?;
            write_time(&mut line, entry.time, config.time_encoding)?;
        }
        if !config.level_key.is_empty() {
            write_key(&mut line, &config.level_key)?;
            serde_json::to_writer(&mut line, config.level_encoding.encode(entry.level))?;
        }
        if let Some(caller) = &entry.caller
            && !config.caller_key.is_empty()
        {
            let rendered = match config.caller_encoding {
                CallerEncoding::Short => caller.trimmed_path(),
                CallerEncoding::Full => caller.to_string(),
            };
            write_key(&mut line, &config.caller_key)?;
            serde_json::to_writer(&mut line, &rendered)?;
        }
        if !config.message_key.is_empty() {
            write_key(&mut line, &config.message_key)?;
            serde_json::to_writer(&mut line, &entry.message)?;
        }

        if !self.context.is_empty() {
            add_separator(&mut line);
            line.extend_from_slice(&self.context);
        }
        let mut open = self.open_namespaces;
        for field in fields {
            write_field(&mut line, field, &mut open)?;
        }

        line.extend(std::iter::repeat_n(b'}', open));
        line.extend_from_slice(b"}\n");
        Ok(line)
    }
}

fn add_separator(buf: &mut Vec<u8>) {
    match buf.last() {
        None | Some(b'{' | b'[' | b':' | b',') => {},
        Some(_) => buf.push(b','),
    }
}

fn write_key(buf: &mut Vec<u8>, key: &str) -> BackendResult<()> {
    add_separator(buf);
    serde_json::to_writer(&mut *buf, key)?;
    buf.push(b':');
    Ok(())
}

fn write_time(buf: &mut Vec<u8>, time: DateTime<Utc>, encoding: TimeEncoding) -> BackendResult<()> {
    match encoding {
        TimeEncoding::EpochMillis => serde_json::to_writer(buf, &time.timestamp_millis())?,
        TimeEncoding::Rfc3339 => {
            serde_json::to_writer(buf, &time.to_rfc3339_opts(SecondsFormat::Millis, true))?;
        },
    }
    Ok(())
}

fn write_field(buf: &mut Vec<u8>, field: &Field, open: &mut usize) -> BackendResult<()> {
    match field.kind() {
        FieldKind::Any(value) => {
            write_key(buf, field.key())?;
            serde_json::to_writer(buf, value)?;
        },
        FieldKind::Namespace => {
            write_key(buf, field.key())?;
            buf.push(b'{');
            *open = open.saturating_add(1);
        },
        FieldKind::Invalid(reason) => {
            write_key(buf, &format!("{}Error", field.key()))?;
            serde_json::to_writer(buf, reason)?;
        },
    }
    Ok(())
}
