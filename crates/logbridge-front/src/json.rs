//! Native JSON handler.
//!
//! Writes one JSON object per record. Useful on its own and as the reference
//! output other handlers are compared against.

use std::io::Write;
use std::sync::{Arc, Mutex};

use chrono::SecondsFormat;
use serde_json::json;

use crate::handler::{HandleResult, Handler};
use crate::level::Level;
use crate::record::Record;
use crate::value::{Attr, Value};

/// Options for [`JsonHandler`].
#[derive(Debug, Clone, Copy)]
pub struct JsonHandlerOptions {
    /// Minimum level that is written.
    pub level: Level,
    /// Include a `source` object with the call site.
    pub add_source: bool,
    /// Leave out the `time` key.
    pub omit_time: bool,
}

impl Default for JsonHandlerOptions {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            add_source: false,
            omit_time: false,
        }
    }
}

impl JsonHandlerOptions {
    /// Set the minimum level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Include the call site.
    #[must_use]
    pub fn with_source(mut self) -> Self {
        self.add_source = true;
        self
    }

    /// Drop the timestamp.
    #[must_use]
    pub fn without_time(mut self) -> Self {
        self.omit_time = true;
        self
    }
}

#[derive(Debug, Clone)]
struct GroupFrame {
    name: String,
    attrs: Vec<Attr>,
}

type SharedWriter = Arc<Mutex<dyn Write + Send>>;

/// Handler that writes records as JSON lines.
#[derive(Clone)]
pub struct JsonHandler {
    writer: SharedWriter,
    options: JsonHandlerOptions,
    attrs: Vec<Attr>,
    groups: Vec<GroupFrame>,
}

impl std::fmt::Debug for JsonHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonHandler")
            .field("options", &self.options)
            .field("attrs", &self.attrs.len())
            .field("groups", &self.groups.len())
            .finish_non_exhaustive()
    }
}

impl JsonHandler {
    /// Create a handler writing to `writer`.
    #[must_use]
    pub fn new(writer: impl Write + Send + 'static, options: JsonHandlerOptions) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            options,
            attrs: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Encode `record` as one newline-terminated line.
    ///
    /// Members are streamed in order, so a repeated key is written again
    /// rather than replacing the earlier member.
    fn encode(&self, record: &Record) -> serde_json::Result<Vec<u8>> {
        let mut line = Vec::with_capacity(128);
        line.push(b'{');
        if !self.options.omit_time {
            write_key(&mut line, "time")?;
            serde_json::to_writer(
                &mut line,
                &record.time().to_rfc3339_opts(SecondsFormat::AutoSi, true),
            )?;
        }
        write_key(&mut line, "level")?;
        serde_json::to_writer(&mut line, &record.level().to_string())?;
        if self.options.add_source
            && let Some(location) = record.location()
        {
            write_key(&mut line, "source")?;
            serde_json::to_writer(
                &mut line,
                &json!({ "file": location.file(), "line": location.line() }),
            )?;
        }
        write_key(&mut line, "msg")?;
        serde_json::to_writer(&mut line, record.message())?;

        let mut record_attrs = Vec::with_capacity(record.num_attrs());
        record.attrs(|attr| {
            record_attrs.push(attr.clone());
            true
        });
        write_frame(&mut line, &self.attrs, &self.groups, &record_attrs)?;
        line.extend_from_slice(b"}\n");
        Ok(line)
    }
}

fn has_content(attrs: &[Attr]) -> bool {
    attrs.iter().any(|attr| !attr.value.is_empty_group())
}

/// Whether a nesting level or anything below it has members to write.
fn frame_has_content(attrs: &[Attr], groups: &[GroupFrame], record_attrs: &[Attr]) -> bool {
    has_content(attrs)
        || match groups.split_first() {
            Some((group, rest)) => frame_has_content(&group.attrs, rest, record_attrs),
            None => has_content(record_attrs),
        }
}

/// Members of one nesting level: its own attributes, then the next open
/// group, or the record's attributes at the innermost level. Empty groups
/// are left out.
fn write_frame(
    buf: &mut Vec<u8>,
    attrs: &[Attr],
    groups: &[GroupFrame],
    record_attrs: &[Attr],
) -> serde_json::Result<()> {
    write_attrs(buf, attrs)?;
    match groups.split_first() {
        Some((group, rest)) => {
            if frame_has_content(&group.attrs, rest, record_attrs) {
                write_key(buf, &group.name)?;
                buf.push(b'{');
                write_frame(buf, &group.attrs, rest, record_attrs)?;
                buf.push(b'}');
            }
        },
        None => write_attrs(buf, record_attrs)?,
    }
    Ok(())
}

fn write_attrs(buf: &mut Vec<u8>, attrs: &[Attr]) -> serde_json::Result<()> {
    for attr in attrs {
        match &attr.value {
            value if value.is_empty_group() => {},
            // An unnamed group is inlined into its parent.
            Value::Group(members) if attr.key.is_empty() => write_attrs(buf, members)?,
            Value::Group(members) => {
                write_key(buf, &attr.key)?;
                buf.push(b'{');
                write_attrs(buf, members)?;
                buf.push(b'}');
            },
            value => {
                write_key(buf, &attr.key)?;
                serde_json::to_writer(&mut *buf, value)?;
            },
        }
    }
    Ok(())
}

fn write_key(buf: &mut Vec<u8>, key: &str) -> serde_json::Result<()> {
    match buf.last() {
        None | Some(b'{' | b',') => {},
        Some(_) => buf.push(b','),
    }
    serde_json::to_writer(&mut *buf, key)?;
    buf.push(b':');
    Ok(())
}

impl Handler for JsonHandler {
    fn enabled(&self, level: Level) -> bool {
        self.options.level <= level
    }

    fn handle(&self, record: &Record) -> HandleResult<()> {
        let line = self.encode(record)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| std::io::Error::other("json handler writer lock poisoned"))?;
        writer.write_all(&line)?;
        Ok(())
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        if attrs.is_empty() {
            return self;
        }
        let mut handler = (*self).clone();
        match handler.groups.last_mut() {
            Some(group) => group.attrs.extend_from_slice(attrs),
            None => handler.attrs.extend_from_slice(attrs),
        }
        Arc::new(handler)
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        if name.is_empty() {
            return self;
        }
        let mut handler = (*self).clone();
        handler.groups.push(GroupFrame {
            name: name.to_string(),
            attrs: Vec::new(),
        });
        Arc::new(handler)
    }
}
