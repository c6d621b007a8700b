//! The core: decides what is enabled and writes encoded entries.

use std::fmt;
use std::sync::Arc;

use tracing::warn;

use crate::encoder::{EncoderConfig, JsonEncoder};
use crate::entry::Entry;
use crate::error::BackendResult;
use crate::field::Field;
use crate::level::{AtomicLevel, Level};
use crate::sink::WriteSyncer;

/// Minimal interface between a [`Logger`](crate::Logger) and its output.
pub trait Core: Send + Sync + fmt::Debug {
    /// Whether entries at `level` are written.
    fn enabled(&self, level: Level) -> bool;

    /// Current threshold.
    fn level(&self) -> Level;

    /// Core that adds `fields` to every entry. The receiver is unchanged.
    fn with(&self, fields: &[Field]) -> Arc<dyn Core>;

    /// Encode and write an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn write(&self, entry: &Entry, fields: &[Field]) -> BackendResult<()>;

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to flush.
    fn sync(&self) -> BackendResult<()>;
}

/// Core that encodes JSON lines into a [`WriteSyncer`].
#[derive(Debug, Clone)]
pub struct IoCore {
    encoder: JsonEncoder,
    sink: Arc<dyn WriteSyncer>,
    level: AtomicLevel,
}

impl IoCore {
    /// Create a core. Pass an [`AtomicLevel`] to keep the threshold
    /// adjustable from outside.
    #[must_use]
    pub fn new(
        config: EncoderConfig,
        sink: Arc<dyn WriteSyncer>,
        level: impl Into<AtomicLevel>,
    ) -> Self {
        Self {
            encoder: JsonEncoder::new(config),
            sink,
            level: level.into(),
        }
    }
}

impl Core for IoCore {
    fn enabled(&self, level: Level) -> bool {
        self.level.enabled(level)
    }

    fn level(&self) -> Level {
        self.level.level()
    }

    fn with(&self, fields: &[Field]) -> Arc<dyn Core> {
        let mut core = self.clone();
        if let Err(e) = core.encoder.add_fields(fields) {
            warn!(error = %e, "Dropping context fields that failed to encode");
        }
        Arc::new(core)
    }

    fn write(&self, entry: &Entry, fields: &[Field]) -> BackendResult<()> {
        let line = self.encoder.encode_entry(entry, fields)?;
        self.sink.write_all(&line)?;
        // Entries above Error may end the process; get them out first.
        if entry.level > Level::Error {
            self.sink.sync()?;
        }
        Ok(())
    }

    fn sync(&self) -> BackendResult<()> {
        Ok(self.sink.sync()?)
    }
}
