//! Output destinations.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// A destination for encoded lines.
///
/// Implementations own any synchronization needed for concurrent writers;
/// each `write_all` call carries one complete line.
pub trait WriteSyncer: Send + Sync + fmt::Debug {
    /// Write a complete line.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn write_all(&self, buf: &[u8]) -> io::Result<()>;

    /// Flush buffered output.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error.
    fn sync(&self) -> io::Result<()>;
}

fn poisoned() -> io::Error {
    io::Error::other("sink lock poisoned")
}

/// Wraps any writer in a mutex so whole lines never interleave.
pub struct Locked<W> {
    inner: Mutex<W>,
    name: &'static str,
}

impl<W: Write + Send> Locked<W> {
    /// Wrap `writer`. `name` only shows up in debug output.
    pub fn new(writer: W, name: &'static str) -> Self {
        Self {
            inner: Mutex::new(writer),
            name,
        }
    }
}

impl<W> fmt::Debug for Locked<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locked")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<W: Write + Send> WriteSyncer for Locked<W> {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        self.inner.lock().map_err(|_| poisoned())?.write_all(buf)
    }

    fn sync(&self) -> io::Result<()> {
        self.inner.lock().map_err(|_| poisoned())?.flush()
    }
}

/// Standard output sink.
#[must_use]
pub fn stdout() -> Arc<dyn WriteSyncer> {
    Arc::new(Locked::new(io::stdout(), "stdout"))
}

/// Standard error sink.
#[must_use]
pub fn stderr() -> Arc<dyn WriteSyncer> {
    Arc::new(Locked::new(io::stderr(), "stderr"))
}

/// In-memory sink for capturing output.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        self.0
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }

    /// Written lines without their terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discard everything written so far.
    pub fn clear(&self) {
        if let Ok(mut buf) = self.0.lock() {
            buf.clear();
        }
    }
}

impl WriteSyncer for SharedBuffer {
    fn write_all(&self, buf: &[u8]) -> io::Result<()> {
        self.0.lock().map_err(|_| poisoned())?.extend_from_slice(buf);
        Ok(())
    }

    fn sync(&self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        WriteSyncer::write_all(&*self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
