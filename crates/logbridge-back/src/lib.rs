//! Logbridge Back - a structured JSON logging engine.
//!
//! This crate provides:
//! - Seven ordered severity levels, the top three with terminal behavior
//! - A runtime-adjustable threshold shared between loggers
//! - Any-typed and namespace fields
//! - A JSON-lines encoder and pluggable output sinks
//! - `Logger::check` so callers can skip field construction for disabled
//!   entries
//!
//! # Example
//!
//! ```rust,no_run
//! use logbridge_back::{Field, Level, LoggerConfig};
//!
//! # fn main() -> Result<(), logbridge_back::BackendError> {
//! let logger = LoggerConfig::new(Level::Info).build()?;
//! let logger = logger.with(&[Field::string("service", "ingest")]);
//!
//! if let Some(entry) = logger.check(Level::Warn, "queue almost full") {
//!     entry.write(&[Field::any("depth", &950)])?;
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod config;
mod encoder;
mod engine;
mod entry;
mod error;
mod field;
mod level;
mod logger;
pub mod sink;

pub use config::{LoggerConfig, OutputTarget};
pub use encoder::{CallerEncoding, EncoderConfig, JsonEncoder, LevelEncoding, TimeEncoding};
pub use engine::{Core, IoCore};
pub use entry::{Entry, EntryCaller};
pub use error::{BackendError, BackendResult};
pub use field::{Field, FieldKind};
pub use level::{AtomicLevel, Level, ParseLevelError};
pub use logger::{CheckedEntry, Logger};
pub use sink::{SharedBuffer, WriteSyncer};
