//! Logbridge Front - the minimal structured-logging interface.
//!
//! This crate provides:
//! - An open integer severity scale with four named levels
//! - Records carrying a message, timestamp, call site and attributes
//! - The `Handler` trait that turns records into output
//! - The `Logger` facade that front-end code logs through
//! - `JsonHandler`, a native JSON-lines handler
//!
//! # Example
//!
//! ```rust,no_run
//! use logbridge_front::{Attr, JsonHandler, JsonHandlerOptions, Logger};
//!
//! let logger = Logger::new(JsonHandler::new(std::io::stderr(), JsonHandlerOptions::default()));
//! let logger = logger.with(&[Attr::new("component", "ingest")]);
//! logger.info("started", &[Attr::new("workers", 4)]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod handler;
mod json;
mod level;
mod logger;
mod record;
mod value;

pub use handler::{HandleError, HandleResult, Handler};
pub use json::{JsonHandler, JsonHandlerOptions};
pub use level::Level;
pub use logger::Logger;
pub use record::Record;
pub use value::{Attr, Value};
