//! Logbridge - front-end logging on top of the logbridge back-end.
//!
//! This crate provides:
//! - `levelconv`: fixed conversion between the front-end integer scale and
//!   the back-end's seven levels
//! - `BridgeHandler`: a front-end `Handler` writing through a back-end
//!   `Logger`, with an optional cap on the back-end level
//! - `get_logger` to recover the back-end logger from a front-end one
//!
//! # Example
//!
//! ```rust,no_run
//! use logbridge::{BridgeHandler, with_limit};
//! use logbridge_back::{Level, LoggerConfig};
//! use logbridge_front::{Attr, Level as FrontLevel};
//!
//! # fn main() -> Result<(), logbridge_back::BackendError> {
//! let backend = LoggerConfig::new(Level::Debug).build()?;
//! let log = BridgeHandler::new(backend, &[with_limit(Level::Error)]).into_logger();
//!
//! // Would make the back-end panic without the limit; written as "error".
//! log.log(FrontLevel::ERROR.offset(8), "disk failing", &[Attr::new("disk", "sda")]);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod levelconv;
pub mod prelude;

mod handler;
mod options;

pub use handler::{BridgeHandler, get_logger};
pub use options::{BridgeConfig, HandlerOption, with_limit};
