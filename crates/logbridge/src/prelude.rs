//! Prelude module - commonly used types for convenient import.
//!
//! Use `use logbridge::prelude::*;` to import all essential types.
//!
//! Front-end and back-end types share names, so the back-end ones are
//! re-exported with a `Back` prefix.
//!
//! # Example
//!
//! ```rust,no_run
//! use logbridge::prelude::*;
//!
//! # fn main() -> Result<(), BackendError> {
//! let backend = LoggerConfig::new(BackLevel::Info).build()?;
//! let log = BridgeHandler::new(backend, &[with_limit(BackLevel::Error)]).into_logger();
//! log.info("ready", &[Attr::new("port", 8080)]);
//! # Ok(())
//! # }
//! ```

// Adapter
pub use crate::{BridgeConfig, BridgeHandler, HandlerOption, get_logger, with_limit};

// Front-end
pub use logbridge_front::{Attr, Handler, Level, Logger, Value};

// Back-end
pub use logbridge_back::{
    BackendError, BackendResult, Field, Level as BackLevel, Logger as BackLogger, LoggerConfig,
};
