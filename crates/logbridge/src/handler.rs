//! Front-end handler backed by a back-end logger.

use std::any::Any;
use std::cmp;
use std::sync::Arc;

use logbridge_back::{EntryCaller, Field, Level as BackLevel, Logger as BackLogger};
use logbridge_front::{
    Attr, HandleResult, Handler, Level as FrontLevel, Logger as FrontLogger, Record,
};
use tracing::{debug, trace};

use crate::levelconv;
use crate::options::HandlerOption;

/// A [`Handler`] that forwards records to a back-end [`BackLogger`].
///
/// Front-end levels are converted with [`levelconv::to_back`]. The back-end
/// panics or exits on its top levels while the front-end API never does, so
/// a limit can cap the converted level: records above the limit are written
/// at the limit instead of being dropped.
///
/// Deriving handlers with attributes or groups clones this handler and
/// rebinds only its back-end logger; the original is never touched.
#[derive(Debug, Clone)]
pub struct BridgeHandler {
    logger: BackLogger,
    level: FrontLevel,
    limit: FrontLevel,
}

impl BridgeHandler {
    /// Create a handler writing through `logger`.
    ///
    /// The minimum level is taken from the logger's threshold now and is not
    /// updated if that threshold changes later. The limit defaults to
    /// [`FrontLevel::MAX`], meaning no cap. Options are applied in order.
    #[must_use]
    pub fn new(logger: BackLogger, options: &[HandlerOption]) -> Self {
        let mut handler = Self {
            level: levelconv::to_front(logger.level()),
            limit: FrontLevel::MAX,
            logger,
        };
        for option in options {
            option.apply(&mut handler);
        }
        debug!(
            level = %handler.level,
            limit = %handler.limit,
            "Bridge handler created"
        );
        handler
    }

    /// The back-end logger records are written to.
    #[must_use]
    pub fn logger(&self) -> &BackLogger {
        &self.logger
    }

    /// Minimum record level that is handled.
    #[must_use]
    pub fn level(&self) -> FrontLevel {
        self.level
    }

    /// Highest level passed to the back-end.
    #[must_use]
    pub fn limit(&self) -> FrontLevel {
        self.limit
    }

    pub(crate) fn set_limit(&mut self, limit: BackLevel) {
        self.limit = levelconv::to_front(limit);
    }

    /// Wrap this handler in a front-end logger.
    #[must_use]
    pub fn into_logger(self) -> FrontLogger {
        FrontLogger::new(self)
    }
}

fn to_field(attr: &Attr) -> Field {
    Field::any(attr.key.as_str(), &attr.value)
}

impl Handler for BridgeHandler {
    fn enabled(&self, level: FrontLevel) -> bool {
        self.level <= level
    }

    fn handle(&self, record: &Record) -> HandleResult<()> {
        let effective = cmp::min(self.limit, record.level());
        if effective < record.level() {
            trace!(
                requested = %record.level(),
                effective = %effective,
                "Record level capped at handler limit"
            );
        }
        let Some(mut entry) = self
            .logger
            .check(levelconv::to_back(effective), record.message())
        else {
            return Ok(());
        };

        entry.set_time(record.time());
        if let Some(location) = record.location() {
            entry.set_caller(EntryCaller::from_location(location));
        }
        let mut fields = Vec::with_capacity(record.num_attrs());
        record.attrs(|attr| {
            fields.push(to_field(attr));
            true
        });
        entry.write(&fields)?;
        Ok(())
    }

    fn with_attrs(self: Arc<Self>, attrs: &[Attr]) -> Arc<dyn Handler> {
        if attrs.is_empty() {
            return self;
        }
        let fields: Vec<Field> = attrs.iter().map(to_field).collect();
        let mut handler = (*self).clone();
        handler.logger = handler.logger.with(&fields);
        Arc::new(handler)
    }

    fn with_group(self: Arc<Self>, name: &str) -> Arc<dyn Handler> {
        let mut handler = (*self).clone();
        handler.logger = handler.logger.with(&[Field::namespace(name)]);
        Arc::new(handler)
    }
}

/// The back-end logger behind `logger`, if its handler is a
/// [`BridgeHandler`].
#[must_use]
pub fn get_logger(logger: &FrontLogger) -> Option<&BackLogger> {
    let handler: &dyn Handler = &**logger.handler();
    let handler: &dyn Any = handler;
    handler
        .downcast_ref::<BridgeHandler>()
        .map(BridgeHandler::logger)
}

#[cfg(test)]
mod tests {
    use logbridge_back::{EncoderConfig, IoCore, SharedBuffer};

    use super::*;
    use crate::options::with_limit;

    fn backend(level: BackLevel) -> (BackLogger, SharedBuffer) {
        let buf = SharedBuffer::new();
        let core = IoCore::new(EncoderConfig::example(), Arc::new(buf.clone()), level);
        (BackLogger::new(core), buf)
    }

    #[test]
    fn test_level_follows_backend_threshold() {
        for level in BackLevel::ALL {
            let (logger, _) = backend(level);
            let handler = BridgeHandler::new(logger, &[]);
            assert_eq!(handler.level(), levelconv::to_front(level));
        }
    }

    #[test]
    fn test_enabled_is_monotonic() {
        let (logger, _) = backend(BackLevel::Warn);
        let handler = BridgeHandler::new(logger, &[]);
        let mut was_enabled = false;
        for value in -20..=40 {
            let enabled = handler.enabled(FrontLevel::new(value));
            assert!(enabled || !was_enabled, "enabled went false at {value}");
            was_enabled = enabled;
        }
        assert!(!handler.enabled(FrontLevel::INFO.offset(3)));
        assert!(handler.enabled(FrontLevel::WARN));
    }

    #[test]
    fn test_options_apply_in_order() {
        let (logger, _) = backend(BackLevel::Debug);
        let handler = BridgeHandler::new(
            logger,
            &[with_limit(BackLevel::DPanic), with_limit(BackLevel::Warn)],
        );
        assert_eq!(handler.limit(), FrontLevel::WARN);
    }

    #[test]
    fn test_disabled_backend_level_writes_nothing() {
        let (logger, buf) = backend(BackLevel::Error);
        let handler = BridgeHandler::new(logger, &[]);
        let record = Record::new(chrono::Utc::now(), FrontLevel::WARN, "quiet", None);
        handler.handle(&record).unwrap();
        assert!(buf.contents().is_empty());
    }

    #[test]
    fn test_record_without_location_omits_caller() {
        let buf = SharedBuffer::new();
        let config = EncoderConfig {
            caller_key: "caller".to_string(),
            ..EncoderConfig::example()
        };
        let core = IoCore::new(config, Arc::new(buf.clone()), BackLevel::Debug);
        let handler = BridgeHandler::new(BackLogger::new(core), &[]);

        let record = Record::new(chrono::Utc::now(), FrontLevel::INFO, "anonymous", None);
        handler.handle(&record).unwrap();

        let lines = buf.lines();
        assert_eq!(lines.len(), 1);
        let line: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(line["msg"], "anonymous");
        assert!(line.get("caller").is_none());
    }

    #[test]
    fn test_record_with_location_sets_caller() {
        let buf = SharedBuffer::new();
        let config = EncoderConfig {
            caller_key: "caller".to_string(),
            ..EncoderConfig::example()
        };
        let core = IoCore::new(config, Arc::new(buf.clone()), BackLevel::Debug);
        let handler = BridgeHandler::new(BackLogger::new(core), &[]);

        let location = std::panic::Location::caller();
        let record = Record::new(chrono::Utc::now(), FrontLevel::INFO, "located", Some(location));
        handler.handle(&record).unwrap();

        let want = format!("\"caller\":\"src/handler.rs:{}\"", location.line());
        assert!(buf.contents().contains(&want), "{}", buf.contents());
    }

    #[test]
    fn test_with_group_always_clones() {
        let (logger, _) = backend(BackLevel::Debug);
        let handler: Arc<dyn Handler> = Arc::new(BridgeHandler::new(logger, &[]));
        assert!(!Arc::ptr_eq(&Arc::clone(&handler).with_group(""), &handler));
    }
}
