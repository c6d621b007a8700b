//! End-to-end tests for the bridge handler over an in-memory back-end.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::thread;

use logbridge::{BridgeConfig, BridgeHandler, get_logger, with_limit};
use logbridge_back::{
    AtomicLevel, BackendError, EncoderConfig, IoCore, Level as BackLevel, LevelEncoding,
    Logger as BackLogger, SharedBuffer, WriteSyncer,
};
use logbridge_front::{Attr, Handler, JsonHandler, JsonHandlerOptions, Level, Logger};

fn backend(config: EncoderConfig, level: impl Into<AtomicLevel>) -> (BackLogger, SharedBuffer) {
    let buf = SharedBuffer::new();
    let core = IoCore::new(config, Arc::new(buf.clone()), level);
    (BackLogger::new(core), buf)
}

fn example(level: BackLevel) -> (BackLogger, SharedBuffer) {
    backend(EncoderConfig::example(), level)
}

#[derive(Debug)]
struct BrokenSink;

impl WriteSyncer for BrokenSink {
    fn write_all(&self, _buf: &[u8]) -> std::io::Result<()> {
        Err(std::io::Error::other("disk full"))
    }

    fn sync(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_records_reach_backend() {
    let (backend, buf) = example(BackLevel::Debug);
    let log = BridgeHandler::new(backend, &[]).into_logger();

    log.info("info message", &[]);
    log.error("error message", &[]);
    log.log(Level::ERROR.offset(4), "dpanic message", &[]);

    assert_eq!(
        buf.lines(),
        vec![
            r#"{"level":"info","msg":"info message"}"#,
            r#"{"level":"error","msg":"error message"}"#,
            r#"{"level":"dpanic","msg":"dpanic message"}"#,
        ]
    );
}

#[test]
fn test_limit_down_levels_instead_of_dropping() {
    let (backend, buf) = example(BackLevel::Debug);
    let log = BridgeHandler::new(backend, &[with_limit(BackLevel::Error)]).into_logger();

    log.error("error", &[]);
    log.log(Level::ERROR.offset(4), "dpanic", &[]);
    log.log(Level::ERROR.offset(8), "panic", &[]);
    log.log(Level::ERROR.offset(12), "fatal", &[]);
    log.info("info", &[]);

    assert_eq!(
        buf.lines(),
        vec![
            r#"{"level":"error","msg":"error"}"#,
            r#"{"level":"error","msg":"dpanic"}"#,
            r#"{"level":"error","msg":"panic"}"#,
            r#"{"level":"error","msg":"fatal"}"#,
            r#"{"level":"info","msg":"info"}"#,
        ]
    );
}

#[test]
fn test_limit_from_config() {
    let config: BridgeConfig = serde_json::from_str(r#"{"limit":"warn"}"#).unwrap();
    let (backend, buf) = example(BackLevel::Debug);
    let log = BridgeHandler::new(backend, &config.options()).into_logger();

    log.error("capped", &[]);

    assert_eq!(buf.lines(), vec![r#"{"level":"warn","msg":"capped"}"#]);
}

#[test]
fn test_matches_native_json_handler() {
    fn exercise(log: &Logger) {
        let log = log
            .with(&[Attr::new("a", 1), Attr::new("b", 2)])
            .with_group("A")
            .with(&[Attr::new("c", 3), Attr::new("d", 4)])
            .with_group("B")
            .with(&[Attr::new("e", 5)]);
        log.debug("DEBUG", &[Attr::new("f", 6)]);
        log.info("INFO", &[Attr::new("f", 6)]);
        log.warn("WARN", &[Attr::new("f", 6)]);
    }

    let want = r#"{"level":"WARN","msg":"WARN","a":1,"b":2,"A":{"c":3,"d":4,"B":{"e":5,"f":6}}}"#;

    let native_buf = SharedBuffer::new();
    let native = Logger::new(JsonHandler::new(
        native_buf.clone(),
        JsonHandlerOptions::default()
            .with_level(Level::WARN)
            .without_time(),
    ));
    exercise(&native);
    assert_eq!(native_buf.lines(), vec![want]);

    let (backend, bridged_buf) = backend(
        EncoderConfig::example().with_level_encoding(LevelEncoding::Capital),
        BackLevel::Warn,
    );
    exercise(&BridgeHandler::new(backend, &[]).into_logger());
    assert_eq!(bridged_buf.lines(), vec![want]);
}

#[test]
fn test_repeated_keys_match_native_json_handler() {
    fn exercise(log: &Logger) {
        let log = log.with(&[Attr::new("a", 1)]).with(&[Attr::new("a", 2)]);
        log.warn("W", &[Attr::new("msg", "x")]);
    }

    let want = r#"{"level":"WARN","msg":"W","a":1,"a":2,"msg":"x"}"#;

    let native_buf = SharedBuffer::new();
    exercise(&Logger::new(JsonHandler::new(
        native_buf.clone(),
        JsonHandlerOptions::default().without_time(),
    )));
    assert_eq!(native_buf.lines(), vec![want]);

    let (backend, bridged_buf) = backend(
        EncoderConfig::example().with_level_encoding(LevelEncoding::Capital),
        BackLevel::Info,
    );
    exercise(&BridgeHandler::new(backend, &[]).into_logger());
    assert_eq!(bridged_buf.lines(), vec![want]);
}

#[test]
fn test_get_logger() {
    let (backend, _) = example(BackLevel::Info);
    let core = Arc::clone(backend.core());
    let log = BridgeHandler::new(backend, &[]).into_logger();

    let recovered = get_logger(&log).unwrap();
    assert!(Arc::ptr_eq(recovered.core(), &core));

    // Derived loggers keep a bridge handler, over a derived core.
    let child = log.with(&[Attr::new("k", "v")]);
    assert!(get_logger(&child).is_some());

    let native = Logger::new(JsonHandler::new(SharedBuffer::new(), JsonHandlerOptions::default()));
    assert!(get_logger(&native).is_none());
}

#[test]
fn test_level_and_limit() {
    let (backend, _) = example(BackLevel::Debug);
    let handler = BridgeHandler::new(backend.clone(), &[]);
    assert_eq!(handler.level(), Level::DEBUG);
    assert_eq!(handler.limit(), Level::MAX);

    let handler = BridgeHandler::new(backend, &[with_limit(BackLevel::Error)]);
    assert_eq!(handler.limit(), Level::ERROR);
}

#[test]
fn test_empty_attrs_return_same_handler() {
    let (backend, _) = example(BackLevel::Debug);
    let handler: Arc<dyn Handler> = Arc::new(BridgeHandler::new(backend, &[]));
    let derived = Arc::clone(&handler).with_attrs(&[]);
    assert!(Arc::ptr_eq(&derived, &handler));
}

#[test]
fn test_level_is_captured_at_construction() {
    let threshold = AtomicLevel::new(BackLevel::Warn);
    let (backend, buf) = backend(EncoderConfig::example(), threshold.clone());
    let log = BridgeHandler::new(backend, &[]).into_logger();

    threshold.set_level(BackLevel::Error);
    assert!(log.enabled(Level::WARN));

    // The back-end itself applies its new threshold.
    log.warn("dropped by back-end", &[]);
    log.error("kept", &[]);
    assert_eq!(buf.lines(), vec![r#"{"level":"error","msg":"kept"}"#]);

    threshold.set_level(BackLevel::Debug);
    log.info("below handler level", &[]);
    assert_eq!(buf.lines().len(), 1);
}

#[test]
fn test_caller_is_forwarded() {
    let config = EncoderConfig {
        caller_key: "caller".to_string(),
        ..EncoderConfig::example()
    };
    let (backend, buf) = backend(config, BackLevel::Debug);
    let log = BridgeHandler::new(backend, &[]).into_logger();

    log.info("here", &[]);

    let line: serde_json::Value = serde_json::from_str(&buf.lines()[0]).unwrap();
    let caller = line["caller"].as_str().unwrap();
    assert!(caller.contains("handler.rs:"), "unexpected caller {caller}");
}

#[test]
fn test_write_error_is_returned() {
    let core = IoCore::new(EncoderConfig::example(), Arc::new(BrokenSink), BackLevel::Debug);
    let log = BridgeHandler::new(BackLogger::new(core), &[]).into_logger();

    let err = log.try_log(Level::ERROR, "lost", &[]).unwrap_err();
    let err = err.downcast_ref::<BackendError>().unwrap();
    assert!(matches!(err, BackendError::Io(_)));

    // The plain API reports instead of failing.
    log.error("lost again", &[]);
}

#[test]
#[should_panic(expected = "boom")]
fn test_unbounded_panic_level_panics() {
    let (backend, _) = example(BackLevel::Debug);
    let log = BridgeHandler::new(backend, &[]).into_logger();
    log.log(Level::ERROR.offset(8), "boom", &[]);
}

#[test]
fn test_limited_panic_level_does_not_panic() {
    let (backend, buf) = example(BackLevel::Debug);
    let log = BridgeHandler::new(backend, &[with_limit(BackLevel::Error)]).into_logger();
    log.log(Level::ERROR.offset(8), "boom", &[]);
    assert_eq!(buf.lines().len(), 1);
}

#[test]
fn test_concurrent_emit() {
    let (backend, buf) = example(BackLevel::Debug);
    let log = BridgeHandler::new(backend, &[]).into_logger();

    let workers: Vec<_> = (0..4)
        .map(|id| {
            let log = log.with(&[Attr::new("worker", id)]);
            thread::spawn(move || {
                for n in 0..25 {
                    log.info("tick", &[Attr::new("n", n)]);
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    let lines = buf.lines();
    assert_eq!(lines.len(), 100);
    for line in lines {
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["msg"], "tick");
        assert!(parsed["worker"].is_i64());
    }
}
