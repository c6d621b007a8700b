//! Conversion between front-end and back-end severities.
//!
//! The front-end scale is an open integer with named levels four apart:
//!
//! ```text
//! DEBUG = -4   INFO = 0   WARN = 4   ERROR = 8
//! ```
//!
//! The back-end has exactly seven levels:
//!
//! ```text
//! Debug < Info < Warn < Error < DPanic < Panic < Fatal
//! ```
//!
//! The two scales share Debug, Info, Warn and Error, so those anchor the
//! mapping. The three back-end levels above Error continue the spacing of
//! four on the front-end side.

use logbridge_back::Level as BackLevel;
use logbridge_front::Level as FrontLevel;

/// Converts a back-end level to the front-end scale.
///
/// Info maps to the front-end baseline and each step is four apart:
///
/// ```text
/// Debug  -> DEBUG
/// Info   -> INFO
/// Warn   -> WARN
/// Error  -> ERROR
/// DPanic -> ERROR+4
/// Panic  -> ERROR+8
/// Fatal  -> ERROR+12
/// ```
#[must_use]
pub const fn to_front(level: BackLevel) -> FrontLevel {
    match level {
        BackLevel::Debug => FrontLevel::DEBUG,
        BackLevel::Info => FrontLevel::INFO,
        BackLevel::Warn => FrontLevel::WARN,
        BackLevel::Error => FrontLevel::ERROR,
        BackLevel::DPanic => FrontLevel::ERROR.offset(4),
        BackLevel::Panic => FrontLevel::ERROR.offset(8),
        BackLevel::Fatal => FrontLevel::ERROR.offset(12),
    }
}

/// Upper bounds (exclusive) of each back-end bucket below Fatal.
const TO_BACK: [(i32, BackLevel); 6] = [
    (0, BackLevel::Debug),
    (4, BackLevel::Info),
    (8, BackLevel::Warn),
    (12, BackLevel::Error),
    (16, BackLevel::DPanic),
    (20, BackLevel::Panic),
];

/// Converts a front-end level to the back-end scale.
///
/// Values are bucketed in steps of four starting at INFO; anything below
/// INFO is Debug and anything from ERROR+12 up is Fatal:
///
/// ```text
/// (-inf, 0)  -> Debug
/// [0, 4)     -> Info
/// [4, 8)     -> Warn
/// [8, 12)    -> Error
/// [12, 16)   -> DPanic
/// [16, 20)   -> Panic
/// [20, +inf) -> Fatal
/// ```
#[must_use]
pub fn to_back(level: FrontLevel) -> BackLevel {
    TO_BACK
        .iter()
        .find(|(bound, _)| level.value() < *bound)
        .map_or(BackLevel::Fatal, |&(_, back)| back)
}
