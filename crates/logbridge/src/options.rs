//! Handler options and their declarative form.

use logbridge_back::Level as BackLevel;
use serde::{Deserialize, Serialize};

use crate::handler::BridgeHandler;

/// Option applied while building a [`BridgeHandler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOption {
    /// Cap the back-end level records are written at. See [`with_limit`].
    Limit(BackLevel),
}

impl HandlerOption {
    pub(crate) fn apply(self, handler: &mut BridgeHandler) {
        match self {
            Self::Limit(level) => handler.set_limit(level),
        }
    }
}

/// Cap the level records reach the back-end at.
///
/// A record whose converted level is above `limit` is written at `limit`.
/// It is not suppressed. Capping at [`BackLevel::Error`] keeps front-end
/// logging from ever triggering the back-end's panic or exit behavior.
#[must_use]
pub fn with_limit(limit: BackLevel) -> HandlerOption {
    HandlerOption::Limit(limit)
}

/// Declarative handler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Highest back-end level to write at. Unbounded when absent.
    #[serde(default)]
    pub limit: Option<BackLevel>,
}

impl BridgeConfig {
    /// Set the limit.
    #[must_use]
    pub fn with_limit(mut self, limit: BackLevel) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Options equivalent to this configuration.
    #[must_use]
    pub fn options(&self) -> Vec<HandlerOption> {
        self.limit.map(with_limit).into_iter().collect()
    }
}
