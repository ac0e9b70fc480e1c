//! Static configuration of a list screen.
//!
//! A [`ScreenContext`] is built once from a validated [`ScreenConfig`] and is
//! never mutated afterwards. The presets reproduce the four list screens the
//! app ships with.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::{Direction, ItemKind};

pub const MAX_RETRY_ATTEMPTS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    Friends,
    Cards,
    SentTransfers,
    ReceivedTransfers,
}

impl ScreenKind {
    pub fn item_kind(self) -> ItemKind {
        match self {
            ScreenKind::Friends => ItemKind::Contact,
            ScreenKind::Cards => ItemKind::Card,
            ScreenKind::SentTransfers | ScreenKind::ReceivedTransfers => ItemKind::Transfer,
        }
    }

    /// The transfer direction this screen lists, if it lists transfers.
    pub fn direction(self) -> Option<Direction> {
        match self {
            ScreenKind::SentTransfers => Some(Direction::Sent),
            ScreenKind::ReceivedTransfers => Some(Direction::Received),
            ScreenKind::Friends | ScreenKind::Cards => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ScreenKind::Friends => "Friends",
            ScreenKind::Cards => "Cards",
            ScreenKind::SentTransfers => "Sent",
            ScreenKind::ReceivedTransfers => "Received",
        }
    }

    pub fn primary_action(self) -> PrimaryAction {
        match self {
            ScreenKind::Friends => PrimaryAction::AddFriend,
            ScreenKind::Cards => PrimaryAction::AddCard,
            ScreenKind::SentTransfers => PrimaryAction::SendMoney,
            ScreenKind::ReceivedTransfers => PrimaryAction::RequestMoney,
        }
    }

    pub fn preset(self) -> ScreenConfig {
        match self {
            ScreenKind::Friends => ScreenConfig {
                kind: self,
                retry: RetryPolicy::attempts(2),
                long_date_style: false,
                fallback_to_cache: true,
            },
            ScreenKind::Cards => ScreenConfig {
                kind: self,
                retry: RetryPolicy::disabled(),
                long_date_style: false,
                fallback_to_cache: false,
            },
            ScreenKind::SentTransfers => ScreenConfig {
                kind: self,
                retry: RetryPolicy::attempts(1),
                long_date_style: true,
                fallback_to_cache: false,
            },
            ScreenKind::ReceivedTransfers => ScreenConfig {
                kind: self,
                retry: RetryPolicy::attempts(1),
                long_date_style: false,
                fallback_to_cache: false,
            },
        }
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The navigation bar action each screen offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimaryAction {
    AddFriend,
    AddCard,
    SendMoney,
    RequestMoney,
}

impl PrimaryAction {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryAction::AddFriend | PrimaryAction::AddCard => "Add",
            PrimaryAction::SendMoney => "Send",
            PrimaryAction::RequestMoney => "Request",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub enabled: bool,
    #[serde(default)]
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            max_attempts: 0,
        }
    }

    pub const fn attempts(max_attempts: u32) -> Self {
        Self {
            enabled: true,
            max_attempts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid screen config: {0}")]
    Validation(String),

    #[error("could not parse screen config: {0}")]
    Parse(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub kind: ScreenKind,
    pub retry: RetryPolicy,
    #[serde(default)]
    pub long_date_style: bool,
    #[serde(default)]
    pub fallback_to_cache: bool,
}

impl ScreenConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retry.max_attempts > MAX_RETRY_ATTEMPTS {
            return Err(ConfigError::Validation(format!(
                "max_attempts must be <= {MAX_RETRY_ATTEMPTS}"
            )));
        }
        if self.fallback_to_cache && self.kind.item_kind() != ItemKind::Contact {
            return Err(ConfigError::Validation(format!(
                "no cached data is kept for {} screens",
                self.kind.item_kind()
            )));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Immutable description of one list screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenContext {
    config: ScreenConfig,
}

impl ScreenContext {
    pub fn new(config: ScreenConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn preset(kind: ScreenKind) -> Self {
        Self {
            config: kind.preset(),
        }
    }

    pub fn kind(&self) -> ScreenKind {
        self.config.kind
    }

    pub fn item_kind(&self) -> ItemKind {
        self.config.kind.item_kind()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.config.retry
    }

    pub fn long_date_style(&self) -> bool {
        self.config.long_date_style
    }

    pub fn fallback_to_cache(&self) -> bool {
        self.config.fallback_to_cache
    }

    pub fn title(&self) -> &'static str {
        self.config.kind.title()
    }

    pub fn primary_action(&self) -> PrimaryAction {
        self.config.kind.primary_action()
    }
}
