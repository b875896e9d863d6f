//! User-facing advisory messages

use serde::{Deserialize, Serialize};

use crate::error::LeaderboardError;

/// Message severity, mapped to alert styling by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// A dismissible message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub severity: Severity,
    pub message: String,
}

impl Advisory {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }
}

impl From<&LeaderboardError> for Advisory {
    fn from(err: &LeaderboardError) -> Self {
        match err {
            LeaderboardError::EmptyTime => Advisory::warning("Time is empty"),
            LeaderboardError::MissingName => Advisory::warning("You must enter a team name to save"),
            LeaderboardError::IndexOutOfRange { .. } => {
                Advisory::warning("That entry no longer exists")
            }
            LeaderboardError::StoreUnavailable(e) => {
                Advisory::error(format!("Could not save data: {}", e))
            }
        }
    }
}
