//! Prediction retrieval modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-side retrieval policy for prediction requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Return a cached prediction if it is up to date, otherwise run inference
    #[default]
    Auto,
    /// Return the most recent stored prediction; never trigger inference
    Latest,
    /// Always run fresh inference, ignoring the cache
    Online,
}

impl PredictionMode {
    /// Mode name as used in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionMode::Auto => "auto",
            PredictionMode::Latest => "latest",
            PredictionMode::Online => "online",
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PredictionMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(PredictionMode::Auto),
            "latest" => Ok(PredictionMode::Latest),
            "online" => Ok(PredictionMode::Online),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown prediction mode: {0}")]
pub struct ModeParseError(String);
