//! REST session for the Percept platform API.
//!
//! This crate provides the transport layer the SDK builds on:
//! - Env-based configuration
//! - A thin reqwest wrapper with typed request errors carrying HTTP status
//! - The platform version discriminant used to select response-shape parsing

pub mod config;
pub mod error;
pub mod session;
pub mod version;

pub use config::RestConfig;
pub use error::{RestError, RestResult};
pub use session::RestSession;
pub use version::{PlatformVersion, VersionParseError};

// Status codes travel through `RestError`; re-export so downstream crates
// do not need a direct reqwest dependency to match on them.
pub use reqwest::StatusCode;
