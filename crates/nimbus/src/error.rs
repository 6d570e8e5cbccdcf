//! # NIMBUS Error Types
//!
//! Errors from the fallible edges of the simulation: loading configuration
//! and wiring systems into the world. Nothing that runs inside a tick
//! returns one of these.

use std::path::PathBuf;

use nimbus_core::EcsError;
use thiserror::Error;

/// Errors that can occur while setting up a simulation.
#[derive(Error, Debug)]
pub enum NimbusError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML for [`SimulationConfig`](crate::SimulationConfig).
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A world operation failed.
    #[error(transparent)]
    Ecs(#[from] EcsError),
}

/// Result type for NIMBUS setup operations.
pub type NimbusResult<T> = Result<T, NimbusError>;
