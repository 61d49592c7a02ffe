// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Term graph error types

use thiserror::Error;

/// Result type for term graph operations
pub type Result<T> = std::result::Result<T, TermGraphError>;

/// Errors that can occur while building, persisting or configuring the graph
#[derive(Debug, Error)]
pub enum TermGraphError {
    /// A structural contract was broken (indicates a decomposition bug)
    #[error("Invariant violated: {0}")]
    Invariant(String),

    /// Node lookup failed where the caller required it to exist
    #[error("Term not found: {0}")]
    TermNotFound(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Malformed persisted data
    #[error("Format error at line {line}: {message}")]
    FormatError { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error
    #[error("Term graph error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for TermGraphError {
    fn from(e: serde_json::Error) -> Self {
        TermGraphError::SerializationError(e.to_string())
    }
}

impl From<toml::de::Error> for TermGraphError {
    fn from(e: toml::de::Error) -> Self {
        TermGraphError::ConfigError(e.to_string())
    }
}
