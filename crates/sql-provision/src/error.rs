//! Error types for the provisioning library.

use std::fmt;

use thiserror::Error;

/// Provisioning stage in which a DDL statement failed.
///
/// Carried inside [`ProvisionError::Ddl`] so callers can tell which phase
/// failed without parsing message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stage {
    /// `CREATE DATABASE`, issued against the admin database.
    CreateDatabase,
    /// `CREATE SCHEMA IF NOT EXISTS`, issued after retargeting.
    CreateSchema,
    /// `CREATE TABLE` for the named table.
    CreateTable(String),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::CreateDatabase => write!(f, "create database"),
            Stage::CreateSchema => write!(f, "create schema"),
            Stage::CreateTable(table) => write!(f, "create table {}", table),
        }
    }
}

/// Main error type for provisioning operations.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Unknown database engine tag; caller must fix configuration.
    #[error("Unsupported database engine: '{0}' (expected postgresql, mysql or redshift)")]
    UnsupportedEngine(String),

    /// Configuration error (invalid YAML values, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or authentication failure while opening or retargeting
    /// a connection.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A table definition with zero columns was supplied.
    #[error("Table '{0}' has no columns")]
    EmptyTable(String),

    /// A DDL statement failed at a named stage. The cause carries the
    /// engine's error message verbatim.
    #[error("DDL failed at stage '{stage}': {cause}")]
    Ddl { stage: Stage, cause: String },

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProvisionError {
    /// Create a Ddl error with the engine's message as the cause.
    pub fn ddl(stage: Stage, cause: impl Into<String>) -> Self {
        ProvisionError::Ddl {
            stage,
            cause: cause.into(),
        }
    }

    /// Format error with full details including error chain.
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }

    /// Process exit code for the CLI, one per error class.
    pub fn exit_code(&self) -> u8 {
        match self {
            ProvisionError::UnsupportedEngine(_) => 2,
            ProvisionError::Config(_) => 2,
            ProvisionError::EmptyTable(_) => 2,
            ProvisionError::Connection(_) => 3,
            ProvisionError::Ddl { .. } => 4,
            ProvisionError::Io(_) | ProvisionError::Yaml(_) | ProvisionError::Json(_) => 1,
        }
    }
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::CreateDatabase.to_string(), "create database");
        assert_eq!(Stage::CreateSchema.to_string(), "create schema");
        assert_eq!(
            Stage::CreateTable("orders".into()).to_string(),
            "create table orders"
        );
    }

    #[test]
    fn test_ddl_error_carries_cause_verbatim() {
        let err = ProvisionError::ddl(
            Stage::CreateDatabase,
            "database \"newdb\" already exists",
        );
        let msg = err.to_string();
        assert!(msg.contains("create database"));
        assert!(msg.contains("database \"newdb\" already exists"));
    }

    #[test]
    fn test_exit_codes_distinguish_classes() {
        assert_eq!(ProvisionError::Config("x".into()).exit_code(), 2);
        assert_eq!(ProvisionError::Connection("x".into()).exit_code(), 3);
        assert_eq!(
            ProvisionError::ddl(Stage::CreateSchema, "x").exit_code(),
            4
        );
    }
}
