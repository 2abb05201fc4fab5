//! Dialect registry: engine kinds, connection URL schemes, identifier quoting.
//!
//! Engine kinds form a closed enumeration; unknown tags are rejected at
//! parse/deserialization time, before any network call is attempted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ProvisionError, Result};

/// Supported database engine family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineKind {
    /// PostgreSQL-compatible engines.
    #[serde(rename = "postgresql")]
    Postgres,

    /// MySQL/MariaDB-compatible engines.
    #[serde(rename = "mysql")]
    Mysql,

    /// Amazon Redshift (PostgreSQL wire protocol).
    #[serde(rename = "redshift")]
    Redshift,
}

impl EngineKind {
    /// Connection URL scheme for this engine.
    pub fn url_scheme(&self) -> &'static str {
        match self {
            EngineKind::Postgres => "postgresql",
            EngineKind::Mysql => "mysql",
            EngineKind::Redshift => "redshift",
        }
    }

    /// Default port for this engine.
    pub fn default_port(&self) -> u16 {
        match self {
            EngineKind::Postgres => 5432,
            EngineKind::Mysql => 3306,
            EngineKind::Redshift => 5439,
        }
    }

    /// Maintenance database to connect to before the target database exists.
    ///
    /// MySQL accepts connections with no database selected, so it returns
    /// the empty string.
    pub fn admin_database(&self) -> &'static str {
        match self {
            EngineKind::Postgres => "postgres",
            EngineKind::Mysql => "",
            EngineKind::Redshift => "dev",
        }
    }

    /// Quote an identifier for this engine.
    ///
    /// All supported engines accept double-quoted identifiers (MySQL under
    /// ANSI_QUOTES, which the executor enables per session). Embedded quote
    /// characters are escaped by doubling, never by wrapping twice.
    pub fn quote_ident(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

impl FromStr for EngineKind {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "postgresql" => Ok(EngineKind::Postgres),
            "mysql" => Ok(EngineKind::Mysql),
            "redshift" => Ok(EngineKind::Redshift),
            other => Err(ProvisionError::UnsupportedEngine(other.to_string())),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url_scheme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_engines() {
        assert_eq!("postgresql".parse::<EngineKind>().unwrap(), EngineKind::Postgres);
        assert_eq!("mysql".parse::<EngineKind>().unwrap(), EngineKind::Mysql);
        assert_eq!("redshift".parse::<EngineKind>().unwrap(), EngineKind::Redshift);
    }

    #[test]
    fn test_parse_unknown_engine_fails() {
        let err = "oracle".parse::<EngineKind>().unwrap_err();
        assert!(matches!(err, ProvisionError::UnsupportedEngine(ref s) if s == "oracle"));
    }

    #[test]
    fn test_url_schemes() {
        assert_eq!(EngineKind::Postgres.url_scheme(), "postgresql");
        assert_eq!(EngineKind::Mysql.url_scheme(), "mysql");
        assert_eq!(EngineKind::Redshift.url_scheme(), "redshift");
    }

    #[test]
    fn test_quote_ident() {
        let dialect = EngineKind::Postgres;
        assert_eq!(dialect.quote_ident("name"), "\"name\"");
        assert_eq!(dialect.quote_ident("col\"name"), "\"col\"\"name\"");
        // Already-quoted content is escaped, not wrapped twice
        assert_eq!(dialect.quote_ident("\"id\""), "\"\"\"id\"\"\"");
    }

    #[test]
    fn test_admin_databases() {
        assert_eq!(EngineKind::Postgres.admin_database(), "postgres");
        assert_eq!(EngineKind::Mysql.admin_database(), "");
        assert_eq!(EngineKind::Redshift.admin_database(), "dev");
    }

    #[test]
    fn test_serde_tags() {
        let kind: EngineKind = serde_yaml::from_str("postgresql").unwrap();
        assert_eq!(kind, EngineKind::Postgres);
        assert!(serde_yaml::from_str::<EngineKind>("oracle").is_err());
    }
}
