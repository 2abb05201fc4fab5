//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use std::path::Path;

use crate::error::Result;

impl ProvisionConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ProvisionConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::EngineKind;

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
connection:
  engine: postgresql
  host: localhost
  user: postgres
  password: secret
  database: newdb
schema:
  schema_name: analytics
  tables:
    - table_name: orders
      columns:
        - column_name: id
          data_type: INT
        - column_name: amount
          data_type: "NUMERIC (10, 2)"
"#;
        let config = ProvisionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.connection.engine, EngineKind::Postgres);
        assert_eq!(config.connection.port(), 5432);
        assert_eq!(config.schema.effective_schema(), Some("analytics"));
        assert_eq!(config.schema.tables[0].columns.len(), 2);
    }

    #[test]
    fn test_unknown_engine_rejected_at_parse() {
        let yaml = r#"
connection:
  engine: oracle
  host: localhost
  user: u
  password: p
  database: d
schema:
  tables: []
"#;
        assert!(ProvisionConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_null_schema_sentinel() {
        let yaml = r#"
connection:
  engine: mysql
  host: localhost
  user: root
  password: p
  database: d
schema:
  schema_name: "null"
  tables:
    - table_name: t
      columns:
        - column_name: id
          data_type: INT
"#;
        let config = ProvisionConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.schema.effective_schema(), None);
        assert_eq!(config.connection.port(), 3306);
    }
}
