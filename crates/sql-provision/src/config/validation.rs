//! Configuration validation.

use super::ProvisionConfig;
use crate::error::{ProvisionError, Result};

/// Validate the configuration.
pub fn validate(config: &ProvisionConfig) -> Result<()> {
    let conn = &config.connection;

    if conn.host.is_empty() {
        return Err(ProvisionError::Config("connection.host is required".into()));
    }
    if conn.user.is_empty() {
        return Err(ProvisionError::Config("connection.user is required".into()));
    }
    if conn.database.is_empty() {
        return Err(ProvisionError::Config(
            "connection.database is required".into(),
        ));
    }
    if let Some(0) = conn.port {
        return Err(ProvisionError::Config(
            "connection.port must be nonzero".into(),
        ));
    }

    for table in &config.schema.tables {
        if table.table_name.is_empty() {
            return Err(ProvisionError::Config(
                "schema.tables[].table_name is required".into(),
            ));
        }
        if table.columns.is_empty() {
            return Err(ProvisionError::EmptyTable(table.table_name.clone()));
        }
        for column in &table.columns {
            if column.column_name.is_empty() {
                return Err(ProvisionError::Config(format!(
                    "table '{}' has a column with an empty name",
                    table.table_name
                )));
            }
        }
    }

    Ok(())
}
