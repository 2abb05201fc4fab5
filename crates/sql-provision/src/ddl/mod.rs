//! DDL synthesis: pure statement builders over the schema description.
//!
//! Column names are quoted through the dialect; table and schema names are
//! emitted unquoted. That matches the contract with the upstream caller,
//! which validates object names before handing them to this engine. Quoting
//! them here would change semantics for names that expect case folding.

use crate::config::{ColumnDefinition, TableDefinition};
use crate::dialect::EngineKind;
use crate::error::{ProvisionError, Result};
use crate::typemap::normalize_type;

/// Emit one column clause: quoted name plus normalized type.
///
/// `properties` is not emitted yet; when constraint emission lands it is
/// appended after the type, so already-emitted tokens keep their order.
pub fn column_clause(dialect: EngineKind, col: &ColumnDefinition) -> String {
    format!(
        "{} {}",
        dialect.quote_ident(&col.column_name),
        normalize_type(&col.data_type)
    )
}

/// Comma-join the column clauses of a table, in input order.
pub fn table_clause(dialect: EngineKind, table: &TableDefinition) -> Result<String> {
    if table.columns.is_empty() {
        return Err(ProvisionError::EmptyTable(table.table_name.clone()));
    }

    Ok(table
        .columns
        .iter()
        .map(|col| column_clause(dialect, col))
        .collect::<Vec<_>>()
        .join(", "))
}

/// Build a CREATE TABLE statement, schema-qualified when a schema is given.
pub fn create_table_statement(
    dialect: EngineKind,
    schema: Option<&str>,
    table: &TableDefinition,
) -> Result<String> {
    let columns = table_clause(dialect, table)?;

    Ok(match schema {
        Some(schema) => format!(
            "CREATE TABLE {}.{} ({})",
            schema, table.table_name, columns
        ),
        None => format!("CREATE TABLE {} ({})", table.table_name, columns),
    })
}

/// Build a CREATE SCHEMA statement. Idempotent by construction.
pub fn create_schema_statement(schema: &str) -> String {
    format!("CREATE SCHEMA IF NOT EXISTS {}", schema)
}

/// Build a CREATE DATABASE statement.
///
/// Deliberately not IF NOT EXISTS: re-running against an existing database
/// must surface as a typed failure, not be silently swallowed.
pub fn create_database_statement(database: &str) -> String {
    format!("CREATE DATABASE {}", database)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnDefinition;

    fn col(name: &str, data_type: &str) -> ColumnDefinition {
        ColumnDefinition {
            column_name: name.to_string(),
            data_type: data_type.to_string(),
            properties: None,
        }
    }

    fn orders() -> TableDefinition {
        TableDefinition {
            table_name: "orders".to_string(),
            columns: vec![col("id", "INT"), col("amount", "NUMERIC (10, 2)")],
        }
    }

    #[test]
    fn test_column_clause() {
        assert_eq!(
            column_clause(EngineKind::Postgres, &col("id", "INT")),
            "\"id\" INT"
        );
        assert_eq!(
            column_clause(EngineKind::Postgres, &col("amount", "NUMERIC (10, 2)")),
            "\"amount\" NUMERIC(10, 2)"
        );
    }

    #[test]
    fn test_table_clause_preserves_order() {
        let clause = table_clause(EngineKind::Postgres, &orders()).unwrap();
        assert_eq!(clause, "\"id\" INT, \"amount\" NUMERIC(10, 2)");
        assert_eq!(clause.split(", \"").count(), orders().columns.len());
    }

    #[test]
    fn test_table_clause_empty_table_fails() {
        let table = TableDefinition {
            table_name: "empty".to_string(),
            columns: vec![],
        };
        let err = table_clause(EngineKind::Postgres, &table).unwrap_err();
        assert!(matches!(err, ProvisionError::EmptyTable(ref t) if t == "empty"));
    }

    #[test]
    fn test_create_table_without_schema() {
        let table = TableDefinition {
            table_name: "t".to_string(),
            columns: vec![col("id", "INT")],
        };
        assert_eq!(
            create_table_statement(EngineKind::Postgres, None, &table).unwrap(),
            "CREATE TABLE t (\"id\" INT)"
        );
    }

    #[test]
    fn test_create_table_with_schema() {
        let table = TableDefinition {
            table_name: "t".to_string(),
            columns: vec![col("id", "INT")],
        };
        assert_eq!(
            create_table_statement(EngineKind::Postgres, Some("s"), &table).unwrap(),
            "CREATE TABLE s.t (\"id\" INT)"
        );
    }

    #[test]
    fn test_create_schema_statement() {
        assert_eq!(
            create_schema_statement("analytics"),
            "CREATE SCHEMA IF NOT EXISTS analytics"
        );
    }

    #[test]
    fn test_create_database_statement() {
        assert_eq!(create_database_statement("newdb"), "CREATE DATABASE newdb");
    }
}
