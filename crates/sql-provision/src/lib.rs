//! # sql-provision
//!
//! Schema provisioning and DDL synthesis for PostgreSQL, MySQL and Redshift.
//!
//! Takes a dialect-neutral description of a relational schema (database,
//! optional schema, ordered tables of typed columns), synthesizes the DDL for
//! the target engine, and executes it over a live connection:
//!
//! - **Dialect registry**: closed engine enumeration with URL schemes and
//!   identifier quoting
//! - **DDL synthesis**: pure statement builders, testable without a database
//! - **Single-handle execution**: one exclusively-owned connection per run,
//!   retargeted to the new database after creation
//! - **Typed failures**: every DDL error carries the stage that failed
//!
//! ## Example
//!
//! ```rust,no_run
//! use sql_provision::{ProvisionConfig, Provisioner};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sql_provision::ProvisionError> {
//!     let config = ProvisionConfig::load("provision.yaml")?;
//!     let provisioner = Provisioner::new(config.connection);
//!     let report = provisioner.provision(&config.schema).await?;
//!     println!("Created {} tables", report.tables_created.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod ddl;
pub mod dialect;
pub mod error;
pub mod executor;
pub mod orchestrator;
pub mod typemap;

// Re-exports for convenient access
pub use config::{
    ColumnDefinition, ConnectionProfile, ProvisionConfig, SchemaDefinition, TableDefinition,
};
pub use dialect::EngineKind;
pub use error::{ProvisionError, Result, Stage};
pub use executor::EngineHandle;
pub use orchestrator::{HealthReport, PlannedStatement, ProvisionPlan, ProvisionReport, Provisioner};
