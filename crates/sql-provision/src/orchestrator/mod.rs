//! Provisioning orchestrator - drives the executor over a synthesized plan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ConnectionProfile, SchemaDefinition};
use crate::ddl;
use crate::dialect::EngineKind;
use crate::error::{ProvisionError, Result, Stage};
use crate::executor::EngineHandle;

/// One synthesized statement, tagged with its stage.
#[derive(Debug, Clone)]
pub struct PlannedStatement {
    pub stage: Stage,
    pub sql: String,
}

/// The ordered statement list for one provisioning run.
///
/// `create_database` runs against the admin database; everything in
/// `post_retarget` runs after the handle has been pointed at the new
/// database.
#[derive(Debug, Clone)]
pub struct ProvisionPlan {
    /// Database the handle retargets to after creation.
    pub database: String,
    pub create_database: PlannedStatement,
    pub post_retarget: Vec<PlannedStatement>,
}

impl ProvisionPlan {
    /// All statements in execution order.
    pub fn statements(&self) -> impl Iterator<Item = &PlannedStatement> {
        std::iter::once(&self.create_database).chain(self.post_retarget.iter())
    }
}

/// Result of a provisioning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionReport {
    /// Unique run identifier.
    pub run_id: String,

    /// Engine that was provisioned.
    pub engine: EngineKind,

    /// Database that was created.
    pub database: String,

    /// Whether a named schema was created.
    pub schema_created: bool,

    /// Tables created, in order.
    pub tables_created: Vec<String>,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// When the run completed.
    pub completed_at: DateTime<Utc>,

    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl ProvisionReport {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Connectivity probe result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub connected: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Provisioning orchestrator: public entry point of the engine.
///
/// Stateless between calls; it owns no handle outside an in-flight
/// [`provision`](Provisioner::provision).
pub struct Provisioner {
    profile: ConnectionProfile,
}

impl Provisioner {
    /// Create an orchestrator for one connection profile.
    pub fn new(profile: ConnectionProfile) -> Self {
        Self { profile }
    }

    /// Synthesize the ordered statement list without touching the network.
    ///
    /// Input errors (empty tables) surface here, before any connection is
    /// opened. This is also what `--dry-run` prints.
    pub fn plan(&self, schema: &SchemaDefinition) -> Result<ProvisionPlan> {
        let dialect = self.profile.engine;
        let schema_name = schema.effective_schema();

        let create_database = PlannedStatement {
            stage: Stage::CreateDatabase,
            sql: ddl::create_database_statement(&self.profile.database),
        };

        let mut post_retarget = Vec::with_capacity(schema.tables.len() + 1);

        if let Some(name) = schema_name {
            post_retarget.push(PlannedStatement {
                stage: Stage::CreateSchema,
                sql: ddl::create_schema_statement(name),
            });
        }

        for table in &schema.tables {
            post_retarget.push(PlannedStatement {
                stage: Stage::CreateTable(table.table_name.clone()),
                sql: ddl::create_table_statement(dialect, schema_name, table)?,
            });
        }

        Ok(ProvisionPlan {
            database: self.profile.database.clone(),
            create_database,
            post_retarget,
        })
    }

    /// Provision database, schema and tables, in that order.
    ///
    /// Stops at the first failing statement; earlier objects are left in
    /// place (at-least-attempted, not all-or-nothing). The handle is
    /// released on every exit path. No retries anywhere: DDL is not
    /// idempotent (schema creation excepted) and a blind retry would mask
    /// the real failure behind a duplicate-object error.
    pub async fn provision(&self, schema: &SchemaDefinition) -> Result<ProvisionReport> {
        let plan = self.plan(schema)?;

        let started_at = Utc::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(
            "Starting provisioning run {}: {} statements against {}:{}/{}",
            run_id,
            plan.post_retarget.len() + 1,
            self.profile.host,
            self.profile.port(),
            plan.database
        );

        let mut handle = EngineHandle::open_admin(&self.profile).await?;
        let outcome = Self::apply(&mut handle, &plan).await;
        handle.close().await;
        outcome?;

        let completed_at = Utc::now();
        let duration = (completed_at - started_at).num_milliseconds() as f64 / 1000.0;

        let report = ProvisionReport {
            run_id,
            engine: self.profile.engine,
            database: plan.database.clone(),
            schema_created: schema.effective_schema().is_some(),
            tables_created: schema
                .tables
                .iter()
                .map(|t| t.table_name.clone())
                .collect(),
            started_at,
            completed_at,
            duration_seconds: duration,
        };

        info!(
            "Provisioned database '{}' ({} tables) in {:.2}s",
            report.database,
            report.tables_created.len(),
            report.duration_seconds
        );

        Ok(report)
    }

    /// Open a connection against the admin database and probe it.
    pub async fn health_check(&self) -> Result<HealthReport> {
        let start = std::time::Instant::now();

        let mut handle = match EngineHandle::open_admin(&self.profile).await {
            Ok(handle) => handle,
            Err(e) => {
                return Ok(HealthReport {
                    connected: false,
                    latency_ms: start.elapsed().as_millis() as u64,
                    error: Some(e.to_string()),
                })
            }
        };

        let probe = handle.execute("SELECT 1").await;
        let latency_ms = start.elapsed().as_millis() as u64;
        handle.close().await;

        Ok(match probe {
            Ok(()) => HealthReport {
                connected: true,
                latency_ms,
                error: None,
            },
            Err(e) => HealthReport {
                connected: false,
                latency_ms,
                error: Some(e.to_string()),
            },
        })
    }

    async fn apply(handle: &mut EngineHandle, plan: &ProvisionPlan) -> Result<()> {
        handle
            .execute(&plan.create_database.sql)
            .await
            .map_err(|e| ProvisionError::ddl(plan.create_database.stage.clone(), e.to_string()))?;
        info!("Created database '{}'", plan.database);

        handle.retarget(&plan.database).await?;

        for stmt in &plan.post_retarget {
            handle
                .execute(&stmt.sql)
                .await
                .map_err(|e| ProvisionError::ddl(stmt.stage.clone(), e.to_string()))?;
            info!("Completed stage '{}'", stmt.stage);
        }

        Ok(())
    }
}
