//! Live engine connections: open, execute, retarget, close.
//!
//! An [`EngineHandle`] owns exactly one driver connection at a time. The
//! `&mut` receivers on [`execute`](EngineHandle::execute) and
//! [`retarget`](EngineHandle::retarget) make a handle single-caller by
//! construction; independent provisioning calls construct independent
//! handles.

use std::fmt;

use mysql_async::prelude::Queryable;
use tokio::task::JoinHandle;
use tokio_postgres::{Config as PgConfig, NoTls};
use tracing::{debug, info, warn};

use crate::config::ConnectionProfile;
use crate::dialect::EngineKind;
use crate::error::{ProvisionError, Result};

/// Driver-level failure from a single statement.
///
/// Carries the engine's message verbatim; the orchestrator wraps it with the
/// stage that was executing.
#[derive(Debug)]
pub struct StatementError(String);

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StatementError {}

/// A live connection to one logical database.
pub struct EngineHandle {
    profile: ConnectionProfile,
    database: String,
    backend: Option<Backend>,
}

enum Backend {
    Postgres {
        client: tokio_postgres::Client,
        driver: JoinHandle<()>,
    },
    Mysql {
        conn: mysql_async::Conn,
    },
}

impl EngineHandle {
    /// Open a handle against the profile's configured database.
    pub async fn open(profile: &ConnectionProfile) -> Result<Self> {
        Self::open_to(profile, &profile.database).await
    }

    /// Open a handle against the engine's maintenance database, for
    /// statements that must run before the target database exists.
    pub async fn open_admin(profile: &ConnectionProfile) -> Result<Self> {
        Self::open_to(profile, profile.engine.admin_database()).await
    }

    async fn open_to(profile: &ConnectionProfile, database: &str) -> Result<Self> {
        let backend = Backend::connect(profile, database).await?;
        info!(
            "Connected to {}: {}:{}/{}",
            profile.engine,
            profile.host,
            profile.port(),
            database
        );

        Ok(Self {
            profile: profile.clone(),
            database: database.to_string(),
            backend: Some(backend),
        })
    }

    /// Engine family of this handle.
    pub fn engine(&self) -> EngineKind {
        self.profile.engine
    }

    /// Logical database this handle currently targets.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Run a single statement in its own auto-committed scope.
    ///
    /// There is no multi-statement batching; each call is one transaction.
    pub async fn execute(&mut self, sql: &str) -> std::result::Result<(), StatementError> {
        debug!("Executing: {}", sql);

        let backend = self
            .backend
            .as_mut()
            .ok_or_else(|| StatementError("handle is closed".to_string()))?;

        match backend {
            Backend::Postgres { client, .. } => client
                .batch_execute(sql)
                .await
                .map_err(|e| StatementError(e.to_string())),
            Backend::Mysql { conn } => conn
                .query_drop(sql)
                .await
                .map_err(|e| StatementError(e.to_string())),
        }
    }

    /// Point this handle at a different logical database, reusing the
    /// profile's credentials/host/port.
    ///
    /// The old connection is released before the new one is observable; on
    /// reconnect failure the handle is left closed, never half-swapped.
    pub async fn retarget(&mut self, database: &str) -> Result<()> {
        if let Some(backend) = self.backend.take() {
            backend.close().await;
        }

        self.backend = Some(Backend::connect(&self.profile, database).await?);
        self.database = database.to_string();
        debug!("Retargeted handle to database '{}'", database);
        Ok(())
    }

    /// Release the connection.
    pub async fn close(mut self) {
        if let Some(backend) = self.backend.take() {
            backend.close().await;
        }
    }
}

impl Backend {
    async fn connect(profile: &ConnectionProfile, database: &str) -> Result<Self> {
        match profile.engine {
            EngineKind::Postgres | EngineKind::Redshift => {
                Self::connect_postgres(profile, database).await
            }
            EngineKind::Mysql => Self::connect_mysql(profile, database).await,
        }
    }

    async fn connect_postgres(profile: &ConnectionProfile, database: &str) -> Result<Self> {
        let mut config = PgConfig::new();
        config.host(&profile.host);
        config.port(profile.port());
        config.user(&profile.user);
        config.password(&profile.password);
        config.dbname(database);

        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| ProvisionError::Connection(e.to_string()))?;

        // The connection future drives the socket; it resolves once the
        // client is dropped.
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!("postgres connection terminated: {}", e);
            }
        });

        Ok(Backend::Postgres { client, driver })
    }

    async fn connect_mysql(profile: &ConnectionProfile, database: &str) -> Result<Self> {
        let mut opts = mysql_async::OptsBuilder::default()
            .ip_or_hostname(profile.host.clone())
            .tcp_port(profile.port())
            .user(Some(profile.user.clone()))
            .pass(Some(profile.password.clone()));

        if !database.is_empty() {
            opts = opts.db_name(Some(database.to_string()));
        }

        let mut conn = mysql_async::Conn::new(opts)
            .await
            .map_err(|e| ProvisionError::Connection(e.to_string()))?;

        // Double-quoted identifiers require ANSI_QUOTES on MySQL.
        conn.query_drop("SET SESSION sql_mode = CONCAT(@@sql_mode, ',ANSI_QUOTES')")
            .await
            .map_err(|e| ProvisionError::Connection(e.to_string()))?;

        Ok(Backend::Mysql { conn })
    }

    async fn close(self) {
        match self {
            Backend::Postgres { client, driver } => {
                drop(client);
                let _ = driver.await;
            }
            Backend::Mysql { conn } => {
                if let Err(e) = conn.disconnect().await {
                    warn!("error closing mysql connection: {}", e);
                }
            }
        }
    }
}
