//! Connection acquisition for report runs.

use async_trait::async_trait;

use crate::config::ConnectionConfig;
use crate::db::{DatabaseBackend, DatabaseClient};
use crate::error::{InsightsError, Result};

/// Opens a fresh database connection for every report run.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Backend the opened connections speak, used to render report SQL.
    fn backend(&self) -> DatabaseBackend;

    /// Opens one connection. The caller closes it when done.
    async fn connect(&self) -> Result<Box<dyn DatabaseClient>>;
}

/// Connector backed by a resolved [`ConnectionConfig`].
#[derive(Debug, Clone)]
pub struct ConfigConnector {
    config: ConnectionConfig,
}

impl ConfigConnector {
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for ConfigConnector {
    fn backend(&self) -> DatabaseBackend {
        self.config.backend
    }

    async fn connect(&self) -> Result<Box<dyn DatabaseClient>> {
        crate::db::connect(&self.config).await
    }
}

type ClientFactory = Box<dyn Fn() -> Result<Box<dyn DatabaseClient>> + Send + Sync>;

/// Connector that hands out clients built by a closure, for tests.
pub struct MockConnector {
    backend: DatabaseBackend,
    factory: ClientFactory,
}

impl MockConnector {
    /// Creates a connector that calls `factory` on every connect.
    pub fn new<F>(backend: DatabaseBackend, factory: F) -> Self
    where
        F: Fn() -> Result<Box<dyn DatabaseClient>> + Send + Sync + 'static,
    {
        Self {
            backend,
            factory: Box::new(factory),
        }
    }

    /// Creates a connector whose every connect fails with `message`.
    pub fn unreachable(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(DatabaseBackend::Sqlite, move || {
            Err(InsightsError::query(message.clone()))
        })
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn connect(&self) -> Result<Box<dyn DatabaseClient>> {
        (self.factory)()
    }
}
