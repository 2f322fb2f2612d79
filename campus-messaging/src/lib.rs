use std::sync::Arc;

use diesel::pg::PgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use metrics_exporter_prometheus::PrometheusHandle;
use mockable::Clock;

pub mod config;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
#[cfg(test)]
mod test_support;

use services::{MessageService, UserService};
use store::Store;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub struct AppState<S> {
    pub store: Arc<S>,
    pub messages: MessageService<S>,
    pub users: UserService<S>,
    pub metrics: Option<PrometheusHandle>,
}

impl<S: Store> AppState<S> {
    pub fn new(
        store: Arc<S>,
        clock: Arc<dyn Clock + Send + Sync>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            messages: MessageService::new(store.clone(), clock),
            users: UserService::new(store.clone()),
            store,
            metrics,
        }
    }
}

/// Apply pending embedded migrations, returning how many ran.
pub fn run_migrations(conn: &mut PgConnection) -> anyhow::Result<usize> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("failed to run migrations: {e}"))?;
    Ok(applied.len())
}
