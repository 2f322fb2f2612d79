use std::sync::Arc;

use diesel::pg::PgConnection;
use mockable::DefaultClock;

use campus_messaging::config::AppConfig;
use campus_messaging::store::PgStore;
use campus_messaging::{routes, run_migrations, AppState};
use campus_shared::clients::db::create_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    campus_shared::middleware::init_tracing("campus-messaging");

    let config = AppConfig::load()?;
    let port = config.port;

    let db = create_pool(&config.database_url, config.db_max_connections)?;
    if config.run_migrations {
        let mut pooled = db.get()?;
        let conn: &mut PgConnection = &mut pooled;
        let count = run_migrations(conn)?;
        tracing::info!(count, "database migrations applied");
    }

    let metrics = if config.metrics_enabled {
        Some(campus_shared::middleware::init_metrics()?)
    } else {
        None
    };

    let state = Arc::new(AppState::new(
        Arc::new(PgStore::new(db)),
        Arc::new(DefaultClock),
        metrics,
    ));

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "campus-messaging starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
