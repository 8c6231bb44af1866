use std::{net::SocketAddr, sync::Arc, time::Duration};

use engine::{Engine, EventBus};
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledger={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let Some(server) = settings.server else {
        tracing::warn!("no server settings found, nothing to run");
        return Ok(());
    };

    tracing::info!("Found server settings...");
    let db = parse_database(&server.database).await?;
    let engine = Arc::new(
        Engine::builder()
            .database(db)
            .events(EventBus::default())
            .default_due_day(settings.app.default_due_day)
            .build()
            .await?,
    );
    let handler = engine::spawn_expense_created_handler(engine.clone());

    if let Some(scheduler) = settings.scheduler {
        let engine = engine.clone();
        tasks.spawn(async move {
            tracing::info!(
                "Materializing recurring movements every {}s",
                scheduler.interval_secs
            );
            let mut interval =
                tokio::time::interval(Duration::from_secs(scheduler.interval_secs.max(1)));
            loop {
                interval.tick().await;
                match engine.create_recurrency_movements().await {
                    Ok(created) => tracing::debug!("scheduler created {} movement(s)", created.len()),
                    Err(err) => tracing::error!("scheduled materialization failed: {err}"),
                }
            }
        });
    }

    let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
    let addr: SocketAddr = format!("{}:{}", bind, server.port).parse()?;
    tasks.spawn(server::run(engine, addr));

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }
    handler.abort();

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
