use std::time::Duration;

use sqlx::{Pool, Postgres};

use crate::application::ports::store_health::StoreHealth;

pub type PgPool = Pool<Postgres>;

/// Builds the pool without connecting so the server can start while the database is down.
pub fn connect_lazy(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub async fn ping(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Store reachability fixed by the probe run at startup.
#[derive(Debug, Clone, Copy)]
pub struct StartupProbe {
    reachable: bool,
}

impl StartupProbe {
    pub async fn run(pool: &PgPool) -> Self {
        match ping(pool).await {
            Ok(()) => Self { reachable: true },
            Err(error) => {
                tracing::error!(error = ?error, "database_unreachable");
                Self { reachable: false }
            }
        }
    }

    pub fn fixed(reachable: bool) -> Self {
        Self { reachable }
    }
}

impl StoreHealth for StartupProbe {
    fn is_reachable(&self) -> bool {
        self.reachable
    }
}

pub mod repositories;
