//! The record store service binary.
//!
//! Requests are served one at a time on a current-thread runtime; every
//! request opens and closes its own database connection.

use contacts::config::DbConfig;
use contacts::routes::AppState;
use contacts::{db, schema, server};
use mimalloc::MiMalloc;
use sqlx::Connection;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = DbConfig::from_env()?;

    let mut conn = db::connect(&config).await?;
    schema::ensure_schema(&mut conn).await?;
    conn.close().await?;
    info!("contacts table ready");

    server::run(AppState { db: config }).await?;
    Ok(())
}
