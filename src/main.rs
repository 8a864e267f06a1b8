use std::error::Error;
use std::process;
use std::sync::Arc;

use rusty_ledger::{
    api, logging, spawn_notification_worker, AccountsStore, Config, Engine, LoggingNotifier,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run_app().await {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

async fn run_app() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::from_env()?;
    logging::init(&config);

    let (notifier, _worker) =
        spawn_notification_worker(Arc::new(LoggingNotifier), config.notification_buffer);
    let engine = Arc::new(Engine::new(
        Arc::new(AccountsStore::new()),
        Arc::new(notifier),
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, api::router(engine)).await?;
    Ok(())
}
