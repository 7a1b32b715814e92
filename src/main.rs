use anyhow::Context;
use teamroom::{
    app,
    config::Config,
    store::{Db, FileStore, Store},
    AppState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // an unreadable data file stops startup here instead of on the first request
    let store = FileStore::new(&config.data_file);
    store.ensure_exists().await?;
    let doc = store.load().await?;
    info!(
        path = %store.path().display(),
        users = doc.users.len(),
        messages = doc.messages.len(),
        tasks = doc.tasks.len(),
        "data file loaded"
    );

    let app_state = AppState::new(Db::new(store));
    let app = app(
        app_state,
        time::Duration::minutes(config.session_inactivity_minutes),
    );

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
