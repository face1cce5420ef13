mod app;
mod config;
mod db;
mod error;
mod meals;
mod session;
mod state;
#[cfg(test)]
mod testing;
mod users;

use crate::{
    config::{AppConfig, LogConfig, LogFormat},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(&config.log);

    let db = db::connect(&config).await?;
    db::migrate(&db).await?;

    let (host, port) = (config.host.clone(), config.port);
    let app = app::build_app(AppState::postgres(config, db));
    app::serve(app, &host, port).await
}

fn init_tracing(log: &LogConfig) {
    let subscriber = tracing_subscriber::fmt().with_env_filter(log.filter.as_str());
    match log.format {
        LogFormat::Json => subscriber.with_target(false).json().init(),
        LogFormat::Text => subscriber.init(),
    }
}
