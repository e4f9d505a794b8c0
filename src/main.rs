use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timetable_client::api::router;
use timetable_client::config::SchedulerConfig;
use timetable_client::scheduler::{HttpSchedulerClient, SchedulerClient};
use timetable_client::session::SessionContext;
use timetable_client::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "timetable_client=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SchedulerConfig::new_from_env()?;
    let scheduler = Arc::new(HttpSchedulerClient::new(&config)?);

    let session = match (&config.token, &config.username, &config.password) {
        (Some(token), _, _) => SessionContext::with_token(token.clone()),
        (None, Some(username), Some(password)) => scheduler.login(username, password).await?,
        _ => {
            warn!("no scheduler credential configured, requests will be rejected");
            SessionContext::anonymous()
        }
    };

    let state = AppState {
        scheduler,
        session: Arc::new(session),
    };

    let app = router(state);

    info!("scheduler at {}", config.base_url);
    info!("listening on http://{}", config.listen_addr);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
