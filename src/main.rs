use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use warden::{bot, config::Settings, db};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting warden");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match db::pool::create_pool(&settings.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Could not connect to the database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db::pool::run_migrations(&pool).await {
        error!("Migration failure: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = bot::client::run(settings, pool).await {
        error!("Gateway client stopped with an error: {}", e);
        std::process::exit(1);
    }
}
