use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use learnhub::{config, db, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnhub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    // Check for --profile CLI argument
    let args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--profile")
        && let Some(val) = args.get(pos + 1)
    {
        // SAFETY: nothing else reads the environment yet
        unsafe { std::env::set_var("PROFILE", val) };
    }

    let config = config::Config::from_env();
    tracing::info!(profile = %config.profile, "Starting LearnHub");

    // Initialize database
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::start_server(db, &config).await {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
