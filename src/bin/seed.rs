//! Loads the starter exercise catalogue and the demo account.
//!
//! ```bash
//! cargo run --bin seed
//! ```
//!
//! Existing users, exercises, equipment and muscles are replaced.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fitness_tracker::config::Config;
use fitness_tracker::{db, migrations, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fitness_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env();
    tracing::info!("Seeding database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    match seed::seed(&pool).await {
        Ok(summary) => {
            tracing::info!(
                "Seeding completed: {} exercises, {} equipment items, {} muscles",
                summary.exercises,
                summary.equipment,
                summary.muscles
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Seeding failed: {}", e);
            Err(e.into())
        }
    }
}
