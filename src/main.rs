use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prioboard::seed::{seed, SeedFixture};
use prioboard::{api, db};

#[derive(Parser)]
#[command(name = "prioboard")]
#[command(about = "Feature prioritization and task board for small product teams")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the prioboard server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// Populate an empty board from a fixture file (or the built-in demo data)
    Seed {
        /// Path to a JSON fixture; defaults to the demo dataset
        #[arg(short, long)]
        fixture: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "prioboard=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16) -> anyhow::Result<()> {
    let db = db::Database::open_default()?;
    db.migrate()?;

    // Mirror the product's cold-start behavior: an empty board gets the
    // demo dataset, an already-populated one is left alone.
    let outcome = seed(&db, &SeedFixture::demo())?;
    tracing::info!("Seed check: {}", outcome.message);

    let app = api::create_router(db);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("prioboard server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { port }) => {
            serve(port).await?;
        }
        Some(Commands::Seed { fixture }) => {
            let db = db::Database::open_default()?;
            db.migrate()?;

            let fixture = match fixture {
                Some(path) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
                None => SeedFixture::demo(),
            };

            let outcome = seed(&db, &fixture)?;
            match (outcome.features_count, outcome.tasks_count) {
                (Some(features), Some(tasks)) => {
                    println!("{} ({} features, {} tasks)", outcome.message, features, tasks);
                }
                _ => println!("{}", outcome.message),
            }
        }
        None => {
            serve(3000).await?;
        }
    }

    Ok(())
}
