use anyhow::Result;
use clap::Parser;
use counsel_daemon::config::DaemonConfig;
use counsel_daemon::server;
use counsel_http::DemoState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Counsel daemon - in-memory demo backend for the chat client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long = "config")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("counsel=debug,tower_http=debug")),
        )
        .init();

    // Load configuration if specified
    let settings = match cli.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            DaemonConfig::from_file(&path)?
        }
        None => DaemonConfig::from_env()?,
    };

    let app = server::build_app(&settings, DemoState::seeded());

    let listener = tokio::net::TcpListener::bind(settings.http.bind_addr).await?;
    println!("Server running at: http://{}/", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
        })
        .await?;

    Ok(())
}
