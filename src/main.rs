mod cli;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Commands, ConfigAction};
use servicetitan_auth::{load_env_vars, ApiEnvironment, ConnectionConfig, TokenClient};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");

        if std::env::var("ST_AUTH_DEBUG").is_ok() {
            for cause in err.chain().skip(1) {
                eprintln!("Caused by: {cause}");
            }
        }

        std::process::exit(1);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    match &cli.command {
        Commands::Completions { shell } => {
            cli::print_completions(*shell);
        }
        Commands::Urls { environment } => {
            cli::format_urls(ApiEnvironment::from_selector(environment), &cli.format);
        }
        _ => {
            let env = load_env_vars(cli.env_file.as_deref())
                .context("Failed to load environment variables")?;
            let conn = cli
                .connect_options()
                .resolve(&env)
                .context("Failed to resolve connection config")?;
            handle_command(&cli, &conn).await?;
        }
    }

    Ok(())
}

async fn handle_command(cli: &cli::Cli, conn: &ConnectionConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::format_connection(conn, &cli.format),
        },

        Commands::Token => {
            let client = token_client(cli.timeout)?;
            let issued_at = Utc::now();
            let token = client
                .request_token(conn.auth_root(), conn.client_id(), conn.client_secret())
                .await
                .context("Failed to fetch auth token")?;
            cli::format_token(&token, issued_at, &cli.format);
        }

        Commands::Headers => {
            let client = token_client(cli.timeout)?;
            let headers = client
                .auth_headers(conn)
                .await
                .context("Failed to build auth headers")?;
            cli::format_headers(&headers, &cli.format);
        }

        Commands::Urls { .. } | Commands::Completions { .. } => unreachable!(),
    }

    Ok(())
}

fn token_client(timeout: Option<u64>) -> anyhow::Result<TokenClient> {
    let client = match timeout {
        Some(secs) => TokenClient::with_timeout(Duration::from_secs(secs))?,
        None => TokenClient::new()?,
    };
    Ok(client)
}
