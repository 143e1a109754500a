//! Advisor chat API server binary.
//!
//! Prints `{"port": N}` to stdout once the listener is bound so a parent
//! process can discover the port.

use std::sync::Arc;

use advisor_api::AppState;
use advisor_api::config::ApiConfig;
use advisor_core::auth::JwtIdentityProvider;
use advisor_core::completion::OpenAiCompletionService;
use advisor_core::store::PgConversationStore;
use clap::Parser;
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "advisor_api_server", about = "Advisor chat API server")]
struct Args {
    /// Port to listen on (0 = ephemeral).
    #[arg(long, default_value_t = 3100)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/advisor"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Completion model used for every advisor reply.
    #[arg(long, env = "COMPLETION_MODEL", default_value = advisor_core::completion::DEFAULT_MODEL)]
    model: String,

    /// Print a bearer token for the given user id and exit.
    #[arg(long, value_name = "USER_ID")]
    issue_token: Option<String>,

    /// Run as a managed sidecar: exit automatically when the parent process dies.
    ///
    /// When set, the server monitors stdin for EOF. The parent keeps the write
    /// end of the pipe open; if the parent exits the OS closes the pipe and the
    /// server shuts down.
    #[arg(long, default_value_t = false)]
    sidecar: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Write logs to stderr so stdout is reserved for the JSON port message.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().or_else(|_| {
                tracing_subscriber::EnvFilter::try_new("info,advisor_api=debug,advisor_core=debug")
            })?,
        )
        .init();

    let args = Args::parse();

    let config = ApiConfig {
        bind_addr: format!("127.0.0.1:{}", args.port),
        pg_connection_url: args.database_url,
        completion_model: args.model,
        ..ApiConfig::from_env()
    };

    if let Some(user_id) = args.issue_token {
        let token = advisor_core::auth::jwt::generate_access_token(
            &user_id,
            config.jwt_secret.as_bytes(),
        )?;
        println!("{token}");
        return Ok(());
    }

    info!(
        database_url = %config.pg_connection_url,
        port = args.port,
        model = %config.completion_model,
        "starting advisor_api_server"
    );

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; chat turns will fail at the completion step");
    }

    info!(max_connections = args.max_connections, "configuring connection pool");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&config.pg_connection_url)
        .await?;

    info!("running database migrations");
    advisor_core::migrate::migrate(&pool).await?;

    let identity = Arc::new(JwtIdentityProvider::new(config.jwt_secret.clone()));
    let store = Arc::new(PgConversationStore::new(pool));
    let completions = Arc::new(OpenAiCompletionService::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
    ));

    let state = AppState::new(config.clone(), identity, store, completions);
    let app = advisor_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;

    println!("{}", serde_json::json!({"port": local_addr.port()}));

    let shutdown = CancellationToken::new();

    if args.sidecar {
        info!("sidecar mode: will exit when parent pipe closes");
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            use tokio::io::AsyncReadExt;
            let mut stdin = tokio::io::stdin();
            let mut buf = [0u8; 1];
            // Blocks until the parent dies and the OS closes the pipe → EOF.
            let _ = stdin.read(&mut buf).await;
            info!("parent pipe closed, shutting down");
            shutdown.cancel();
        });
    }

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, shutting down");
                shutdown.cancel();
            }
        }
    });

    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}
