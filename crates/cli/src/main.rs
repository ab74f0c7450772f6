use clap::Parser;
use std::net::SocketAddr;

#[derive(Parser)]
#[command(name = "movieinfo")]
#[command(about = "Movie metadata and one-line review server", long_about = None)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "MOVIEINFO_PORT")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1", env = "MOVIEINFO_HOST")]
    host: String,

    /// Database file path
    #[arg(short, long, default_value = "movieinfo.db", env = "MOVIEINFO_DATABASE")]
    database: String,

    /// Maximum number of database connections
    #[arg(long, default_value = "5")]
    max_connections: u32,

    /// KMDb open API service key
    #[arg(long, env = "KMDB_SERVICE_KEY", hide_env_values = true)]
    kmdb_key: String,

    /// Alternative KMDb host
    #[arg(long, env = "KMDB_BASE_URL")]
    kmdb_base_url: Option<String>,

    /// Timeout for KMDb requests, in seconds
    #[arg(long, default_value = "10")]
    provider_timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    server::banner::print_banner(env!("CARGO_PKG_VERSION"));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let database_url = format!("sqlite:{}?mode=rwc", cli.database);

    let mut config = server::Config::new(database_url, cli.kmdb_key);
    config.max_connections = cli.max_connections;
    config.kmdb_base_url = cli.kmdb_base_url;
    config.provider_timeout_secs = cli.provider_timeout;

    server::run_server(addr, config).await
}
