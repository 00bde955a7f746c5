use clap::{Parser, Subcommand};

mod chat;
mod error;
mod serve;

use chat::run_chat;
use serve::{run_gateway, run_stock, run_weather};

#[derive(Parser, Debug)]
#[command(name = "toolgate", version)]
#[command(about = "toolgate - JSON-RPC tool gateway and model tool-use driver")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the JSON-RPC gateway (POST /mcp)
    Gateway {
        /// Listen port (overrides MCP_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve the weather service (POST /get_weather)
    Weather {
        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Listen port (overrides WEATHER_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Serve the mock stock service (GET /stock/{symbol})
    Stock {
        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Listen port (overrides STOCK_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Ask questions interactively; the model may call gateway tools
    Chat {
        /// Run a single query and exit
        #[arg(long)]
        query: Option<String>,
    },
}

fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stderr keeps chat output on stdout clean.
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let result = match cli.command {
        Commands::Gateway { port } => run_gateway(port).await,
        Commands::Weather { host, port } => run_weather(&host, port).await,
        Commands::Stock { host, port } => run_stock(&host, port).await,
        Commands::Chat { query } => run_chat(query).await,
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
