#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use clap::Parser;
use meshstore_http::{init_tracing, serve};
use meshstore_peer::NodeConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meshstore", about = "File-serving mesh node with one-hop peer fallback")]
struct Cli {
    /// YAML settings file (host, port, directory, neighbors, save_file)
    #[arg(long, env = "MESHSTORE_SETTINGS")]
    settings: PathBuf,
    /// Override the listen host from the settings file
    #[arg(long)]
    host: Option<String>,
    /// Override the listen port from the settings file
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match NodeConfig::load(&cli.settings) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    serve(config).await
}
