use clap::Parser;
use stock_harvest_cli::pipeline;
use stock_harvest_core::ConfigLoader;

#[derive(Parser)]
#[command(name = "stock-harvest")]
#[command(about = "Fetches price history and options chains for a symbol universe", long_about = None)]
struct Cli {
    /// Symbols to process; with none given, the exchange listing is used
    symbols: Vec<String>,

    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    config: String,

    /// Override the concurrent-symbol limit
    #[arg(long)]
    max_concurrent: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ConfigLoader::load(&cli.config)?;
    if let Some(limit) = cli.max_concurrent {
        config.runtime.max_concurrent_symbols = limit;
    }

    pipeline::run(config, cli.symbols).await?;

    Ok(())
}
