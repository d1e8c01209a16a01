use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmc_market::{
    config::Config, output, DexAuxField, DirectorySort, ListingStatus, Market, SortBy,
    SortDirection,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "cmc-market",
    about = "Query CoinMarketCap listings, historical quotes, the token directory and DEX info"
)]
struct Args {
    /// Optional YAML config file; COINMARKETCAP_API_KEY overrides its api_key
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format: "table" (default) or "json"
    #[arg(short, long, default_value = "table")]
    output: String,

    /// Log requests, responses and cache hits
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Latest listings ranked by a sort field
    Listings {
        #[arg(long, default_value = "market_cap")]
        sort: String,
        #[arg(long, default_value = "desc")]
        sort_dir: String,
        #[arg(long, default_value_t = 1)]
        start: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        /// Quote currencies, comma separated
        #[arg(long, value_delimiter = ',')]
        convert: Vec<String>,
    },
    /// Historical quotes for one ticker
    Historical {
        ticker: String,
        /// Epoch seconds
        #[arg(long)]
        start: i64,
        /// Epoch seconds
        #[arg(long)]
        end: i64,
        #[arg(long, default_value = "24h")]
        interval: String,
        /// Up to three quote currencies, comma separated
        #[arg(long, value_delimiter = ',')]
        convert: Vec<String>,
    },
    /// Token directory
    Map {
        #[arg(long, default_value = "active")]
        status: String,
        #[arg(long, default_value_t = 1)]
        start: u32,
        #[arg(long, default_value_t = 100)]
        limit: u32,
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,
        #[arg(long, default_value = "id")]
        sort: String,
    },
    /// DEX details by id
    Dex {
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<i64>,
        /// urls, logo, description, date_launched, notice
        #[arg(long, value_delimiter = ',')]
        aux: Vec<String>,
    },
    /// Global market metrics
    Global {
        #[arg(long, value_delimiter = ',')]
        convert: Vec<String>,
    },
}

fn as_strs(values: &[String]) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let cfg = Config::load(args.config.as_deref()).context("loading configuration")?;
    info!(
        "Using {} (timeout {}s, cache {})",
        cfg.base_url,
        cfg.request_timeout_secs,
        match (cfg.cache_ttl(), cfg.cache_path()) {
            (Some(ttl), Some(path)) => format!("{}s at {}", ttl.as_secs(), path.display()),
            (Some(ttl), None) => format!("{}s in memory", ttl.as_secs()),
            (None, _) => "off".to_string(),
        }
    );
    let market = Market::from_config(&cfg).context("building CoinMarketCap client")?;
    let json = args.output == "json";

    match args.command {
        Command::Listings {
            sort,
            sort_dir,
            start,
            limit,
            convert,
        } => {
            let sort: SortBy = sort.parse()?;
            let sort_dir: SortDirection = sort_dir.parse()?;
            let tokens = market
                .list_latest_tokens(sort, sort_dir, start, limit, &as_strs(&convert))
                .await
                .context("fetching latest listings")?;
            info!("Fetched {} listing(s)", tokens.len());
            if json {
                output::print_json(&tokens)?;
            } else {
                let currency = convert.first().map(String::as_str).unwrap_or("USD");
                output::print_token_table(&tokens, currency);
            }
        }
        Command::Historical {
            ticker,
            start,
            end,
            interval,
            convert,
        } => {
            let states = market
                .historical_quotes(&ticker, start, end, &interval, &as_strs(&convert))
                .await
                .with_context(|| format!("fetching historical quotes for {}", ticker))?;
            info!("Fetched {} snapshot(s) for {}", states.len(), ticker);
            if json {
                output::print_json(&states)?;
            } else {
                let currency = convert.first().map(String::as_str).unwrap_or("USD");
                output::print_history_table(&states, currency);
            }
        }
        Command::Map {
            status,
            start,
            limit,
            symbols,
            sort,
        } => {
            let status: ListingStatus = status.parse()?;
            let sort: DirectorySort = sort.parse()?;
            let infos = market
                .list_token_directory(status, start, limit, &as_strs(&symbols), sort)
                .await
                .context("fetching token directory")?;
            info!("Fetched {} directory entr(ies)", infos.len());
            if json {
                output::print_json(&infos)?;
            } else {
                output::print_directory_table(&infos);
            }
        }
        Command::Dex { ids, aux } => {
            let aux = aux
                .iter()
                .map(|a| a.parse::<DexAuxField>())
                .collect::<cmc_market::Result<Vec<_>>>()?;
            let dexes = market
                .dex_listings_info(&ids, &aux)
                .await
                .context("fetching DEX info")?;
            if json {
                output::print_json(&dexes)?;
            } else {
                output::print_dex_table(&dexes);
            }
        }
        Command::Global { convert } => {
            let stats = market
                .global_stats(&as_strs(&convert))
                .await
                .context("fetching global metrics")?;
            output::print_json(&stats)?;
        }
    }

    Ok(())
}
