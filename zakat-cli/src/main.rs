//! # Zakat CLI
//!
//! Terminal front end for the zakat-rechner engine.
//!
//! ## Usage
//! ```bash
//! # Guided entry of all asset categories (default)
//! zakat-cli
//!
//! # Non-interactive, from a file with overrides
//! zakat-cli calculate --file assets.toml --set cash=1500 --explain
//!
//! # Fixed prices, no network
//! zakat-cli --offline --gold-price 60 --silver-price 0.8 calculate --set gold24=100
//!
//! # Run system diagnostics
//! zakat-cli doctor
//! ```

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::env;
use std::io;
use std::path::PathBuf;
use tracing::info;

use zakat_rechner::category::AssetCategory;
use zakat_rechner::prelude::*;

mod config_loader;
mod input;
mod prices;
mod render;
mod wizard;

use config_loader::CliConfig;

/// Exit code when no result can be shown because price data is missing.
const EXIT_AWAITING_PRICES: i32 = 2;

/// Interactive Zakat Calculator CLI
#[derive(Parser, Debug)]
#[command(name = "zakat-cli")]
#[command(version)]
#[command(about = "Zakat calculator with live gold and silver pricing", long_about = None)]
struct Args {
    /// Enable file logging to logs/ directory
    #[arg(long, global = true, default_value = "false")]
    log: bool,

    /// Do not fetch live prices
    #[arg(long, global = true, default_value = "false")]
    offline: bool,

    /// Gold price per gram (overrides config file and live feed)
    #[arg(long, global = true)]
    gold_price: Option<Decimal>,

    /// Silver price per gram (overrides config file and live feed)
    #[arg(long, global = true)]
    silver_price: Option<Decimal>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate Zakat from a file and/or key=value pairs
    Calculate {
        /// Declaration file (.json or .toml) keyed by category
        #[arg(long)]
        file: Option<PathBuf>,

        /// Set one category, e.g. --set gold24=50 (repeatable)
        #[arg(long = "set", value_parser = input::parse_assignment)]
        assignments: Vec<(AssetCategory, String)>,

        /// Print the step-by-step calculation
        #[arg(long, default_value = "false")]
        explain: bool,

        /// Output the result as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },
    /// Guided entry of every asset category
    Wizard,
    /// List the asset categories and their units
    Categories,
    /// Write a sample config file
    InitConfig,
    /// Run diagnostics to check system health and connectivity
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_config = CliConfig::load();

    let enable_log = args.log || cli_config.enable_logging.unwrap_or(false);
    let _file_guard = init_tracing(enable_log)?;

    match args.command {
        Some(Commands::Categories) => {
            println!("{}", render::categories_table());
            Ok(())
        }
        Some(Commands::InitConfig) => {
            let path = CliConfig::create_sample()?;
            println!("Sample configuration written to {}", path.display());
            Ok(())
        }
        Some(Commands::Doctor) => run_doctor(&cli_config).await,
        Some(Commands::Calculate { ref file, ref assignments, explain, json }) => {
            let base = match file {
                Some(path) => input::load_declaration(path)?,
                None => AssetDeclaration::new(),
            };
            let declaration = input::apply_assignments(base, assignments);
            run_calculation(&args, &cli_config, &declaration, explain, json).await
        }
        Some(Commands::Wizard) | None => {
            let declaration = wizard::run_wizard_mode()?;
            run_calculation(&args, &cli_config, &declaration, false, false).await
        }
    }
}

/// Installs the tracing subscriber; keeps the file writer alive via the guard.
fn init_tracing(
    enable_log: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("zakat_rechner=info,zakat_cli=info"))?;
    let console_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    if !enable_log {
        tracing_subscriber::registry().with(env_filter).with(console_layer).init();
        return Ok(None);
    }

    std::fs::create_dir_all("logs")?;
    let file_appender = tracing_appender::rolling::daily("logs", "zakat.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    info!("--- Zakat Calculation Session Started [{}] ---", chrono::Utc::now());
    Ok(Some(guard))
}

async fn run_calculation(
    args: &Args,
    cli_config: &CliConfig,
    declaration: &AssetDeclaration,
    explain: bool,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let configured = prices::merge_static(args.gold_price, args.silver_price, cli_config.prices());
    let offline = args.offline || cli_config.offline.unwrap_or(false);
    let config = prices::resolve(configured, offline).await;

    let outcome = declaration.calculate_zakat(&config);
    let verdict = Verdict::from_outcome(&outcome)?;
    let currency = cli_config.currency_symbol();

    if json {
        let body = match &outcome {
            Ok(result) => serde_json::json!({ "verdict": verdict, "result": result }),
            Err(_) => serde_json::json!({ "verdict": verdict }),
        };
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        match &outcome {
            Ok(result) => render::print_result(result, currency, explain),
            Err(_) => println!("{}", render::verdict_line(&verdict, currency)),
        }
    }

    if verdict == Verdict::AwaitingPrices {
        std::process::exit(EXIT_AWAITING_PRICES);
    }
    Ok(())
}

/// Run doctor diagnostics
async fn run_doctor(cli_config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nZakat CLI Doctor - Diagnostics Tool");
    println!("═══════════════════════════════════════════════\n");

    // 1. Environment Info
    println!("1. System Information:");
    println!("   OS: {}", std::env::consts::OS);
    println!("   Arch: {}", std::env::consts::ARCH);
    println!("   CLI Version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "   NO_COLOR: {}",
        if env::var("NO_COLOR").is_ok() { "Set (True)" } else { "Unset" }
    );

    // 2. Configuration
    println!("\n2. Configuration:");
    match CliConfig::config_path() {
        Some(path) if path.exists() => println!("   Config File: {}", path.display()),
        Some(path) => println!("   Config File: not found (run `zakat-cli init-config` to create {})", path.display()),
        None => println!("   Config File: no config directory on this platform"),
    }
    let configured = cli_config.prices();
    println!(
        "   Configured Prices: {}",
        if configured.has_prices() { "gold and silver" } else { "incomplete" }
    );

    // 3. Network Connectivity
    println!("\n3. Network & Pricing:");

    #[cfg(feature = "live-pricing")]
    {
        use std::io::Write;
        use zakat_rechner::pricing::{MetalsLivePriceProvider, NetworkConfig};

        let network = NetworkConfig::default();
        println!("   Live Pricing Feature: Enabled");
        print!("   Connecting to {}... ", network.base_url);
        io::stdout().flush()?;

        let provider = MetalsLivePriceProvider::new(network)?;
        match provider.get_prices().await {
            Ok(quote) => {
                println!("OK");
                println!("   Gold: {}/g", zakat_rechner::report::format_amount(quote.gold_per_gram()));
                println!("   Silver: {}/g", zakat_rechner::report::format_amount(quote.silver_per_gram()));
                if let Ok(nisab) = nisab_threshold(quote.gold_per_gram()) {
                    println!("   Nisab: {}", zakat_rechner::report::format_amount(nisab));
                }
            }
            Err(e) => {
                println!("FAILED");
                println!("   Error: {}", e);
            }
        }
    }

    #[cfg(not(feature = "live-pricing"))]
    {
        println!("   Live Pricing Feature: Disabled (Compiled without 'live-pricing')");
    }

    // 4. Storage
    println!("\n4. Storage:");
    let current_dir = std::env::current_dir()?;
    println!("   Current Directory: {:?}", current_dir);
    println!(
        "   Write Access: {}",
        if !std::fs::metadata(&current_dir)?.permissions().readonly() { "Yes" } else { "No" }
    );

    println!("\nDiagnostics Complete.\n");
    Ok(())
}
