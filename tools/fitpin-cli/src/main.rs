//! FitPin CLI - browse products, try clothes on and manage fit comments.
//!
//! Commands:
//! - `fitpin product` - Show an item, its size table and the recommended size
//! - `fitpin cart` - Add a selection to the cart
//! - `fitpin order` - Build the purchase line for checkout
//! - `fitpin tryon` - Generate a virtual try-on image
//! - `fitpin comments` - Read and write fit comments
//! - `fitpin account` - Sign in, sign out, delete the account
//! - `fitpin config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{AccountArgs, CartArgs, CommentsArgs, ConfigArgs, OrderArgs, ProductArgs, TryOnArgs};
use config::{LogFormat, LoggingConfig};

/// FitPin CLI - shop and try on clothes from the terminal
#[derive(Parser)]
#[command(name = "fitpin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Product details and size selection
    Product(ProductArgs),

    /// Shopping cart
    Cart(CartArgs),

    /// Checkout drafts
    Order(OrderArgs),

    /// Virtual try-on
    Tryon(TryOnArgs),

    /// Fit comments and fit storage
    Comments(CommentsArgs),

    /// Sign-in state and account actions
    Account(AccountArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_logging(logging: &LoggingConfig, verbose: bool) {
    use tracing::Level;

    let log_level = if verbose {
        Level::DEBUG
    } else {
        logging.level.parse::<Level>().unwrap_or(Level::WARN)
    };

    match logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .compact()
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .pretty()
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(log_level)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config, then logging, before any request goes out
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;
    init_logging(&ctx.config.logging, cli.verbose);

    // Execute command
    let result = match cli.command {
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Order(args) => commands::order::run(args, &ctx).await,
        Commands::Tryon(args) => commands::tryon::run(args, &ctx).await,
        Commands::Comments(args) => commands::comments::run(args, &ctx).await,
        Commands::Account(args) => commands::account::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
