//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod comments;
pub mod config;
pub mod order;
pub mod product;
pub mod tryon;

use anyhow::{bail, Context as _, Result};
use clap::{Args, Subcommand};
use fitpin_client::ProductPage;
use fitpin_commerce::prelude::*;

/// Which item, which size, and what tailoring.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Item key.
    pub item: i64,

    /// Size label (e.g. M, XL). Defaults to the recommended size.
    #[arg(short, long)]
    pub size: Option<String>,

    /// Request tailoring. Locks the size to the recommendation.
    #[arg(short, long)]
    pub tailor: bool,

    /// Tailoring adjustment as FIELD or FIELD=STEPS (e.g. chest=2, front-rise).
    #[arg(short, long = "adjust", value_name = "FIELD[=STEPS]")]
    pub adjustments: Vec<String>,

    /// Quantity.
    #[arg(short, long, default_value_t = 1)]
    pub qty: u32,
}

impl SelectionArgs {
    /// Replay the selection onto a loaded page.
    pub fn apply(&self, page: &mut ProductPage) -> Result<()> {
        if let Some(size) = &self.size {
            page.select_size(size)?;
        }
        if self.tailor {
            page.set_tailoring(true);
        } else if !self.adjustments.is_empty() {
            bail!("--adjust requires --tailor");
        }

        let kind = page
            .catalog()
            .map(SizeCatalog::kind)
            .context("product has no size table")?;
        for adjustment in &self.adjustments {
            let (field, steps) = parse_adjustment(kind, adjustment)?;
            page.add_steps(field, steps)?;
        }

        page.set_quantity(Quantity::new(self.qty));
        Ok(())
    }
}

/// Parse `FIELD` or `FIELD=STEPS`.
pub fn parse_adjustment(kind: SizeKind, arg: &str) -> Result<(TailoringField, u32)> {
    let (name, steps) = match arg.split_once('=') {
        Some((name, steps)) => (
            name,
            steps
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid step count in '{}'", arg))?,
        ),
        None => (arg, 1),
    };
    let field = TailoringField::parse(kind, name.trim()).with_context(|| {
        let names: Vec<&str> = match kind {
            SizeKind::Top => TopField::ALL.iter().map(TopField::as_str).collect(),
            SizeKind::Bottom => BottomField::ALL.iter().map(BottomField::as_str).collect(),
        };
        format!(
            "Unknown {} field '{}' (expected one of: {})",
            kind.as_str(),
            name,
            names.join(", ")
        )
    })?;
    Ok((field, steps))
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    #[command(subcommand)]
    pub command: ProductCommand,
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Show item details, the size table and the recommended size.
    Show {
        /// Item key.
        item: i64,
    },
    /// Preview a size selection with tailoring.
    Select(SelectionArgs),
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Add an item to the cart.
    Add(SelectionArgs),
}

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    #[command(subcommand)]
    pub command: OrderCommand,
}

#[derive(Subcommand)]
pub enum OrderCommand {
    /// Build the purchase line handed to checkout.
    Draft(SelectionArgs),
}

/// Arguments for the tryon command.
#[derive(Args)]
pub struct TryOnArgs {
    /// Item key.
    pub item: i64,

    /// Where to write the generated image.
    #[arg(short, long, default_value = "tryon.png")]
    pub output: String,
}

/// Arguments for the comments command.
#[derive(Args)]
pub struct CommentsArgs {
    #[command(subcommand)]
    pub command: CommentsCommand,
}

#[derive(Subcommand)]
pub enum CommentsCommand {
    /// List your fit comments.
    List,
    /// List your fit-storage images, newest first.
    Images,
    /// Write a fit comment.
    Write(WriteArgs),
}

/// Arguments for `comments write`.
#[derive(Args, Debug, Clone)]
pub struct WriteArgs {
    /// Image file path or fit-storage image URL.
    #[arg(short, long)]
    pub image: Option<String>,

    /// Product name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Brand.
    #[arg(short, long, default_value = "")]
    pub brand: String,

    /// Garment type (e.g. 상의, 반팔).
    #[arg(long)]
    pub category: Option<String>,

    /// Size worn.
    #[arg(short, long)]
    pub size: Option<String>,

    /// How it fit: small, fit or large.
    #[arg(short, long)]
    pub fit: Option<String>,

    /// Comment text.
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Arguments for the account command.
#[derive(Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub command: AccountCommand,
}

#[derive(Subcommand)]
pub enum AccountCommand {
    /// Remember who you are.
    Login {
        /// Account email.
        #[arg(short, long)]
        email: String,
        /// Display name.
        #[arg(short, long)]
        name: Option<String>,
        /// Height in centimeters. Fetched from the body profile when omitted.
        #[arg(long)]
        height: Option<f64>,
    },
    /// Forget the signed-in user.
    Logout,
    /// Delete the account.
    Withdraw {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the session and body profile.
    Show,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
