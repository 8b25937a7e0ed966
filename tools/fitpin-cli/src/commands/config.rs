//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Set { key, value } => set_config(&key, &value, ctx).await,
        ConfigCommand::Init { force } => init_config(force, ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let api = &ctx.config.api;
    ctx.output.info("[api]");
    ctx.output.kv("data_url", &api.data_url);
    ctx.output.kv("ar_url", api.ar_url.as_deref().unwrap_or("(unset)"));
    if let Some(timeout) = api.timeout_ms {
        ctx.output.kv("timeout_ms", &timeout.to_string());
    }
    if let Some(retries) = api.max_retries {
        ctx.output.kv("max_retries", &retries.to_string());
    }

    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &format!("{:?}", ctx.config.logging.format).to_lowercase());

    let session = &ctx.config.session;
    ctx.output.info("[session]");
    match &session.email {
        Some(email) if session.is_signed_in() => ctx.output.kv("email", email.as_str()),
        _ => ctx.output.kv("email", "(signed out)"),
    }
    if let Some(name) = &session.name {
        ctx.output.kv("name", name);
    }
    if let Some(height) = session.height {
        ctx.output.kv("height", &format!("{} cm", height));
    }

    Ok(())
}

async fn set_config(key: &str, value: &str, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    config.set(key, value)?;
    let path = ctx.save(&config)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value, "file": path }));
    } else {
        ctx.output.success(&format!("Set {} = {}", key, value));
        ctx.output.debug(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

async fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created: {}", config_path.display()));
    ctx.output
        .info("Sign in with `fitpin account login --email <email>`");

    Ok(())
}
