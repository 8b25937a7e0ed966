//! Sign-in state and account actions.

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use fitpin_client::screens::{logout, withdraw};
use fitpin_client::SessionContext;
use fitpin_commerce::UserEmail;

use super::{AccountArgs, AccountCommand};
use crate::context::Context;
use crate::output::format_cm;

/// Run the account command.
pub async fn run(args: AccountArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AccountCommand::Login {
            email,
            name,
            height,
        } => login(email, name, height, ctx).await,
        AccountCommand::Logout => sign_out(ctx).await,
        AccountCommand::Withdraw { yes } => delete_account(yes, ctx).await,
        AccountCommand::Show => show(ctx).await,
    }
}

async fn login(
    email: String,
    name: Option<String>,
    height: Option<f64>,
    ctx: &Context,
) -> Result<()> {
    let email = UserEmail::new(email.trim());
    let mut session = SessionContext::signed_in(email.clone());
    session.name = name;

    session.height = match height {
        Some(height) => Some(height),
        None => {
            let api = ctx.api()?;
            let spinner = ctx.output.spinner("Fetching body profile...");
            let profile = api.fetch_body_profile(&email).await.into_option();
            spinner.finish_and_clear();
            profile.map(|body| body.height).filter(|h| *h > 0.0)
        }
    };
    // Rejects a blank email or a non-positive height given on the command line.
    session.require_email()?;
    if height.is_some() {
        session.require_height()?;
    }

    let mut config = ctx.config.clone();
    config.session = session;
    let path = ctx.save(&config)?;

    if ctx.output.is_json() {
        ctx.output.json(&config.session);
        return Ok(());
    }
    ctx.output.success(&format!("Signed in as {}", email));
    match config.session.height {
        Some(height) => ctx.output.kv("height", &format!("{} cm", format_cm(height))),
        None => ctx
            .output
            .warn("No height on file; try-on needs `--height`"),
    }
    ctx.output.debug(&format!("Session saved to {}", path.display()));
    Ok(())
}

async fn sign_out(ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    logout(&mut config.session);
    ctx.save(&config)?;
    ctx.output.success("Signed out");
    Ok(())
}

async fn delete_account(yes: bool, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.clone();
    let email = config.session.require_email()?.clone();

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the account {}? This cannot be undone", email))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            ctx.output.info("Cancelled");
            return Ok(());
        }
    }

    let api = ctx.api()?;
    withdraw(&api, &mut config.session)
        .await
        .with_context(|| format!("Failed to delete account {}", email))?;
    ctx.save(&config)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "deleted": email }));
    } else {
        ctx.output.success(&format!("Account {} deleted", email));
    }
    Ok(())
}

async fn show(ctx: &Context) -> Result<()> {
    let session = &ctx.config.session;
    let email = session.require_email()?;

    let api = ctx.api()?;
    let spinner = ctx.output.spinner("Fetching body profile...");
    let profile = api.fetch_body_profile(email).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "session": session,
            "body": profile.into_option(),
        }));
        return Ok(());
    }

    ctx.output.header("Account");
    ctx.output.kv("email", email.as_str());
    if let Some(name) = &session.name {
        ctx.output.kv("name", name);
    }
    if let Some(height) = session.height {
        ctx.output.kv("height", &format!("{} cm", format_cm(height)));
    }

    match profile.into_result() {
        Ok(Some(body)) => {
            ctx.output.header("Body profile");
            for (name, value) in body.measurements() {
                ctx.output.kv(name, &format_cm(value));
            }
        }
        Ok(None) => ctx.output.info("No body profile registered"),
        Err(e) => ctx.output.warn(&format!("Body profile unavailable: {}", e)),
    }
    Ok(())
}
