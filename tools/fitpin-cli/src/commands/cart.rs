//! Add a product to the cart.

use anyhow::{bail, Result};
use fitpin_commerce::prelude::*;

use super::{CartArgs, CartCommand, SelectionArgs};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Add(selection) => add(selection, ctx).await,
    }
}

async fn add(args: SelectionArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let session = &ctx.config.session;
    let page = super::product::load_selection(&api, &args, ctx).await?;

    // Build first so validation errors surface before the spinner.
    let request = page.cart_request(session)?;
    ctx.output.debug(&format!(
        "cart: item={} size={} qty={} tailoring={}",
        request.item_key,
        request.size,
        request.quantity.get(),
        request.tailoring
    ));

    let spinner = ctx.output.spinner("Adding to cart...");
    let outcome = api.add_to_cart(&request).await;
    spinner.finish_and_clear();

    match outcome? {
        CartOutcome::Added => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({ "added": true, "request": request }));
            } else {
                ctx.output.success(CART_CONFIRMATION);
            }
            Ok(())
        }
        CartOutcome::Rejected(message) => bail!("Cart rejected: {}", message),
    }
}
