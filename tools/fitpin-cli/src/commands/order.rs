//! Build the purchase line for checkout.

use anyhow::Result;

use super::{OrderArgs, OrderCommand, SelectionArgs};
use crate::context::Context;

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OrderCommand::Draft(selection) => draft(selection, ctx).await,
    }
}

async fn draft(args: SelectionArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let page = super::product::load_selection(&api, &args, ctx).await?;
    let draft = page.order_draft()?;
    let total = draft.total()?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "lines": draft, "total": total }));
        return Ok(());
    }

    ctx.output.header("Order");
    for line in &draft.lines {
        let mut label = format!("{} · {} × {}", line.item_name, line.size, line.quantity.get());
        if line.tailoring {
            label.push_str(" (tailored)");
        }
        ctx.output.list_item(&label);
        ctx.output.kv("price", &line.price.display());
        if line.tailoring {
            ctx.output.kv("tailoring", &format!("+{}", line.tailoring_price.display()));
        }
    }
    ctx.output.kv("total", &total.display());
    Ok(())
}
