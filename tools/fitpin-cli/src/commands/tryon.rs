//! Virtual try-on.

use anyhow::{Context as _, Result};
use fitpin_client::TryOnPreview;
use fitpin_commerce::ItemKey;

use super::TryOnArgs;
use crate::context::Context;
use crate::output::format_bytes;

/// Run the tryon command.
pub async fn run(args: TryOnArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let session = &ctx.config.session;
    let page = super::product::load_page(&api, args.item, ctx).await?;

    if api.config().ar_url.is_none() {
        ctx.output
            .warn("api.ar_url is not set; run `fitpin config set api.ar_url <url>`");
    }

    let spinner = ctx.output.spinner("Generating try-on image...");
    let preview = page.try_on(&api, session).await;
    spinner.finish_and_clear();

    match preview? {
        TryOnPreview::Generated(bytes) => {
            let path = ctx.resolve_path(&args.output);
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;

            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "item": ItemKey::new(args.item),
                    "generated": true,
                    "path": path,
                    "bytes": bytes.len(),
                }));
            } else {
                ctx.output.success(&format!(
                    "Saved try-on image to {} ({})",
                    path.display(),
                    format_bytes(bytes.len() as u64)
                ));
            }
        }
        TryOnPreview::ProductImage(url) => {
            if ctx.output.is_json() {
                ctx.output.json(&serde_json::json!({
                    "item": ItemKey::new(args.item),
                    "generated": false,
                    "image_url": url,
                }));
            } else {
                ctx.output
                    .warn("Try-on generation failed, showing the product image instead");
                ctx.output.kv("image", &url);
            }
        }
    }
    Ok(())
}
