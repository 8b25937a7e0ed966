//! Product page commands.

use anyhow::{Context as _, Result};
use fitpin_client::{FitpinApi, ProductPage};
use fitpin_commerce::prelude::*;
use serde::Serialize;

use super::{ProductArgs, ProductCommand, SelectionArgs};
use crate::context::Context;
use crate::output::{format_cm, size_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ProductCommand::Show { item } => show(item, ctx).await,
        ProductCommand::Select(selection) => select(selection, ctx).await,
    }
}

/// Load a product page behind a spinner.
pub async fn load_page(api: &FitpinApi, item: i64, ctx: &Context) -> Result<ProductPage> {
    let spinner = ctx.output.spinner(&format!("Loading item {}...", item));
    let page = ProductPage::load(api, &ctx.config.session, ItemKey::new(item)).await;
    spinner.finish_and_clear();
    page.with_context(|| format!("Failed to load item {}", item))
}

/// Load a page and replay a selection onto it.
pub async fn load_selection(
    api: &FitpinApi,
    args: &SelectionArgs,
    ctx: &Context,
) -> Result<ProductPage> {
    let mut page = load_page(api, args.item, ctx).await?;
    args.apply(&mut page)?;
    if page.is_tailoring() && page.recommended().is_none() {
        ctx.output
            .warn("No body profile: tailoring keeps the current size instead of a recommendation");
    }
    Ok(page)
}

#[derive(Serialize)]
struct ProductView<'a> {
    item: &'a ItemInfo,
    sizes: Option<&'a SizeCatalog>,
    recommended: Option<&'a str>,
    selected: Option<&'a str>,
}

async fn show(item: i64, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let page = load_page(&api, item, ctx).await?;
    let info = page.item().context("no product loaded")?;

    if ctx.output.is_json() {
        ctx.output.json(&ProductView {
            item: info,
            sizes: page.catalog(),
            recommended: page.recommended(),
            selected: page.selected(),
        });
        return Ok(());
    }

    ctx.output.header(&format!("{} · {}", info.brand, info.name));
    ctx.output.kv("category", info.category.as_str());
    ctx.output.kv("price", &info.price.display());
    if !info.tailoring_price.is_zero() {
        ctx.output.kv("tailoring", &format!("+{}", info.tailoring_price.display()));
    }
    if !info.style.is_empty() {
        ctx.output.kv("style", &info.style);
    }
    if let Some(image) = info.primary_image() {
        ctx.output.kv("image", &api.item_image_url(image)?);
    }
    if !info.content.is_empty() {
        ctx.output.info(&info.content);
    }

    if let Some(catalog) = page.catalog() {
        print_size_table(ctx, catalog, page.recommended(), page.selected());
    }

    match page.recommended() {
        Some(label) => ctx.output.success(&format!("Recommended size: {}", label)),
        None if ctx.config.session.is_signed_in() => {
            ctx.output.warn("No recommendation: body profile unavailable")
        }
        None => ctx
            .output
            .info("Sign in with `fitpin account login` to get a size recommendation"),
    }

    Ok(())
}

fn print_size_table(
    ctx: &Context,
    catalog: &SizeCatalog,
    recommended: Option<&str>,
    selected: Option<&str>,
) {
    let headers = catalog.kind().headers();
    let widths: Vec<usize> = headers.iter().map(|h| h.len().max(6)).collect();
    ctx.output.header("Sizes");
    ctx.output.table_row(headers, &widths);

    for label in catalog.display_labels() {
        let Some(entry) = catalog.lookup(label) else {
            continue;
        };
        let values: Vec<String> = entry
            .measurements()
            .into_iter()
            .map(|(_, value)| format_cm(value))
            .collect();
        let mut cols: Vec<&str> = vec![label];
        cols.extend(values.iter().map(String::as_str));
        ctx.output.table_row(&cols, &widths);
    }

    let marked: Vec<String> = catalog
        .display_labels()
        .into_iter()
        .filter(|label| Some(*label) == recommended || Some(*label) == selected)
        .map(|label| size_badge(label, Some(label) == recommended, Some(label) == selected))
        .collect();
    for line in marked {
        ctx.output.list_item(&line);
    }
}

#[derive(Serialize)]
struct SelectionView<'a> {
    size: SizeEntryRef<'a>,
    recommended: Option<&'a str>,
    tailoring: bool,
    adjustments: Vec<(String, u32)>,
    quantity: u32,
    unit_price: Won,
}

async fn select(args: SelectionArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let page = load_selection(&api, &args, ctx).await?;
    let info = page.item().context("no product loaded")?;
    let entry = page
        .selected_entry()
        .context("No size selected: pass --size or sign in for a recommendation")?;
    let unit_price = info.unit_price(page.is_tailoring())?;
    let adjustments = adjustments(&page, entry.kind());

    if ctx.output.is_json() {
        ctx.output.json(&SelectionView {
            size: entry,
            recommended: page.recommended(),
            tailoring: page.is_tailoring(),
            adjustments,
            quantity: page.quantity().get(),
            unit_price,
        });
        return Ok(());
    }

    ctx.output.header(&format!("{} · size {}", info.name, entry.label()));
    for (name, value) in entry.measurements() {
        ctx.output.kv(name, &format_cm(value));
    }
    if page.is_tailoring() {
        ctx.output.info("Tailoring:");
        for (field, steps) in &adjustments {
            ctx.output.kv(field, &format!("+{}", steps));
        }
    }
    ctx.output.kv("quantity", &page.quantity().get().to_string());
    ctx.output.kv("unit price", &unit_price.display());
    Ok(())
}

/// Non-zero counters of the garment kind, as (field, steps).
pub fn adjustments(page: &ProductPage, kind: SizeKind) -> Vec<(String, u32)> {
    let fields: Vec<TailoringField> = match kind {
        SizeKind::Top => TopField::ALL.into_iter().map(TailoringField::Top).collect(),
        SizeKind::Bottom => BottomField::ALL
            .into_iter()
            .map(TailoringField::Bottom)
            .collect(),
    };
    fields
        .into_iter()
        .map(|field| (field.as_str().to_string(), page.offsets().get(field)))
        .filter(|(_, steps)| *steps > 0)
        .collect()
}
