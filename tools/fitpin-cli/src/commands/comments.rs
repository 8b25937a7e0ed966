//! Fit comment board and comment writer.

use anyhow::{Context as _, Result};
use fitpin_client::screens::fit_storage_urls;
use fitpin_client::{CommentBoard, CommentWriter};
use fitpin_commerce::prelude::*;

use super::{CommentsArgs, CommentsCommand, WriteArgs};
use crate::context::Context;

/// Run the comments command.
pub async fn run(args: CommentsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CommentsCommand::List => list(ctx).await,
        CommentsCommand::Images => images(ctx).await,
        CommentsCommand::Write(write_args) => write(write_args, ctx).await,
    }
}

async fn list(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let board = CommentBoard::load(&api, &ctx.config.session).await?;

    if ctx.output.is_json() {
        let entries: Vec<_> = board
            .entries
            .iter()
            .map(|entry| serde_json::json!({ "comment": entry.comment, "image_url": entry.image_url }))
            .collect();
        ctx.output.json(&entries);
        return Ok(());
    }

    if board.is_empty() {
        ctx.output.info("No comments yet");
        return Ok(());
    }

    ctx.output.header(&format!("My comments ({})", board.len()));
    for entry in &board.entries {
        let comment = &entry.comment;
        let title = match (&comment.brand, &comment.item_name) {
            (Some(brand), Some(name)) if !brand.is_empty() => format!("{} · {}", brand, name),
            (_, Some(name)) => name.clone(),
            _ => format!("#{}", comment.fit_storage_key),
        };
        ctx.output.list_item(&title);
        if let Some(size) = &comment.size {
            ctx.output.kv("size", size);
        }
        if let Some(text) = &comment.comment {
            ctx.output.kv("comment", text);
        }
        ctx.output.kv("image", &entry.image_url);
    }
    Ok(())
}

async fn images(ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let urls = fit_storage_urls(&api, &ctx.config.session).await?;

    if ctx.output.is_json() {
        ctx.output.json(&urls);
    } else if urls.is_empty() {
        ctx.output.info("Fit storage is empty");
    } else {
        ctx.output.header(&format!("Fit storage ({})", urls.len()));
        for url in &urls {
            ctx.output.list_item(url);
        }
    }
    Ok(())
}

async fn write(args: WriteArgs, ctx: &Context) -> Result<()> {
    let api = ctx.api()?;
    let writer = build_writer(&args, ctx)?;

    let spinner = ctx.output.spinner("Posting comment...");
    let saved = writer.submit(&api, &ctx.config.session).await;
    spinner.finish_and_clear();
    let saved = saved.context("Failed to post comment")?;

    if ctx.output.is_json() {
        ctx.output.json(&saved);
    } else {
        ctx.output
            .success(&format!("Comment posted for {} ({})", saved.item_name, saved.image));
    }
    Ok(())
}

/// Fill a comment draft from the command line.
pub fn build_writer(args: &WriteArgs, ctx: &Context) -> Result<CommentWriter> {
    let mut writer = match &args.image {
        Some(image) if is_remote(image) => CommentWriter::with_image(image.clone()),
        Some(image) => {
            let path = ctx.resolve_path(image.strip_prefix("file://").unwrap_or(image));
            CommentWriter::with_image(path.to_string_lossy().into_owned())
        }
        None => CommentWriter::new(),
    };

    let draft = &mut writer.draft;
    if let Some(category) = &args.category {
        draft.category = category.clone();
    }
    draft.size = args.size.clone();
    draft.fit = args
        .fit
        .as_deref()
        .map(|fit| {
            FitOption::parse(fit)
                .with_context(|| format!("Unknown fit '{}' (expected small, fit or large)", fit))
        })
        .transpose()?;
    draft.brand = args.brand.clone();
    draft.item_name = args.name.clone().unwrap_or_default();
    draft.text = args.text.clone().unwrap_or_default();
    Ok(writer)
}

fn is_remote(uri: &str) -> bool {
    uri.starts_with("http://") || uri.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;
    use std::path::PathBuf;

    fn ctx() -> Context {
        Context {
            config: CliConfig::default(),
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/home/fitpin"),
        }
    }

    fn args() -> WriteArgs {
        WriteArgs {
            image: Some("photos/look.jpg".into()),
            name: Some("Oxford Shirt".into()),
            brand: "FitPin".into(),
            category: None,
            size: Some("M".into()),
            fit: Some("small".into()),
            text: Some("Runs a little tight".into()),
        }
    }

    #[test]
    fn test_build_writer_resolves_local_image() {
        let writer = build_writer(&args(), &ctx()).unwrap();
        assert_eq!(writer.draft.image_uri.as_deref(), Some("/home/fitpin/photos/look.jpg"));
        assert_eq!(writer.draft.image_name(), Some("look.jpg"));
        assert_eq!(writer.draft.fit, Some(FitOption::SlightlySmall));
        assert_eq!(writer.draft.category, "상의");
        assert!(writer.draft.validate().is_ok());
    }

    #[test]
    fn test_build_writer_keeps_urls() {
        let mut args = args();
        args.image = Some("http://fitpitback.kro.kr:8080/api/img/imgserve/fitstorageimg/look.jpg".into());
        args.category = Some("반팔".into());
        let writer = build_writer(&args, &ctx()).unwrap();
        assert_eq!(writer.draft.image_uri, args.image);
        assert_eq!(writer.draft.category, "반팔");
    }

    #[test]
    fn test_build_writer_rejects_unknown_fit() {
        let mut args = args();
        args.fit = Some("roomy".into());
        assert!(build_writer(&args, &ctx()).is_err());
    }

    #[test]
    fn test_missing_text_fails_validation() {
        let mut args = args();
        args.text = None;
        let writer = build_writer(&args, &ctx()).unwrap();
        assert_eq!(writer.draft.validate(), Err(ValidationError::CommentMissing));
    }
}
