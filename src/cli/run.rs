// src/cli/run.rs — Default command: analyze one photo

use anyhow::Context;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use super::{progress, render, Cli};
use crate::core::brands::BrandCatalog;
use crate::core::session::{Session, SessionState};
use crate::core::types::SourceImage;
use crate::core::workflow::Workflow;
use crate::infra::config::Config;
use crate::provider::google::GeminiClient;

/// Run one upload cycle for `image_path` and print the outcome.
///
/// Returns the final state so the caller can pick an exit status.
pub async fn run_analyze(
    cli: &Cli,
    config: &Config,
    image_path: &Path,
) -> anyhow::Result<SessionState> {
    let api_key = config.api_key()?;
    let client = Arc::new(GeminiClient::from_config(config, api_key)?);

    let mut workflow = Workflow::new(client.clone(), client);
    if !cli.quiet {
        workflow = workflow.with_observer(progress::terminal_progress());
    }

    let image = SourceImage::load(image_path)
        .await
        .with_context(|| format!("Failed to read image {}", image_path.display()))?;

    let mut session = Session::new();
    let state = workflow.upload(&mut session, image).await?;

    let saved = if state == SessionState::Result && !cli.no_save {
        let written = match download_target(cli.output.as_deref(), config.output.dir.as_deref()) {
            DownloadTarget::Path(target) => workflow.download(&session, target).await,
            DownloadTarget::Dir(dir) => workflow.download_into(&session, dir).await,
        };
        written.map(Some)
    } else {
        Ok(None)
    };
    let saved_path: Option<&Path> = saved.as_ref().ok().and_then(|p| p.as_deref());

    // The report goes out even if saving failed.
    if cli.json {
        let report = render::json_report(&session, saved_path);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let catalog = BrandCatalog::with_extra(config.brands.extra.iter().cloned());
        let styled = std::io::stdout().is_terminal();
        print!("{}", render::render_report(&session, &catalog, styled));
        if let Some(path) = saved_path {
            println!("\nSaved lookbook page to {}", path.display());
        }
    }
    saved.context("Failed to save lookbook image")?;

    Ok(state)
}

#[derive(Debug, PartialEq, Eq)]
enum DownloadTarget<'a> {
    /// `--output`: a file, or a directory if it is one or ends with a separator.
    Path(&'a Path),
    /// Always a directory, created on demand.
    Dir(&'a Path),
}

/// `--output`, else `[output] dir`, else the current directory.
fn download_target<'a>(
    output: Option<&'a Path>,
    config_dir: Option<&'a Path>,
) -> DownloadTarget<'a> {
    match (output, config_dir) {
        (Some(path), _) => DownloadTarget::Path(path),
        (None, Some(dir)) => DownloadTarget::Dir(dir),
        (None, None) => DownloadTarget::Dir(Path::new(".")),
    }
}

/// Print the active brand catalog in match-priority order.
pub fn run_brands(config: &Config) {
    let catalog = BrandCatalog::with_extra(config.brands.extra.iter().cloned());
    for name in catalog.names() {
        println!("{}", name);
    }
}
