//! Build command implementation.

use anyhow::{Context, Result};
use inkwell_core::{Config, Site, SiteBuilder};
use std::fs;
use std::path::Path;

/// Build the site and write every page plus `index.json`
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    tracing::info!("Building site: {}", config.site.title);
    let site = SiteBuilder::new(config.clone())
        .build()
        .context("Failed to build site")?;

    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

    for post in &site.posts {
        write_page(
            &output_dir.join(post.output_rel_path()),
            &post.content_html,
            post.toc_html.as_deref(),
        )?;
    }
    for note in &site.notes {
        write_page(
            &output_dir.join(note.output_rel_path()),
            &note.content_html,
            note.toc_html.as_deref(),
        )?;
    }

    write_manifest(&config, &site)?;

    tracing::info!("✓ Built {} posts and {} notes", site.posts.len(), site.notes.len());
    tracing::info!("✓ Output written to {:?}", output_dir);
    Ok(())
}

/// Write one HTML fragment, table of contents first
fn write_page(path: &Path, html: &str, toc: Option<&str>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {:?}", parent))?;
    }

    let page = match toc {
        Some(toc) => format!("{}\n{}", toc, html),
        None => html.to_string(),
    };
    fs::write(path, page).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Wrote {:?}", path);
    Ok(())
}

fn write_manifest(config: &Config, site: &Site) -> Result<()> {
    let manifest = site.manifest(&config.normalized_base_url());
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize index")?;
    let path = config.output_dir().join("index.json");
    fs::write(&path, json).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
