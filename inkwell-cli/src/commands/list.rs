//! Listing commands for posts and tags.

use anyhow::{Context, Result};
use inkwell_core::{Config, Site, SiteBuilder};
use std::path::Path;

fn load_site(config_path: &Path) -> Result<(Config, Site)> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    let site = SiteBuilder::new(config.clone())
        .build()
        .context("Failed to build site")?;
    Ok((config, site))
}

/// Print posts newest first
pub fn list_posts(config_path: &Path, limit: Option<usize>, json: bool) -> Result<()> {
    let (config, site) = load_site(config_path)?;
    let mut posts = site.manifest(&config.normalized_base_url()).posts;
    if let Some(limit) = limit {
        posts.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts found");
        return Ok(());
    }
    for post in posts {
        println!("{}  {}  {}", post.pub_date, post.slug, post.title);
    }
    Ok(())
}

/// Print every tag used by a post
pub fn list_tags(config_path: &Path, json: bool) -> Result<()> {
    let (_, site) = load_site(config_path)?;
    let tags = inkwell_core::blog_tags(&site.posts);

    if json {
        println!("{}", serde_json::to_string(&tags)?);
    } else {
        for tag in tags {
            println!("{}", tag);
        }
    }
    Ok(())
}
