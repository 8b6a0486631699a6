//! Render a single markdown document.

use anyhow::{Context, Result};
use inkwell_core::config::{MarkdownConfig, TocConfig};
use inkwell_core::frontmatter::split_frontmatter;
use inkwell_core::MarkdownProcessor;
use std::io::Read;
use std::path::Path;

/// Render `input` (or stdin for `-`) and print the HTML to stdout
pub fn render_file(input: &Path, callouts: bool) -> Result<()> {
    let source = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?
    };

    let (_, body) = split_frontmatter(&source);
    let processor = MarkdownProcessor::with_options(
        MarkdownConfig {
            callouts,
            ..MarkdownConfig::default()
        },
        TocConfig {
            enable: false,
            ..TocConfig::default()
        },
        "/notes/",
    );

    print!("{}", processor.convert_simple(body));
    Ok(())
}
