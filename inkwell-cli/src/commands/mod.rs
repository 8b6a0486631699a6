//! CLI command implementations.

pub mod build;
pub mod list;
pub mod render;

pub use build::build_site;
pub use list::{list_posts, list_tags};
pub use render::render_file;
