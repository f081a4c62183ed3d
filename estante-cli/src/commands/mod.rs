//! CLI command implementations

mod download;
mod list;
mod read;
mod stats;

pub use download::download;
pub use list::list;
pub use read::read;
pub use stats::stats;

use anyhow::{Context, Result};
use estante_core::notify::Notifier;
use estante_core::page::LibraryPage;
use estante_core::query::ContentsQuery;
use estante_core::{ContentItem, EstanteConfig};
use std::sync::Arc;

/// Fetch the content list once and hand it to a fresh page model
async fn load_page(config: &EstanteConfig, notifier: Arc<dyn Notifier>) -> Result<LibraryPage> {
    let provider = config
        .build_provider()
        .context("Failed to set up content provider")?;
    let query = ContentsQuery::with_stale_time(provider, config.stale_time);

    let mut page = LibraryPage::new(notifier);
    page.apply_query(query.fetch().await);
    tracing::debug!("Loaded {} contents", page.contents().len());
    Ok(page)
}

/// Look up a content item, failing if the list did not load
fn find_item<'a>(page: &'a LibraryPage, id: &str) -> Result<&'a ContentItem> {
    if let Some(error) = page.error() {
        anyhow::bail!("Failed to load contents: {}", error);
    }
    page.find(id)
        .with_context(|| format!("No content with id '{}'", id))
}
