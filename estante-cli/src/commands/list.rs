//! List command implementation

use super::load_page;
use crate::console::ConsoleNotifier;
use anyhow::Result;
use estante_core::grid::GridView;
use estante_core::{ContentFilter, EstanteConfig};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
struct ListOutput {
    filter: ContentFilter,
    total: usize,
    grid: GridView,
}

/// List contents matching `filter`, newest first
pub async fn list(config: &EstanteConfig, filter: ContentFilter, json: bool) -> Result<()> {
    let mut page = load_page(config, Arc::new(ConsoleNotifier::new())).await?;
    page.set_filter(filter);

    let grid = page.grid();

    if json {
        let output = ListOutput {
            filter,
            total: grid.cards().len(),
            grid,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &grid {
            GridView::Cards { cards } => {
                println!("{} ({})", filter.label(), cards.len());
                println!();
                for card in cards {
                    println!("  {:<10} {:<8} {}", card.id, card.badge, card.title);
                    println!("  {:<10} {:<8} {}", "", "", card.download_filename);
                }
            }
            GridView::Empty { title, hint } => {
                println!("{}", title);
                println!("{}", hint);
            }
            GridView::Skeleton { .. } => {}
        }
    }

    if let Some(error) = page.error() {
        anyhow::bail!("Failed to load contents: {}", error);
    }

    Ok(())
}
