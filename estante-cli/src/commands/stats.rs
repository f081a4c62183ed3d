//! Stats command implementation

use super::load_page;
use crate::console::ConsoleNotifier;
use anyhow::Result;
use estante_core::EstanteConfig;
use std::sync::Arc;

/// Show collection counts by kind
pub async fn stats(config: &EstanteConfig, json: bool) -> Result<()> {
    let page = load_page(config, Arc::new(ConsoleNotifier::new())).await?;

    if let Some(error) = page.error() {
        anyhow::bail!("Failed to load contents: {}", error);
    }

    let stats = page.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("Ebooks:    {}", stats.ebooks);
        println!("Desenhos:  {}", stats.drawings);
        println!("Total:     {}", stats.total);
    }

    Ok(())
}
