//! Download command implementation

use super::{find_item, load_page};
use crate::console::{ConsoleNotifier, PendingSave, TerminalPlatform};
use anyhow::{Context, Result};
use estante_core::notify::{Notifier, Toast};
use estante_core::EstanteConfig;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// Save a content file into `output`
pub async fn download(config: &EstanteConfig, id: &str, output: &Path) -> Result<()> {
    let notifier = Arc::new(ConsoleNotifier::new());
    let page = load_page(config, notifier.clone()).await?;
    let item = find_item(&page, id)?;

    let platform = TerminalPlatform::saving_to(output);
    if !page.download(item, &platform) {
        anyhow::bail!("Could not start download of '{}'", item.title);
    }

    for save in platform.take_saves() {
        if let Err(e) = transfer(&save).await {
            notifier.notify(Toast::download_failed());
            return Err(e);
        }
        println!("Saved {}", save.path.display());
    }

    Ok(())
}

/// Copy one pending save to disk; `file://` URLs are copied locally
async fn transfer(save: &PendingSave) -> Result<u64> {
    if let Some(source) = save.url.strip_prefix("file://") {
        return tokio::fs::copy(source, &save.path)
            .await
            .with_context(|| format!("Failed to copy {}", source));
    }

    let mut response = reqwest::get(&save.url)
        .await
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("Failed to fetch {}", save.url))?;

    let pb = match response.content_length() {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {bytes}/{total_bytes} {msg}")
                    .unwrap()
                    .progress_chars("##-"),
            );
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    if let Some(name) = save.path.file_name() {
        pb.set_message(name.to_string_lossy().into_owned());
    }

    let mut file = tokio::fs::File::create(&save.path)
        .await
        .with_context(|| format!("Failed to create {}", save.path.display()))?;

    let mut written = 0u64;
    while let Some(chunk) = response
        .chunk()
        .await
        .with_context(|| format!("Failed to read {}", save.url))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
        pb.set_position(written);
    }
    file.flush().await?;

    pb.finish_and_clear();
    Ok(written)
}
