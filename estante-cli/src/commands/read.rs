//! Interactive viewer command

use super::{find_item, load_page};
use crate::console::{ConsoleNotifier, TerminalPlatform};
use anyhow::{Context, Result};
use estante_core::viewer::{
    parse_page_input, Key, PdfViewer, ViewerEvent, ViewerHandle, ViewerRuntime, ViewerSnapshot,
    ViewerStatus,
};
use estante_core::EstanteConfig;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
  n, →      next page
  p, ←      previous page
  <number>  go to page
  f         toggle fullscreen
  x         view externally
  o         open in new tab
  d         download
  e         report that the embedded view failed
  q, esc    close";

/// One line of user input
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Event(ViewerEvent),
    Page(String),
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    let line = line.trim();
    let event = match line {
        "" => return None,
        "n" | "→" => ViewerEvent::Key(Key::ArrowRight),
        "p" | "←" => ViewerEvent::Key(Key::ArrowLeft),
        "q" | "esc" => ViewerEvent::Key(Key::Escape),
        "f" => ViewerEvent::ToggleFullscreen,
        "x" => ViewerEvent::ViewExternally,
        "o" => ViewerEvent::OpenInNewContext,
        "d" => ViewerEvent::Download,
        "e" => ViewerEvent::EmbedLoadFailed,
        "?" | "h" | "help" => return Some(Input::Help),
        other if other.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+') => {
            return Some(Input::Page(other.to_string()))
        }
        _ => return Some(Input::Help),
    };
    Some(Input::Event(event))
}

/// One status line for the current viewer state
fn render(snapshot: &ViewerSnapshot) -> String {
    let fullscreen = if snapshot.is_fullscreen {
        " [tela cheia]"
    } else {
        ""
    };
    match snapshot.status {
        ViewerStatus::Closed => "Visualizador fechado".to_string(),
        ViewerStatus::Transitioning => format!(
            "{} - Página {} ...{}",
            snapshot.title, snapshot.current_page, fullscreen
        ),
        ViewerStatus::EmbeddedViewing => format!(
            "{} - Página {}{}\n  {}",
            snapshot.title,
            snapshot.current_page,
            fullscreen,
            snapshot.embed_url.as_deref().unwrap_or_default()
        ),
        ViewerStatus::ExternalViewing => format!(
            "{} - visualização externa{}\n  {}\n  (o: abrir em nova aba, d: baixar)",
            snapshot.title, fullscreen, snapshot.file_url
        ),
    }
}

/// Open the viewer on content `id` and drive it from stdin
pub async fn read(config: &EstanteConfig, id: &str, launch: bool) -> Result<()> {
    let notifier = Arc::new(ConsoleNotifier::new());
    let mut page = load_page(config, notifier.clone()).await?;
    find_item(&page, id)?;
    let modal = page
        .read(id)
        .with_context(|| format!("No content with id '{}'", id))?;

    let (handle, mut events) = ViewerHandle::channel();
    // The viewer's download opens the file in the browser, so no saves here
    let platform = Arc::new(TerminalPlatform::new().with_viewer(handle.clone()));
    let mut runtime = ViewerRuntime::new(PdfViewer::new(), handle, platform, notifier);
    runtime.dispatch(ViewerEvent::from(&modal));

    println!("{}", HELP);
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = String::new();
    let mut input_open = true;

    loop {
        let snapshot = runtime.snapshot();
        let line = render(&snapshot);
        if line != last {
            println!("{}", line);
            if launch && !snapshot.is_transitioning {
                if let Some(url) = &snapshot.embed_url {
                    if let Err(e) = open::that(url) {
                        tracing::warn!("Could not launch {}: {}", url, e);
                    }
                }
            }
            last = line;
        }

        if !runtime.viewer().is_open() {
            break;
        }

        if !input_open {
            runtime.dispatch(ViewerEvent::Close);
            if runtime.take_close_request() {
                page.close_modal();
            }
            continue;
        }

        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read input")? {
                    Some(line) => match parse_input(&line) {
                        Some(Input::Event(event)) => runtime.dispatch(event),
                        Some(Input::Page(value)) => match parse_page_input(&value) {
                            Ok(number) => runtime.dispatch(ViewerEvent::GoToPage(number.into())),
                            Err(e) => tracing::debug!("Ignoring page input: {}", e),
                        },
                        Some(Input::Help) => println!("{}", HELP),
                        None => {}
                    },
                    None => {
                        // End of input: let a running page turn finish, then close
                        runtime.settle(&mut events).await;
                        input_open = false;
                    }
                }
            }
            Some(event) = events.recv() => runtime.dispatch(event),
        }

        if runtime.take_close_request() {
            page.close_modal();
        }
    }

    Ok(())
}
