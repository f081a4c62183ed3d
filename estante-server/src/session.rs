//! Server-side viewer sessions
//!
//! Each session runs a [`ViewerRuntime`] whose transition timers tick on the
//! server. Platform requests cannot be carried out here, so they are queued
//! as [`ClientCommand`]s and handed to the browser with the next snapshot;
//! the browser reports fullscreen changes back as events.

use estante_core::notify::Notifier;
use estante_core::platform::{Platform, PlatformResult};
use estante_core::viewer::{
    parse_page_input, Key, PdfViewer, ViewerEvent, ViewerHandle, ViewerRuntime, ViewerSnapshot,
};
use estante_core::ContentItem;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Something the browser has to do on the viewer's behalf
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientCommand {
    OpenUrl { url: String },
    SaveFile { url: String, filename: String },
    RequestFullscreen,
    ExitFullscreen,
}

/// Platform that queues requests for the browser
#[derive(Default)]
pub struct ClientPlatform {
    outbox: StdMutex<Vec<ClientCommand>>,
}

impl ClientPlatform {
    fn push(&self, command: ClientCommand) -> PlatformResult<()> {
        self.outbox
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command);
        Ok(())
    }

    /// Take every queued command
    pub fn drain(&self) -> Vec<ClientCommand> {
        std::mem::take(&mut *self.outbox.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl Platform for ClientPlatform {
    fn open_in_new_context(&self, url: &str) -> PlatformResult<()> {
        self.push(ClientCommand::OpenUrl {
            url: url.to_string(),
        })
    }

    fn save_file(&self, url: &str, filename: &str) -> PlatformResult<()> {
        self.push(ClientCommand::SaveFile {
            url: url.to_string(),
            filename: filename.to_string(),
        })
    }

    fn request_fullscreen(&self) -> PlatformResult<()> {
        self.push(ClientCommand::RequestFullscreen)
    }

    fn exit_fullscreen(&self) -> PlatformResult<()> {
        self.push(ClientCommand::ExitFullscreen)
    }
}

/// Events a browser may post to a session
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    Next,
    Prev,
    GoToPage { page: i64 },
    PageInput { value: String },
    Key { key: String },
    EmbedLoadFailed,
    ViewExternally,
    OpenInNewContext,
    Download,
    ToggleFullscreen,
    FullscreenChanged { active: bool },
    Close,
}

impl ClientEvent {
    /// Translate into a viewer event; unparseable page input maps to nothing
    pub fn into_viewer_event(self) -> Option<ViewerEvent> {
        Some(match self {
            ClientEvent::Next => ViewerEvent::NextPage,
            ClientEvent::Prev => ViewerEvent::PrevPage,
            ClientEvent::GoToPage { page } => ViewerEvent::GoToPage(page),
            ClientEvent::PageInput { value } => {
                ViewerEvent::GoToPage(i64::from(parse_page_input(&value).ok()?))
            }
            ClientEvent::Key { key } => match key.parse::<Key>() {
                Ok(key) => ViewerEvent::Key(key),
                Err(never) => match never {},
            },
            ClientEvent::EmbedLoadFailed => ViewerEvent::EmbedLoadFailed,
            ClientEvent::ViewExternally => ViewerEvent::ViewExternally,
            ClientEvent::OpenInNewContext => ViewerEvent::OpenInNewContext,
            ClientEvent::Download => ViewerEvent::Download,
            ClientEvent::ToggleFullscreen => ViewerEvent::ToggleFullscreen,
            ClientEvent::FullscreenChanged { active } => ViewerEvent::FullscreenChanged(active),
            ClientEvent::Close => ViewerEvent::Close,
        })
    }
}

/// Snapshot plus whatever the browser still has to carry out
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: String,
    pub viewer: ViewerSnapshot,
    pub commands: Vec<ClientCommand>,
}

pub struct ViewerSession {
    runtime: Arc<Mutex<ViewerRuntime>>,
    platform: Arc<ClientPlatform>,
    pump: JoinHandle<()>,
}

impl ViewerSession {
    /// Open a viewer on `item` and start delivering its timer events
    pub fn start(item: &ContentItem, notifier: Arc<dyn Notifier>) -> Self {
        let (handle, mut events) = ViewerHandle::channel();
        let platform = Arc::new(ClientPlatform::default());
        let mut runtime = ViewerRuntime::new(
            PdfViewer::new(),
            handle,
            Arc::clone(&platform) as Arc<dyn Platform>,
            notifier,
        );
        runtime.dispatch(ViewerEvent::Open {
            title: item.title.clone(),
            file_url: item.file_url.clone(),
        });

        let runtime = Arc::new(Mutex::new(runtime));
        let weak = Arc::downgrade(&runtime);
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let Some(runtime) = weak.upgrade() else {
                    break;
                };
                runtime.lock().await.dispatch(event);
            }
        });

        Self {
            runtime,
            platform,
            pump,
        }
    }

    /// Apply a browser event; returns true when the viewer closed itself
    pub async fn apply(&self, event: ClientEvent) -> bool {
        let mut runtime = self.runtime.lock().await;
        if let Some(event) = event.into_viewer_event() {
            runtime.dispatch(event);
        }
        runtime.take_close_request()
    }

    pub async fn view(&self, id: &str) -> SessionView {
        let snapshot = self.runtime.lock().await.snapshot();
        SessionView {
            id: id.to_string(),
            viewer: snapshot,
            commands: self.platform.drain(),
        }
    }

    /// Close from the owner's side (session deleted)
    pub async fn close(&self) {
        let mut runtime = self.runtime.lock().await;
        runtime.dispatch(ViewerEvent::Close);
        runtime.take_close_request();
    }
}

impl Drop for ViewerSession {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_json() {
        let event: ClientEvent = serde_json::from_str(r#"{"type":"go_to_page","page":4}"#).unwrap();
        assert_eq!(event.into_viewer_event(), Some(ViewerEvent::GoToPage(4)));

        let event: ClientEvent =
            serde_json::from_str(r#"{"type":"key","key":"ArrowRight"}"#).unwrap();
        assert_eq!(
            event.into_viewer_event(),
            Some(ViewerEvent::Key(Key::ArrowRight))
        );
    }

    #[test]
    fn test_bad_page_input_maps_to_nothing() {
        let event = ClientEvent::PageInput {
            value: "-5".into(),
        };
        assert_eq!(event.into_viewer_event(), None);
    }

    #[test]
    fn test_client_platform_drains() {
        let platform = ClientPlatform::default();
        platform.request_fullscreen().unwrap();
        platform.open_in_new_context("u.pdf").unwrap();
        assert_eq!(
            platform.drain(),
            vec![
                ClientCommand::RequestFullscreen,
                ClientCommand::OpenUrl {
                    url: "u.pdf".into()
                }
            ]
        );
        assert!(platform.drain().is_empty());
    }
}
