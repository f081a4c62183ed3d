//! Event loop glue for the viewer
//!
//! The runtime feeds events to a [`PdfViewer`], performs the effects it asks
//! for, and turns each scheduled transition phase into a short timer task that
//! posts [`ViewerEvent::TransitionElapsed`] back into the same queue. Must be
//! driven from inside a tokio runtime.

use super::machine::{OpenPurpose, PdfViewer, ViewerEffect, ViewerEvent, ViewerSnapshot};
use crate::notify::{Notifier, Toast};
use crate::platform::Platform;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Receiving end of a viewer's event queue
pub type ViewerEvents = mpsc::UnboundedReceiver<ViewerEvent>;

/// Cloneable sender for posting events into a viewer's queue
#[derive(Debug, Clone)]
pub struct ViewerHandle {
    tx: mpsc::UnboundedSender<ViewerEvent>,
}

impl ViewerHandle {
    pub fn channel() -> (Self, ViewerEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Post an event; returns false once the queue is gone
    pub fn send(&self, event: ViewerEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

pub struct ViewerRuntime {
    viewer: PdfViewer,
    handle: ViewerHandle,
    platform: Arc<dyn Platform>,
    notifier: Arc<dyn Notifier>,
    timers: Vec<JoinHandle<()>>,
    close_requested: bool,
}

impl ViewerRuntime {
    pub fn new(
        viewer: PdfViewer,
        handle: ViewerHandle,
        platform: Arc<dyn Platform>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            viewer,
            handle,
            platform,
            notifier,
            timers: Vec::new(),
            close_requested: false,
        }
    }

    pub fn viewer(&self) -> &PdfViewer {
        &self.viewer
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        self.viewer.snapshot()
    }

    pub fn handle(&self) -> ViewerHandle {
        self.handle.clone()
    }

    /// True once after the viewer closed itself (Escape or close button)
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }

    pub fn dispatch(&mut self, event: ViewerEvent) {
        let effects = self.viewer.handle(event);
        for effect in effects {
            self.apply(effect);
        }
        if !self.viewer.is_open() {
            self.cancel_timers();
        }
    }

    /// Process queued events until no page turn is running
    pub async fn settle(&mut self, events: &mut ViewerEvents) {
        while self.viewer.state().is_transitioning {
            match events.recv().await {
                Some(event) => self.dispatch(event),
                None => break,
            }
        }
    }

    fn apply(&mut self, effect: ViewerEffect) {
        match effect {
            ViewerEffect::RequestFullscreen => {
                if let Err(e) = self.platform.request_fullscreen() {
                    tracing::warn!("{}", e);
                }
            }
            ViewerEffect::ExitFullscreen => {
                if let Err(e) = self.platform.exit_fullscreen() {
                    tracing::warn!("{}", e);
                }
            }
            ViewerEffect::OpenUrl { url, purpose } => {
                if let Err(e) = self.platform.open_in_new_context(&url) {
                    tracing::warn!("{}", e);
                    if purpose == OpenPurpose::Download {
                        self.notifier.notify(Toast::download_failed());
                    }
                }
            }
            ViewerEffect::Schedule {
                delay,
                session,
                phase,
            } => {
                self.timers.retain(|timer| !timer.is_finished());
                let handle = self.handle.clone();
                self.timers.push(tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    handle.send(ViewerEvent::TransitionElapsed { session, phase });
                }));
            }
            ViewerEffect::Closed => self.close_requested = true,
        }
    }

    fn cancel_timers(&mut self) {
        for timer in self.timers.drain(..) {
            timer.abort();
        }
    }
}

impl Drop for ViewerRuntime {
    fn drop(&mut self) {
        self.cancel_timers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NotificationCenter;
    use crate::platform::{PlatformCall, RecordingPlatform};

    fn runtime(platform: Arc<RecordingPlatform>) -> (ViewerRuntime, ViewerEvents) {
        let (handle, events) = ViewerHandle::channel();
        let runtime = ViewerRuntime::new(
            PdfViewer::new(),
            handle,
            platform,
            Arc::new(NotificationCenter::new()),
        );
        (runtime, events)
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_drive_page_turn() {
        let (mut runtime, mut events) = runtime(Arc::new(RecordingPlatform::new()));
        runtime.dispatch(ViewerEvent::Open {
            title: "Guia".into(),
            file_url: "https://cdn.example/guia.pdf".into(),
        });

        runtime.dispatch(ViewerEvent::NextPage);
        assert!(runtime.viewer().state().is_transitioning);

        runtime.settle(&mut events).await;
        assert_eq!(runtime.viewer().state().current_page, 2);
        assert!(!runtime.viewer().state().is_transitioning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_requests_close_and_exits_fullscreen() {
        let platform = Arc::new(RecordingPlatform::new());
        let (mut runtime, _events) = runtime(platform.clone());
        runtime.dispatch(ViewerEvent::Open {
            title: "Guia".into(),
            file_url: "u.pdf".into(),
        });
        runtime.dispatch(ViewerEvent::FullscreenChanged(true));
        runtime.dispatch(ViewerEvent::Key(crate::viewer::Key::Escape));

        assert!(runtime.take_close_request());
        assert!(!runtime.take_close_request());
        assert_eq!(platform.calls(), vec![PlatformCall::ExitFullscreen]);
    }
}
