//! Host environment abstraction
//!
//! Everything here is fire-and-forget: the platform accepts or rejects a
//! request but never reports whether the user actually got the file. The
//! fullscreen state is reported back separately through
//! [`ViewerEvent::FullscreenChanged`](crate::viewer::ViewerEvent::FullscreenChanged).

use crate::error::PlatformError;
use std::sync::Mutex;

pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

pub trait Platform: Send + Sync {
    /// Open `url` in a new browsing context
    fn open_in_new_context(&self, url: &str) -> PlatformResult<()>;

    /// Save the resource at `url` under `filename`
    fn save_file(&self, url: &str, filename: &str) -> PlatformResult<()>;

    /// Ask to enter fullscreen; the answer arrives as a notification
    fn request_fullscreen(&self) -> PlatformResult<()>;

    fn exit_fullscreen(&self) -> PlatformResult<()>;
}

/// Something a [`RecordingPlatform`] was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Open(String),
    Save { url: String, filename: String },
    RequestFullscreen,
    ExitFullscreen,
}

/// Records every request (for testing); can be told to reject them
#[derive(Default)]
pub struct RecordingPlatform {
    calls: Mutex<Vec<PlatformCall>>,
    fail: bool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform that rejects every request after recording it
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<PlatformCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn record(&self, call: PlatformCall) -> PlatformResult<()> {
        let error = match &call {
            PlatformCall::Open(url) => PlatformError::OpenFailed {
                url: url.clone(),
                reason: "rejected".into(),
            },
            PlatformCall::Save { filename, .. } => PlatformError::DownloadFailed {
                filename: filename.clone(),
                reason: "rejected".into(),
            },
            PlatformCall::RequestFullscreen | PlatformCall::ExitFullscreen => {
                PlatformError::Fullscreen("rejected".into())
            }
        };
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        if self.fail {
            Err(error)
        } else {
            Ok(())
        }
    }
}

impl Platform for RecordingPlatform {
    fn open_in_new_context(&self, url: &str) -> PlatformResult<()> {
        self.record(PlatformCall::Open(url.to_string()))
    }

    fn save_file(&self, url: &str, filename: &str) -> PlatformResult<()> {
        self.record(PlatformCall::Save {
            url: url.to_string(),
            filename: filename.to_string(),
        })
    }

    fn request_fullscreen(&self) -> PlatformResult<()> {
        self.record(PlatformCall::RequestFullscreen)
    }

    fn exit_fullscreen(&self) -> PlatformResult<()> {
        self.record(PlatformCall::ExitFullscreen)
    }
}
