//! Terminal implementations of the notifier and host platform

use estante_core::notify::{Notifier, Toast, ToastId, ToastVariant};
use estante_core::platform::{Platform, PlatformResult};
use estante_core::viewer::{ViewerEvent, ViewerHandle};
use estante_core::PlatformError;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Prints toasts to stderr as they arrive
#[derive(Default)]
pub struct ConsoleNotifier {
    next_id: AtomicU64,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: Toast) -> ToastId {
        let marker = match toast.variant {
            ToastVariant::Default => "✓",
            ToastVariant::Destructive => "✗",
        };
        eprintln!("{} {}: {}", marker, toast.title, toast.description);
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    // Printed lines stay printed
    fn dismiss(&self, _id: ToastId) {}
}

/// A file the user asked to save, waiting to be transferred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSave {
    pub url: String,
    pub path: PathBuf,
}

/// Host platform for a terminal session.
///
/// URLs go to the system browser. Saves are queued against the output
/// directory, if one was given, and transferred by the caller. A terminal
/// has no fullscreen of its own, so fullscreen requests are granted
/// immediately by posting the change back to the viewer.
#[derive(Default)]
pub struct TerminalPlatform {
    output: Option<PathBuf>,
    viewer: Option<ViewerHandle>,
    saves: Mutex<Vec<PendingSave>>,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept saves into `output`
    pub fn saving_to(output: impl AsRef<Path>) -> Self {
        Self {
            output: Some(output.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Report fullscreen changes to the viewer behind `handle`
    pub fn with_viewer(mut self, handle: ViewerHandle) -> Self {
        self.viewer = Some(handle);
        self
    }

    pub fn take_saves(&self) -> Vec<PendingSave> {
        std::mem::take(&mut *self.saves.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn set_fullscreen(&self, active: bool) -> PlatformResult<()> {
        match &self.viewer {
            Some(handle) if handle.send(ViewerEvent::FullscreenChanged(active)) => Ok(()),
            _ => Err(PlatformError::Fullscreen("no viewer attached".into())),
        }
    }
}

impl Platform for TerminalPlatform {
    fn open_in_new_context(&self, url: &str) -> PlatformResult<()> {
        tracing::debug!("Opening {}", url);
        open::that(url).map_err(|e| PlatformError::OpenFailed {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn save_file(&self, url: &str, filename: &str) -> PlatformResult<()> {
        let failed = |reason: String| PlatformError::DownloadFailed {
            filename: filename.to_string(),
            reason,
        };

        let output = self
            .output
            .as_ref()
            .ok_or_else(|| failed("no download directory".into()))?;
        if !output.is_dir() {
            return Err(failed(format!("{} is not a directory", output.display())));
        }

        // Only a bare file name may be joined onto the output directory
        let mut components = Path::new(filename).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            return Err(failed("not a plain file name".into()));
        }

        self.saves
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(PendingSave {
                url: url.to_string(),
                path: output.join(filename),
            });
        Ok(())
    }

    fn request_fullscreen(&self) -> PlatformResult<()> {
        self.set_fullscreen(true)
    }

    fn exit_fullscreen(&self) -> PlatformResult<()> {
        self.set_fullscreen(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_is_queued_under_output_dir() {
        let dir = TempDir::new().unwrap();
        let platform = TerminalPlatform::saving_to(dir.path());

        platform
            .save_file("https://cdn.example/guia.pdf", "Guia.pdf")
            .unwrap();

        assert_eq!(
            platform.take_saves(),
            vec![PendingSave {
                url: "https://cdn.example/guia.pdf".into(),
                path: dir.path().join("Guia.pdf"),
            }]
        );
        assert!(platform.take_saves().is_empty());
    }

    #[test]
    fn test_save_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let platform = TerminalPlatform::saving_to(dir.path().join("missing"));

        let result = platform.save_file("u.pdf", "Guia.pdf");
        assert!(matches!(result, Err(PlatformError::DownloadFailed { .. })));
    }

    #[test]
    fn test_save_never_leaves_output_dir() {
        let dir = TempDir::new().unwrap();
        let platform = TerminalPlatform::saving_to(dir.path());

        for filename in ["/tmp/evil.pdf", "../escape.pdf", "sub/dir.pdf", "..", ""] {
            let result = platform.save_file("u.pdf", filename);
            assert!(
                matches!(result, Err(PlatformError::DownloadFailed { .. })),
                "{:?} was accepted",
                filename
            );
        }
        assert!(platform.take_saves().is_empty());
    }

    #[test]
    fn test_save_without_output_dir_fails() {
        let result = TerminalPlatform::new().save_file("u.pdf", "Guia.pdf");
        assert!(matches!(result, Err(PlatformError::DownloadFailed { .. })));
    }

    #[test]
    fn test_fullscreen_is_echoed_to_viewer() {
        let (handle, mut events) = ViewerHandle::channel();
        let platform = TerminalPlatform::new().with_viewer(handle);

        platform.request_fullscreen().unwrap();
        platform.exit_fullscreen().unwrap();

        assert_eq!(
            events.try_recv().unwrap(),
            ViewerEvent::FullscreenChanged(true)
        );
        assert_eq!(
            events.try_recv().unwrap(),
            ViewerEvent::FullscreenChanged(false)
        );
    }

    #[test]
    fn test_fullscreen_without_viewer_fails() {
        assert!(TerminalPlatform::new().request_fullscreen().is_err());
    }
}
