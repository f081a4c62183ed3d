//! User-visible notifications (toasts)
//!
//! Callers get a [`Notifier`] injected instead of reaching for a global; the
//! server and CLI each decide how toasts reach the user.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }

    pub fn load_failed() -> Self {
        Self::error(
            "Erro ao carregar conteúdo",
            "Não foi possível carregar os conteúdos. Tente novamente.",
        )
    }

    pub fn download_started(title: &str) -> Self {
        Self::info("Download iniciado", format!("Baixando \"{}\"...", title))
    }

    pub fn download_failed() -> Self {
        Self::error(
            "Erro no download",
            "Não foi possível baixar o arquivo. Tente novamente.",
        )
    }
}

/// Enqueue/dismiss channel for user-visible messages
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast) -> ToastId;

    fn dismiss(&self, id: ToastId);
}

/// A queued toast with its expiry
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: ToastId,
    pub toast: Toast,
    pub created_at: Instant,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-process notification queue; toasts expire after a fixed duration
pub struct NotificationCenter {
    notifications: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
    duration: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_duration(Duration::from_secs(5))
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            notifications: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            duration,
        }
    }

    /// Toasts that have not expired or been dismissed
    pub fn active(&self) -> Vec<Notification> {
        let mut notifications = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        notifications.retain(|n| !n.is_expired());
        notifications.clone()
    }

    /// Every toast still held, expired or not
    pub fn history(&self) -> Vec<Toast> {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|n| n.toast.clone())
            .collect()
    }
}

impl Notifier for NotificationCenter {
    fn notify(&self, toast: Toast) -> ToastId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Instant::now();
        tracing::debug!("Toast {}: {}", id, toast.title);
        let mut notifications = self.notifications.lock().unwrap_or_else(|e| e.into_inner());
        notifications.retain(|n| !n.is_expired());
        notifications.push(Notification {
            id,
            toast,
            created_at: now,
            expires_at: now + self.duration,
        });
        id
    }

    fn dismiss(&self, id: ToastId) {
        self.notifications
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|n| n.id != id);
    }
}
