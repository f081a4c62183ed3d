//! Application state

use crate::session::ViewerSession;
use anyhow::Result;
use estante_core::carousel::{BannerCarousel, AUTOPLAY_INTERVAL};
use estante_core::notify::{NotificationCenter, Notifier, Toast, ToastId};
use estante_core::page::LibraryPage;
use estante_core::provider::ContentProvider;
use estante_core::query::ContentsQuery;
use estante_core::EstanteConfig;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex, MutexGuard, RwLock};
use uuid::Uuid;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cached content query against the data provider
    pub contents: Arc<ContentsQuery>,

    /// Page model: loaded contents and failure reporting
    pub page: Arc<Mutex<LibraryPage>>,

    /// Toast queue behind the notifications endpoints
    pub notifications: Arc<NotificationCenter>,

    /// Notifier handed to core components; also feeds the SSE stream
    pub notifier: Arc<dyn Notifier>,

    /// Open viewer sessions
    pub sessions: Arc<RwLock<HashMap<Uuid, ViewerSession>>>,

    pub carousel: Arc<RwLock<BannerCarousel>>,

    /// Allowed CORS origins (`None` = localhost development origins)
    pub cors_origins: Option<Vec<String>>,

    /// Channel for SSE events
    pub event_tx: broadcast::Sender<ServerEvent>,
}

/// Server-sent events
#[derive(Debug, Clone)]
pub enum ServerEvent {
    /// A toast was queued
    Toast { id: ToastId, toast: Toast },

    /// A toast was dismissed
    ToastDismissed { id: ToastId },
}

/// Notifier that queues toasts and announces them on the event channel
pub struct BroadcastNotifier {
    center: Arc<NotificationCenter>,
    event_tx: broadcast::Sender<ServerEvent>,
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, toast: Toast) -> ToastId {
        let id = self.center.notify(toast.clone());
        // Ignore errors (no subscribers)
        let _ = self.event_tx.send(ServerEvent::Toast { id, toast });
        id
    }

    fn dismiss(&self, id: ToastId) {
        self.center.dismiss(id);
        let _ = self.event_tx.send(ServerEvent::ToastDismissed { id });
    }
}

impl AppState {
    /// Create application state from configuration
    pub fn new(config: &EstanteConfig) -> Result<Self> {
        let provider = config.build_provider()?;
        tracing::info!("Using {} content provider", provider.name());
        Ok(Self::with_provider(
            provider,
            config.stale_time,
            config.cors_origins.clone(),
        ))
    }

    /// Create application state around an existing provider
    pub fn with_provider(
        provider: Arc<dyn ContentProvider>,
        stale_time: Duration,
        cors_origins: Option<Vec<String>>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let notifications = Arc::new(NotificationCenter::new());
        let notifier: Arc<dyn Notifier> = Arc::new(BroadcastNotifier {
            center: Arc::clone(&notifications),
            event_tx: event_tx.clone(),
        });

        Self {
            contents: Arc::new(ContentsQuery::with_stale_time(provider, stale_time)),
            page: Arc::new(Mutex::new(LibraryPage::new(Arc::clone(&notifier)))),
            notifications,
            notifier,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            carousel: Arc::new(RwLock::new(BannerCarousel::default())),
            cors_origins,
            event_tx,
        }
    }

    /// Run the content query and hand the result to the page model
    pub async fn load_page(&self) -> MutexGuard<'_, LibraryPage> {
        let result = self.contents.fetch().await;
        let mut page = self.page.lock().await;
        page.apply_query(result);
        page
    }

    /// Advance the banner carousel on a fixed interval
    pub fn spawn_carousel_autoplay(&self) {
        let carousel = Arc::clone(&self.carousel);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(AUTOPLAY_INTERVAL);
            interval.tick().await;
            loop {
                interval.tick().await;
                carousel.write().await.advance();
            }
        });
    }

    /// Subscribe to server events
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.event_tx.subscribe()
    }
}
