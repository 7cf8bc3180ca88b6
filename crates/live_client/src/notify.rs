use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use live_logging::{live_debug, live_info, live_warn};

use crate::types::DownloadCompletePayload;

pub const NOTIFICATION_TITLE: &str = "Youtarr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
    /// Not decided yet; the user may be asked.
    Default,
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Platform hook for user-visible notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn permission(&self) -> Permission;

    /// Prompts the user. Only called while the permission is `Default`.
    async fn request_permission(&self) -> Permission;

    fn show(&self, notification: &Notification);
}

/// Builds the completion notification, or `None` when nothing was downloaded.
pub fn completion_notification(payload: &DownloadCompletePayload) -> Option<Notification> {
    let count = payload.videos.len();
    if count == 0 {
        return None;
    }
    let noun = if count == 1 { "video" } else { "videos" };
    Some(Notification {
        title: NOTIFICATION_TITLE.to_string(),
        body: format!("Downloads complete: {count} {noun} downloaded"),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    Shown,
    NoVideos,
    Denied,
    Unsupported,
    /// Another prompt is already waiting for an answer.
    PromptPending,
}

/// Applies the permission rules in front of a [`Notifier`].
pub struct CompletionNotifier {
    notifier: Arc<dyn Notifier>,
    prompt_pending: AtomicBool,
}

impl CompletionNotifier {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            prompt_pending: AtomicBool::new(false),
        }
    }

    pub async fn notify(&self, payload: &DownloadCompletePayload) -> NotifyOutcome {
        let Some(notification) = completion_notification(payload) else {
            return NotifyOutcome::NoVideos;
        };

        match self.notifier.permission() {
            Permission::Granted => {
                self.notifier.show(&notification);
                NotifyOutcome::Shown
            }
            Permission::Denied => NotifyOutcome::Denied,
            Permission::Unsupported => {
                live_info!("Notifications are not available on this platform");
                NotifyOutcome::Unsupported
            }
            Permission::Default => self.prompt_then_show(&notification).await,
        }
    }

    async fn prompt_then_show(&self, notification: &Notification) -> NotifyOutcome {
        if self.prompt_pending.swap(true, Ordering::AcqRel) {
            live_debug!("Notification permission prompt already pending");
            return NotifyOutcome::PromptPending;
        }
        let answer = self.notifier.request_permission().await;
        self.prompt_pending.store(false, Ordering::Release);

        match answer {
            Permission::Granted => {
                self.notifier.show(notification);
                NotifyOutcome::Shown
            }
            Permission::Unsupported => NotifyOutcome::Unsupported,
            other => {
                live_warn!("Notification permission not granted: {:?}", other);
                NotifyOutcome::Denied
            }
        }
    }
}
