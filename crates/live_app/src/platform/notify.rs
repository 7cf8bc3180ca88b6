use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use live_client::{Notification, Notifier, Permission};
use live_logging::{live_info, live_warn};

use super::config::PermissionChoice;

/// Announces completed downloads with the terminal bell and a log record.
pub struct TerminalNotifier {
    choice: PermissionChoice,
    granted: AtomicBool,
}

impl TerminalNotifier {
    pub fn new(choice: PermissionChoice) -> Self {
        Self {
            choice,
            granted: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    fn permission(&self) -> Permission {
        match self.choice {
            PermissionChoice::Granted => Permission::Granted,
            PermissionChoice::Denied => Permission::Denied,
            PermissionChoice::Disabled => Permission::Unsupported,
            PermissionChoice::Ask if self.granted.load(Ordering::Acquire) => Permission::Granted,
            PermissionChoice::Ask => Permission::Default,
        }
    }

    async fn request_permission(&self) -> Permission {
        // A terminal session has nobody to ask; enable for the rest of the run.
        self.granted.store(true, Ordering::Release);
        live_info!("Completion notifications enabled for this session");
        Permission::Granted
    }

    fn show(&self, notification: &Notification) {
        live_info!("{}: {}", notification.title, notification.body);
        let mut stderr = io::stderr();
        if let Err(err) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            live_warn!("Could not ring the terminal bell: {}", err);
        }
    }
}
