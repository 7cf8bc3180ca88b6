use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures_util::StreamExt;
use live_logging::{live_debug, live_error, live_info, live_trace, live_warn};
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::backoff::{Backoff, DEFAULT_BASE_DELAY, DEFAULT_MAX_DELAY};
use crate::decode::{decode_binary_frame, decode_frame};
use crate::error::DecodeError;
use crate::notify::{CompletionNotifier, Notifier};
use crate::registry::{SubscriberRegistry, SubscriptionId};
use crate::types::{ConnectionState, Envelope, ServerEvent};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub url: Url,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl ConnectionSettings {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

/// Owns the single realtime socket and fans inbound messages out to
/// subscribers.
///
/// The socket is reopened with capped exponential backoff until
/// [`ConnectionManager::shutdown`] is called.
pub struct ConnectionManager {
    settings: ConnectionSettings,
    registry: SubscriberRegistry,
    completion: Arc<CompletionNotifier>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ConnectionManager {
    pub fn new(settings: ConnectionSettings, notifier: Arc<dyn Notifier>) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Stopped);
        Self {
            settings,
            registry: SubscriberRegistry::new(),
            completion: Arc::new(CompletionNotifier::new(notifier)),
            state_tx: Arc::new(state_tx),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    pub fn subscribe<F, C>(&self, filter: F, callback: C) -> SubscriptionId
    where
        F: Fn(&Envelope) -> bool + Send + Sync + 'static,
        C: Fn(&ServerEvent) + Send + Sync + 'static,
    {
        self.registry.subscribe(filter, callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    /// Watch the lifecycle. Starts out `Stopped` until [`Self::start`].
    pub fn state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    /// Spawns the connection loop on the current tokio runtime. Later calls,
    /// including calls after shutdown, do nothing.
    pub fn start(&self) {
        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if task.is_some() || self.cancel.is_cancelled() {
            return;
        }
        let connection = Connection {
            url: self.settings.url.clone(),
            backoff: Backoff::new(self.settings.base_delay, self.settings.max_delay),
            registry: self.registry.clone(),
            completion: Arc::clone(&self.completion),
            state_tx: Arc::clone(&self.state_tx),
            cancel: self.cancel.clone(),
        };
        *task = Some(tokio::spawn(connection.run()));
    }

    /// Closes the socket, cancels any pending reconnect and waits for the loop
    /// to exit.
    pub async fn shutdown(&self) {
        self.cancel.cancel();
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            if let Err(err) = task.await {
                live_error!("Connection task ended abnormally: {}", err);
            }
        }
        self.state_tx.send_replace(ConnectionState::Stopped);
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

enum SessionEnd {
    Cancelled,
    Reconnect,
}

/// State moved into the spawned loop.
struct Connection {
    url: Url,
    backoff: Backoff,
    registry: SubscriberRegistry,
    completion: Arc<CompletionNotifier>,
    state_tx: Arc<watch::Sender<ConnectionState>>,
    cancel: CancellationToken,
}

impl Connection {
    async fn run(mut self) {
        loop {
            self.state_tx.send_replace(ConnectionState::Connecting);
            live_debug!("Connecting to {}", self.url);

            let attempt = tokio::select! {
                _ = self.cancel.cancelled() => break,
                attempt = connect_async(self.url.as_str()) => attempt,
            };
            match attempt {
                Ok((socket, _response)) => {
                    self.backoff.on_open();
                    self.state_tx.send_replace(ConnectionState::Open);
                    live_info!("Realtime connection open: {}", self.url);
                    if let SessionEnd::Cancelled = self.pump(socket).await {
                        break;
                    }
                }
                Err(err) => {
                    live_warn!("Realtime connection failed: {}", err);
                    self.backoff.on_error();
                }
            }

            let retry_in = self.backoff.delay();
            self.state_tx
                .send_replace(ConnectionState::Closed { retry_in });
            live_info!(
                "Realtime connection closed, retrying in {} ms",
                retry_in.as_millis()
            );
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = tokio::time::sleep(retry_in) => {}
            }
        }
        self.state_tx.send_replace(ConnectionState::Stopped);
        live_debug!("Connection loop stopped");
    }

    async fn pump(&mut self, mut socket: Socket) -> SessionEnd {
        loop {
            let frame = tokio::select! {
                _ = self.cancel.cancelled() => {
                    if let Err(err) = socket.close(None).await {
                        live_debug!("Close on shutdown failed: {}", err);
                    }
                    return SessionEnd::Cancelled;
                }
                frame = socket.next() => frame,
            };
            match frame {
                Some(Ok(Message::Text(text))) => self.handle_frame(decode_frame(&text)),
                Some(Ok(Message::Binary(bytes))) => self.handle_frame(decode_binary_frame(bytes)),
                Some(Ok(Message::Close(reason))) => {
                    live_info!("Server closed the connection: {:?}", reason);
                    return SessionEnd::Reconnect;
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    live_warn!("Realtime connection error: {}", err);
                    self.backoff.on_error();
                    return SessionEnd::Reconnect;
                }
                None => return SessionEnd::Reconnect,
            }
        }
    }

    fn handle_frame(&self, decoded: Result<Envelope, DecodeError>) {
        let envelope = match decoded {
            Ok(envelope) => envelope,
            Err(err) => {
                live_warn!("Dropping inbound frame: {}", err);
                return;
            }
        };

        if let ServerEvent::DownloadComplete(payload) = &envelope.event {
            if !payload.videos.is_empty() {
                let completion = Arc::clone(&self.completion);
                let payload = payload.clone();
                tokio::spawn(async move {
                    let outcome = completion.notify(&payload).await;
                    live_debug!("Completion notification: {:?}", outcome);
                });
            }
        }

        let delivered = self.registry.dispatch(&envelope);
        live_trace!("{:?} delivered to {} subscriber(s)", envelope.kind(), delivered);
    }
}
