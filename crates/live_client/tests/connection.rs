use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use live_client::{
    broadcast_of, ConnectionManager, ConnectionSettings, ConnectionState, EventKind,
    Notification, Notifier, Permission, ServerEvent,
};
use pretty_assertions::assert_eq;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, watch};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

const WAIT: Duration = Duration::from_secs(5);

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(live_logging::initialize_for_tests);
}

#[derive(Default)]
struct ShownNotifications {
    shown: Mutex<Vec<Notification>>,
}

#[async_trait]
impl Notifier for ShownNotifications {
    fn permission(&self) -> Permission {
        Permission::Granted
    }

    async fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn show(&self, notification: &Notification) {
        self.shown.lock().unwrap().push(notification.clone());
    }
}

fn settings(url: Url, base_ms: u64) -> ConnectionSettings {
    ConnectionSettings {
        url,
        base_delay: Duration::from_millis(base_ms),
        max_delay: Duration::from_secs(60),
    }
}

async fn loopback() -> (TcpListener, Url) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let url = Url::parse(&format!("ws://127.0.0.1:{port}/")).unwrap();
    (listener, url)
}

/// A port nothing listens on.
async fn refused_url() -> Url {
    let (listener, url) = loopback().await;
    drop(listener);
    url
}

/// Accepts one client, sends `frames`, then closes the socket cleanly.
async fn serve_once(listener: TcpListener, frames: Vec<String>) {
    let (stream, _) = listener.accept().await.unwrap();
    let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
    for frame in frames {
        ws.send(Message::Text(frame)).await.unwrap();
    }
    ws.close(None).await.unwrap();
    while let Some(Ok(_)) = ws.next().await {}
}

async fn next_closed(rx: &mut watch::Receiver<ConnectionState>) -> ConnectionState {
    let state = timeout(
        WAIT,
        rx.wait_for(|state| matches!(state, ConnectionState::Closed { .. })),
    )
    .await
    .expect("connection closed in time")
    .expect("manager alive");
    *state
}

fn progress_frame(text: &str) -> String {
    serde_json::json!({
        "destination": "broadcast",
        "type": "downloadProgress",
        "payload": { "text": text }
    })
    .to_string()
}

#[tokio::test]
async fn failed_connect_schedules_doubled_delay() {
    init_logging();
    let manager = ConnectionManager::new(
        settings(refused_url().await, 200),
        Arc::new(ShownNotifications::default()),
    );
    let mut state = manager.state();
    assert_eq!(*state.borrow(), ConnectionState::Stopped);

    manager.start();

    assert_eq!(
        next_closed(&mut state).await,
        ConnectionState::Closed {
            retry_in: Duration::from_millis(400)
        }
    );
    manager.shutdown().await;
}

#[tokio::test]
async fn messages_reach_subscribers_and_clean_close_retries_at_base() {
    init_logging();
    let (listener, url) = loopback().await;
    let server = tokio::spawn(serve_once(
        listener,
        vec![
            progress_frame("[download] Destination: /videos/Clip [abc].mp4"),
            r#"{"destination":"broadcast","type":"channelsUpdated","payload":{}}"#.to_string(),
            "garbage".to_string(),
            progress_frame("Completed: done"),
        ],
    ));

    let manager = ConnectionManager::new(settings(url, 500), Arc::new(ShownNotifications::default()));
    let (tx, mut rx) = mpsc::unbounded_channel();
    manager.subscribe(broadcast_of(EventKind::DownloadProgress), move |event| {
        if let ServerEvent::DownloadProgress(payload) = event {
            let _ = tx.send(payload.text.clone().unwrap_or_default());
        }
    });
    let mut state = manager.state();
    manager.start();

    let first = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    let second = timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    assert_eq!(first, "[download] Destination: /videos/Clip [abc].mp4");
    assert_eq!(second, "Completed: done");

    assert_eq!(
        next_closed(&mut state).await,
        ConnectionState::Closed {
            retry_in: Duration::from_millis(500)
        }
    );

    manager.shutdown().await;
    server.await.unwrap();
}

#[tokio::test]
async fn completed_downloads_raise_one_notification() {
    init_logging();
    let (listener, url) = loopback().await;
    let server = tokio::spawn(serve_once(
        listener,
        vec![
            r#"{"destination":"broadcast","type":"downloadComplete","payload":{"videos":[]}}"#
                .to_string(),
            r#"{"destination":"broadcast","type":"downloadComplete","payload":{"videos":[{"id":1},{"id":2}]}}"#
                .to_string(),
        ],
    ));

    let notifier = Arc::new(ShownNotifications::default());
    let manager = ConnectionManager::new(settings(url, 500), notifier.clone());
    let (tx, mut rx) = mpsc::unbounded_channel();
    manager.subscribe(broadcast_of(EventKind::DownloadComplete), move |_| {
        let _ = tx.send(());
    });
    manager.start();

    for _ in 0..2 {
        timeout(WAIT, rx.recv()).await.unwrap().unwrap();
    }
    // The notification runs on its own task.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let shown = notifier.shown.lock().unwrap().clone();
    assert_eq!(
        shown,
        vec![Notification {
            title: "Youtarr".to_string(),
            body: "Downloads complete: 2 videos downloaded".to_string(),
        }]
    );

    manager.shutdown().await;
    server.await.unwrap();
}

#[tokio::test]
async fn shutdown_during_backoff_returns_promptly() {
    init_logging();
    let manager = ConnectionManager::new(
        settings(refused_url().await, 60_000),
        Arc::new(ShownNotifications::default()),
    );
    let mut state = manager.state();
    manager.start();
    manager.start();
    next_closed(&mut state).await;

    timeout(Duration::from_secs(1), manager.shutdown())
        .await
        .expect("shutdown does not wait out the backoff");

    assert_eq!(*state.borrow(), ConnectionState::Stopped);
}

#[tokio::test]
async fn start_after_shutdown_does_nothing() {
    init_logging();
    let manager = ConnectionManager::new(
        settings(refused_url().await, 50),
        Arc::new(ShownNotifications::default()),
    );
    manager.shutdown().await;
    manager.start();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(*manager.state().borrow(), ConnectionState::Stopped);
}
