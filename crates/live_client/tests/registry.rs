use std::sync::{Arc, Mutex, Once};

use live_client::{
    broadcast_of, decode_frame, Envelope, EventKind, ServerEvent, SubscriberRegistry,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(live_logging::initialize_for_tests);
}

fn progress_broadcast(text: &str) -> Envelope {
    let frame = serde_json::json!({
        "destination": "broadcast",
        "type": "downloadProgress",
        "payload": { "text": text }
    });
    decode_frame(&frame.to_string()).expect("valid frame")
}

fn text_of(event: &ServerEvent) -> String {
    match event {
        ServerEvent::DownloadProgress(payload) => payload.text.clone().unwrap_or_default(),
        other => format!("{:?}", other.kind()),
    }
}

type Log = Arc<Mutex<Vec<String>>>;

fn recorder(log: &Log, tag: &'static str) -> impl Fn(&ServerEvent) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |event: &ServerEvent| log.lock().unwrap().push(format!("{tag}:{}", text_of(event)))
}

#[test]
fn matching_subscribers_receive_in_registration_order() {
    init_logging();
    let registry = SubscriberRegistry::new();
    let log: Log = Arc::default();

    registry.subscribe(broadcast_of(EventKind::DownloadProgress), recorder(&log, "a"));
    registry.subscribe(broadcast_of(EventKind::DownloadComplete), recorder(&log, "skip"));
    registry.subscribe(|_: &Envelope| true, recorder(&log, "b"));

    let delivered = registry.dispatch(&progress_broadcast("hello"));

    assert_eq!(delivered, 2);
    assert_eq!(*log.lock().unwrap(), vec!["a:hello", "b:hello"]);
}

#[test]
fn unsubscribed_callbacks_stop_receiving() {
    init_logging();
    let registry = SubscriberRegistry::new();
    let log: Log = Arc::default();

    let id = registry.subscribe(|_: &Envelope| true, recorder(&log, "a"));
    registry.dispatch(&progress_broadcast("one"));
    assert!(registry.unsubscribe(id));
    assert!(!registry.unsubscribe(id));
    registry.dispatch(&progress_broadcast("two"));

    assert!(registry.is_empty());
    assert_eq!(*log.lock().unwrap(), vec!["a:one"]);
}

#[test]
fn panicking_subscriber_does_not_block_later_ones() {
    init_logging();
    let registry = SubscriberRegistry::new();
    let log: Log = Arc::default();

    registry.subscribe(|_: &Envelope| true, |_: &ServerEvent| panic!("subscriber bug"));
    registry.subscribe(|_: &Envelope| true, recorder(&log, "after"));

    let delivered = registry.dispatch(&progress_broadcast("still here"));

    assert_eq!(delivered, 1);
    assert_eq!(*log.lock().unwrap(), vec!["after:still here"]);
    assert_eq!(registry.len(), 2);
}

#[test]
fn callbacks_may_unsubscribe_themselves() {
    init_logging();
    let registry = SubscriberRegistry::new();
    let log: Log = Arc::default();
    let slot = Arc::new(Mutex::new(None));

    let handle = registry.clone();
    let seen = Arc::clone(&log);
    let pending = Arc::clone(&slot);
    let id = registry.subscribe(
        |_: &Envelope| true,
        move |event: &ServerEvent| {
            seen.lock().unwrap().push(text_of(event));
            if let Some(id) = pending.lock().unwrap().take() {
                handle.unsubscribe(id);
            }
        },
    );
    *slot.lock().unwrap() = Some(id);

    registry.dispatch(&progress_broadcast("first"));
    registry.dispatch(&progress_broadcast("second"));

    assert_eq!(*log.lock().unwrap(), vec!["first"]);
}

#[test]
fn non_broadcast_messages_skip_broadcast_filters() {
    init_logging();
    let registry = SubscriberRegistry::new();
    let log: Log = Arc::default();
    registry.subscribe(broadcast_of(EventKind::DownloadProgress), recorder(&log, "a"));

    let direct = decode_frame(
        r#"{"destination":"client-7","type":"downloadProgress","payload":{"text":"x"}}"#,
    )
    .expect("valid frame");

    assert_eq!(registry.dispatch(&direct), 0);
    assert!(log.lock().unwrap().is_empty());
}
