use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use chrono::Local;
use live_client::{broadcast_of, ConnectionManager, ConnectionState, EventKind, ServerEvent};
use live_core::{update, AppState, Msg};
use live_logging::live_info;
use tokio::sync::{mpsc, watch, Notify};

use super::commands::spawn_command_reader;
use super::config::{load_config, AppConfig, ConfigSource, LayoutChoice, DEFAULT_CONFIG_PATH};
use super::effects::EffectRunner;
use super::logging;
use super::notify::TerminalNotifier;
use super::ui;

/// Redraws are coalesced to this cadence.
const RENDER_INTERVAL: Duration = Duration::from_millis(75);
/// How long leftover tasks may run once the event loop has exited.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

pub fn run_app() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let (config, source) = load_config(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;

    logging::initialize(&config.logging);
    match source {
        ConfigSource::File => live_info!("youtarr-live starting with config {:?}", config_path),
        ConfigSource::Defaults => {
            live_info!("youtarr-live starting; no config at {:?}, using defaults", config_path)
        }
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building the tokio runtime")?;
    let result = runtime.block_on(run(config));
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    result
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let settings = config
        .connection_settings()
        .context("resolving the realtime endpoint")?;
    live_info!("Realtime endpoint {}", settings.url);

    let notifier = Arc::new(TerminalNotifier::new(config.notifications.permission));
    let manager = ConnectionManager::new(settings, notifier);
    let (msg_tx, mut msg_rx) = mpsc::unbounded_channel::<Msg>();

    let progress_tx = msg_tx.clone();
    manager.subscribe(
        broadcast_of(EventKind::DownloadProgress),
        move |event| {
            if let ServerEvent::DownloadProgress(payload) = event {
                let _ = progress_tx.send(Msg::ProgressReceived {
                    payload: payload.clone(),
                    received_at: Local::now(),
                });
            }
        },
    );
    let quit = Arc::new(Notify::new());
    spawn_command_reader(BufReader::new(io::stdin()), msg_tx.clone(), Arc::clone(&quit))
        .context("starting the command reader")?;

    let effects = EffectRunner::new(msg_tx);
    let mut screen = Screen::new(config.display.layout, manager.state());
    let mut state = AppState::with_settings(config.core_settings());

    manager.start();
    screen.draw(&state)?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut ticker = tokio::time::interval(RENDER_INTERVAL);

    loop {
        let msg = tokio::select! {
            _ = &mut ctrl_c => break,
            _ = quit.notified() => break,
            changed = screen.connection.changed() => {
                if changed.is_err() {
                    break;
                }
                screen.draw(&state)?;
                continue;
            }
            _ = ticker.tick() => Msg::Tick,
            msg = msg_rx.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
        };

        let is_tick = matches!(msg, Msg::Tick);
        let (next, new_effects) = update(state, msg);
        state = next;
        effects.enqueue(new_effects);

        if is_tick && state.consume_dirty() {
            screen.draw(&state)?;
        }
    }

    live_info!("Shutting down");
    manager.shutdown().await;
    Ok(())
}

struct Screen {
    layout: LayoutChoice,
    connection: watch::Receiver<ConnectionState>,
}

impl Screen {
    fn new(layout: LayoutChoice, connection: watch::Receiver<ConnectionState>) -> Self {
        Self { layout, connection }
    }

    fn draw(&mut self, state: &AppState) -> io::Result<()> {
        let layout = ui::layout::resolve_layout(self.layout, ui::layout::terminal_columns());
        let connection = *self.connection.borrow_and_update();
        let lines = ui::render::render(&state.view(layout), connection);

        let mut out = io::stdout().lock();
        write!(out, "\x1b[2J\x1b[H")?;
        for line in lines {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}
