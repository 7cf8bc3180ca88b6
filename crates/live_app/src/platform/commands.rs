//! Single-letter commands typed on stdin.
//!
//! Blocking reads stay on a plain thread outside the runtime so shutting the
//! runtime down never waits on the terminal.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;

use live_core::Msg;
use live_logging::live_warn;
use tokio::sync::{mpsc, Notify};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Send(Msg),
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "d" => Some(Command::Send(Msg::DownloadRequested)),
        "e" => Some(Command::Send(Msg::ErrorDismissed)),
        "w" => Some(Command::Send(Msg::WarningDismissed)),
        "q" => Some(Command::Quit),
        _ => None,
    }
}

/// Reads commands from `input` until EOF or `q`: `d` expects a new download
/// job, `e`/`w` dismiss banners, `q` quits.
pub fn spawn_command_reader<R>(
    input: R,
    msg_tx: mpsc::UnboundedSender<Msg>,
    quit: Arc<Notify>,
) -> io::Result<thread::JoinHandle<()>>
where
    R: BufRead + Send + 'static,
{
    thread::Builder::new()
        .name("stdin-commands".to_string())
        .spawn(move || {
            for line in input.lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        live_warn!("Stopped reading commands: {}", err);
                        return;
                    }
                };
                match parse_command(&line) {
                    Some(Command::Send(msg)) => {
                        if msg_tx.send(msg).is_err() {
                            return;
                        }
                    }
                    Some(Command::Quit) => {
                        quit.notify_one();
                        return;
                    }
                    None => {}
                }
            }
        })
}
