use live_core::{Effect, Msg};
use live_logging::live_debug;
use tokio::sync::mpsc;

/// Turns core effects into timers that report back through the inbox.
pub struct EffectRunner {
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self { msg_tx }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleSummaryClear { generation, after } => {
                    live_debug!(
                        "Holding summary generation={} for {} ms",
                        generation,
                        after.as_millis()
                    );
                    let msg_tx = self.msg_tx.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = msg_tx.send(Msg::SummaryHoldElapsed { generation });
                    });
                }
            }
        }
    }
}
