use chrono::{DateTime, Local};

use crate::ProgressPayload;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// One `downloadProgress` payload delivered by the connection.
    ProgressReceived {
        payload: ProgressPayload,
        /// Local receipt time; used when the payload carries no server stamp.
        received_at: DateTime<Local>,
    },
    /// A download was triggered from this client; arms the one-shot
    /// "Download initiated..." line.
    DownloadRequested,
    /// Display-hold timer for a terminal snapshot fired.
    SummaryHoldElapsed { generation: u64 },
    /// User dismissed the failure banner.
    ErrorDismissed,
    /// User dismissed the termination warning.
    WarningDismissed,
    /// Render tick to coalesce redraws.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
