//! Live monitor core: pure download-progress decoder and view-model helpers.
mod effect;
mod format;
pub mod line;
mod msg;
mod progress;
mod state;
mod transcript;
mod update;
mod view_model;

pub use effect::Effect;
pub use format::{
    counter_text, final_summary_headline, format_bytes, format_completed_at, format_eta,
    job_type_label, overlay_title,
};
pub use msg::Msg;
pub use progress::{
    DownloadState, FinalSummary, ProgressPayload, ProgressSnapshot, TransferProgress, VideoCount,
    VideoInfo, CHANNEL_DOWNLOADS, MANUAL_DOWNLOADS,
};
pub use state::{
    AppState, CoreSettings, ErrorBanner, Remediation, WarningBanner, DEFAULT_SUMMARY_HOLD,
};
pub use transcript::{Transcript, TranscriptLine, DEFAULT_MAX_TRANSCRIPT_LINES};
pub use update::update;
pub use view_model::{
    CounterView, FinalSummaryView, Layout, LiveViewModel, StatusView, Tone, COMPACT_VISIBLE_LINES,
    WIDE_VISIBLE_LINES,
};
