use crate::{ErrorBanner, VideoCount, WarningBanner};

pub const WIDE_VISIBLE_LINES: usize = 8;
pub const COMPACT_VISIBLE_LINES: usize = 4;

/// Available display width; narrow screens show fewer transcript lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    Compact,
    #[default]
    Wide,
}

impl Layout {
    pub fn visible_lines(self) -> usize {
        match self {
            Layout::Compact => COMPACT_VISIBLE_LINES,
            Layout::Wide => WIDE_VISIBLE_LINES,
        }
    }
}

/// Colour family of the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Idle,
    Active,
    Stalled,
    Complete,
    Terminated,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusView {
    pub job_id: Option<String>,
    pub download_type: Option<String>,
    pub label: String,
    pub title: String,
    pub percent: f64,
    pub downloaded: String,
    pub total: String,
    pub speed: String,
    pub eta: String,
    pub stalled: bool,
    pub tone: Tone,
}

/// Video counter shown under an active status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterView {
    pub count: VideoCount,
    /// Channel currently swept by a channel download.
    pub channel_name: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalSummaryView {
    pub total_downloaded: u32,
    pub total_skipped: u32,
    pub job_type: String,
    /// `N new videos downloaded[, M already existed or members only]`.
    pub headline: String,
    /// Friendly job type, e.g. `Channel update`.
    pub job_label: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiveViewModel {
    /// Last few transcript lines, oldest first, already stamped.
    pub transcript: Vec<String>,
    /// Number of retained transcript lines.
    pub transcript_len: usize,
    pub status: Option<StatusView>,
    pub video_count: Option<CounterView>,
    pub error: Option<ErrorBanner>,
    pub warning: Option<WarningBanner>,
    pub final_summary: Option<FinalSummaryView>,
    pub dirty: bool,
}
