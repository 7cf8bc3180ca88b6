use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `downloadType`/`jobType` of a scheduled sweep over every channel.
pub const CHANNEL_DOWNLOADS: &str = "Channel Downloads";
/// `jobType` of a job started from pasted URLs.
pub const MANUAL_DOWNLOADS: &str = "Manually Added Urls";

/// Lifecycle state reported by the server for the job being downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    Initiating,
    DownloadingVideo,
    DownloadingAudio,
    DownloadingThumbnail,
    Merging,
    Metadata,
    Processing,
    Complete,
    #[serde(alias = "failed", alias = "bot_detected")]
    Error,
    Terminated,
    #[serde(other)]
    Other,
}

impl DownloadState {
    /// `complete`, `error` and `terminated` end a job.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DownloadState::Complete | DownloadState::Error | DownloadState::Terminated
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            DownloadState::Initiating => "Initiating download...",
            DownloadState::DownloadingVideo => "Downloading video stream...",
            DownloadState::DownloadingAudio => "Downloading audio stream...",
            DownloadState::DownloadingThumbnail => "Downloading thumbnail...",
            DownloadState::Merging => "Merging formats...",
            DownloadState::Metadata => "Adding metadata...",
            DownloadState::Processing => "Processing file...",
            DownloadState::Complete => "Download completed",
            DownloadState::Terminated => "Download terminated",
            DownloadState::Error => "Download failed",
            DownloadState::Other => "Processing...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransferProgress {
    pub percent: f64,
    pub downloaded_bytes: f64,
    pub total_bytes: f64,
    pub speed_bytes_per_second: f64,
    pub eta_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoInfo {
    pub channel: String,
    pub title: String,
    pub display_title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VideoCount {
    pub current: u32,
    pub total: u32,
    pub completed: u32,
    pub skipped: u32,
    pub skipped_this_channel: u32,
}

/// One structured progress snapshot. Replaces the previous one wholesale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressSnapshot {
    pub job_id: Option<String>,
    pub progress: TransferProgress,
    pub stalled: bool,
    pub state: Option<DownloadState>,
    pub video_info: Option<VideoInfo>,
    pub video_count: Option<VideoCount>,
    pub download_type: Option<String>,
    pub current_channel_name: Option<String>,
}

/// Summary of the last finished job.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalSummary {
    pub total_downloaded: u32,
    pub total_skipped: u32,
    pub job_type: String,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload of a `downloadProgress` message.
///
/// Every key is optional on the wire; the server mixes free-text lines with
/// structured snapshots and terminal flags in the same shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressPayload {
    pub text: Option<String>,
    pub progress: Option<ProgressSnapshot>,
    pub final_summary: Option<FinalSummary>,
    pub error: bool,
    pub error_code: Option<String>,
    pub warning: bool,
    pub termination_reason: Option<String>,
    pub clear_previous_summary: bool,
    /// Server emission time in epoch milliseconds.
    pub date_time_stamp: Option<i64>,
}

impl ProgressPayload {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}
