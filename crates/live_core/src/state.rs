use std::time::Duration;

use crate::format::{
    counter_text, final_summary_headline, format_bytes, format_completed_at, format_eta,
    job_type_label, overlay_title,
};
use crate::transcript::{Transcript, DEFAULT_MAX_TRANSCRIPT_LINES};
use crate::view_model::{
    CounterView, FinalSummaryView, Layout, LiveViewModel, StatusView, Tone,
};
use crate::{DownloadState, FinalSummary, ProgressSnapshot, VideoCount};

pub const DEFAULT_SUMMARY_HOLD: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreSettings {
    /// How long a `complete`/`terminated` snapshot stays on screen.
    pub summary_hold: Duration,
    pub max_transcript_lines: usize,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            summary_hold: DEFAULT_SUMMARY_HOLD,
            max_transcript_lines: DEFAULT_MAX_TRANSCRIPT_LINES,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remediation {
    /// Cookies need attention on the configuration screen.
    OpenConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub code: Option<String>,
    pub remediation: Option<Remediation>,
}

impl ErrorBanner {
    pub fn new(message: impl Into<String>, code: Option<String>) -> Self {
        let message = message.into();
        let cookie_related = matches!(
            code.as_deref(),
            Some("COOKIES_REQUIRED") | Some("COOKIES_RECOMMENDED")
        ) || message.contains("Bot detection")
            || message.to_lowercase().contains("cookie");
        Self {
            message,
            code,
            remediation: cookie_related.then_some(Remediation::OpenConfiguration),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningBanner {
    pub message: String,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    settings: CoreSettings,
    transcript: Transcript,
    download_initiated: bool,
    summary: Option<ProgressSnapshot>,
    video_count: VideoCount,
    final_summary: Option<FinalSummary>,
    error: Option<ErrorBanner>,
    warning: Option<WarningBanner>,
    hold_generation: u64,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CoreSettings) -> Self {
        Self {
            transcript: Transcript::with_capacity(settings.max_transcript_lines),
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn summary(&self) -> Option<&ProgressSnapshot> {
        self.summary.as_ref()
    }

    pub fn video_count(&self) -> VideoCount {
        self.video_count
    }

    pub fn final_summary(&self) -> Option<&FinalSummary> {
        self.final_summary.as_ref()
    }

    pub fn error(&self) -> Option<&ErrorBanner> {
        self.error.as_ref()
    }

    pub fn warning(&self) -> Option<&WarningBanner> {
        self.warning.as_ref()
    }

    pub fn download_initiated(&self) -> bool {
        self.download_initiated
    }

    pub fn hold_generation(&self) -> u64 {
        self.hold_generation
    }

    pub fn view(&self, layout: Layout) -> LiveViewModel {
        let visible = layout.visible_lines();
        let skip = self.transcript.len().saturating_sub(visible);
        let transcript = self
            .transcript
            .lines()
            .skip(skip)
            .map(|line| line.render())
            .collect();

        let status = self.summary.as_ref().map(status_view);
        let idle = status.is_none();
        let error = self.error.clone().filter(|_| idle);
        let quiet = idle && error.is_none();

        LiveViewModel {
            transcript,
            transcript_len: self.transcript.len(),
            status,
            video_count: self.counter_view(),
            error,
            warning: self.warning.clone().filter(|_| quiet),
            final_summary: self
                .final_summary
                .as_ref()
                .filter(|_| quiet)
                .map(final_summary_view),
            dirty: self.dirty,
        }
    }

    /// The counter accompanies an active status only.
    fn counter_view(&self) -> Option<CounterView> {
        let snapshot = self.summary.as_ref()?;
        if self.video_count.total == 0 {
            return None;
        }
        let channel_name = snapshot.current_channel_name.clone();
        Some(CounterView {
            count: self.video_count,
            text: counter_text(
                &self.video_count,
                snapshot.download_type.as_deref(),
                channel_name.as_deref(),
            ),
            channel_name,
        })
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn transcript_mut(&mut self) -> &mut Transcript {
        self.dirty = true;
        &mut self.transcript
    }

    pub(crate) fn arm_download_initiated(&mut self) {
        self.download_initiated = true;
    }

    /// Consumes the one-shot initiation flag.
    pub(crate) fn take_download_initiated(&mut self) -> bool {
        std::mem::take(&mut self.download_initiated)
    }

    /// Drops everything describing the previous job's outcome.
    pub(crate) fn clear_outcome(&mut self) {
        self.final_summary = None;
        self.error = None;
        self.warning = None;
        self.mark_dirty();
    }

    pub(crate) fn clear_final_summary(&mut self) {
        if self.final_summary.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_error(&mut self, banner: ErrorBanner) {
        self.error = Some(banner);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_error(&mut self) {
        if self.error.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_warning(&mut self, banner: WarningBanner) {
        self.warning = Some(banner);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_warning(&mut self) {
        if self.warning.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_final_summary(&mut self, summary: FinalSummary) {
        self.final_summary = Some(summary);
        self.mark_dirty();
    }

    pub(crate) fn video_count_mut(&mut self) -> &mut VideoCount {
        self.dirty = true;
        &mut self.video_count
    }

    pub(crate) fn reset_video_count(&mut self) {
        self.video_count = VideoCount::default();
        self.mark_dirty();
    }

    /// Installs a new snapshot and returns its hold generation.
    pub(crate) fn replace_summary(&mut self, snapshot: Option<ProgressSnapshot>) -> u64 {
        self.hold_generation += 1;
        self.summary = snapshot;
        self.mark_dirty();
        self.hold_generation
    }

    /// Clears a terminal snapshot once its hold elapsed, unless a newer
    /// snapshot arrived in the meantime.
    pub(crate) fn expire_summary(&mut self, generation: u64) {
        if generation != self.hold_generation {
            return;
        }
        let terminal = self
            .summary
            .as_ref()
            .and_then(|snapshot| snapshot.state)
            .is_some_and(DownloadState::is_terminal);
        if terminal {
            self.summary = None;
            self.video_count = VideoCount::default();
            self.mark_dirty();
        }
    }
}

fn status_view(snapshot: &ProgressSnapshot) -> StatusView {
    let state = snapshot.state.unwrap_or(DownloadState::Other);
    let label = if snapshot.stalled {
        "Download stalled - retrying..."
    } else {
        state.label()
    };
    let tone = if snapshot.stalled {
        Tone::Stalled
    } else {
        match state {
            DownloadState::Initiating => Tone::Idle,
            DownloadState::Complete => Tone::Complete,
            DownloadState::Terminated => Tone::Terminated,
            DownloadState::Error => Tone::Failed,
            _ => Tone::Active,
        }
    };
    let progress = &snapshot.progress;

    StatusView {
        job_id: snapshot.job_id.clone(),
        download_type: snapshot.download_type.clone(),
        label: label.to_string(),
        title: overlay_title(snapshot),
        percent: progress.percent.clamp(0.0, 100.0),
        downloaded: format_bytes(progress.downloaded_bytes),
        total: format_bytes(progress.total_bytes),
        speed: format!("{}/s", format_bytes(progress.speed_bytes_per_second)),
        eta: format_eta(progress.eta_seconds.floor() as i64),
        stalled: snapshot.stalled,
        tone,
    }
}

fn final_summary_view(summary: &FinalSummary) -> FinalSummaryView {
    FinalSummaryView {
        total_downloaded: summary.total_downloaded,
        total_skipped: summary.total_skipped,
        job_type: summary.job_type.clone(),
        headline: final_summary_headline(summary),
        job_label: job_type_label(&summary.job_type).to_string(),
        completed_at: summary.completed_at.as_ref().map(format_completed_at),
    }
}
