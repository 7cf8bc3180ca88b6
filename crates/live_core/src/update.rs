use chrono::{DateTime, Local, TimeZone};

use crate::line::{classify, LineKind};
use crate::state::{ErrorBanner, WarningBanner};
use crate::{AppState, DownloadState, Effect, Msg, ProgressPayload, ProgressSnapshot};

const BOT_DETECTION: &str = "Bot detection encountered";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ProgressReceived {
            payload,
            received_at,
        } => apply_payload(&mut state, payload, received_at),
        Msg::DownloadRequested => {
            state.arm_download_initiated();
            Vec::new()
        }
        Msg::SummaryHoldElapsed { generation } => {
            state.expire_summary(generation);
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.dismiss_error();
            Vec::new()
        }
        Msg::WarningDismissed => {
            state.dismiss_warning();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_payload(
    state: &mut AppState,
    payload: ProgressPayload,
    received_at: DateTime<Local>,
) -> Vec<Effect> {
    let stamp = stamp_for(payload.date_time_stamp, received_at);
    let mut effects = Vec::new();

    // The server opens every job with this flag.
    if payload.clear_previous_summary {
        state.clear_outcome();
        state.arm_download_initiated();
    }

    if payload.warning {
        if let Some(reason) = payload.termination_reason.clone() {
            state.set_warning(WarningBanner {
                message: payload
                    .text
                    .clone()
                    .unwrap_or_else(|| "Download terminated".to_string()),
                reason: Some(reason),
            });
        }
    }

    let bot_detected = payload
        .text
        .as_deref()
        .is_some_and(|text| text.contains(BOT_DETECTION));
    if payload.error || bot_detected {
        let message = payload
            .text
            .clone()
            .unwrap_or_else(|| "Download failed".to_string());
        state.set_error(ErrorBanner::new(message, payload.error_code.clone()));
    }

    if let Some(snapshot) = payload.progress {
        effects.extend(apply_snapshot(state, snapshot));
    }

    if let Some(summary) = payload.final_summary {
        state.set_final_summary(summary);
    }

    if let Some(text) = payload.text.as_deref() {
        apply_line(state, text, &stamp);
    }

    effects
}

fn apply_snapshot(state: &mut AppState, snapshot: ProgressSnapshot) -> Option<Effect> {
    if let Some(count) = snapshot.video_count {
        *state.video_count_mut() = count;
    }

    match snapshot.state {
        Some(DownloadState::Initiating | DownloadState::DownloadingVideo) => {
            state.clear_outcome();
            state.replace_summary(Some(snapshot));
            None
        }
        Some(DownloadState::Complete | DownloadState::Terminated) => {
            let generation = state.replace_summary(Some(snapshot));
            Some(Effect::ScheduleSummaryClear {
                generation,
                after: state.settings().summary_hold,
            })
        }
        Some(DownloadState::Error) => {
            state.replace_summary(None);
            None
        }
        _ => {
            state.replace_summary(Some(snapshot));
            None
        }
    }
}

fn apply_line(state: &mut AppState, text: &str, stamp: &str) {
    let Some(kind) = classify(text) else {
        return;
    };

    match kind {
        LineKind::Progress { text } => state.transcript_mut().upsert_tracked(stamp, &text),
        LineKind::Destination { name } => {
            let transcript = state.transcript_mut();
            transcript.append(stamp, &format!("Video: {name}"));
            transcript.release_tracked();
        }
        LineKind::Completed { text } => {
            let transcript = state.transcript_mut();
            transcript.append(stamp, &text);
            transcript.release_tracked();
        }
        LineKind::ExtractingUrl => {
            if state.take_download_initiated() {
                state.transcript_mut().append(stamp, "Download initiated...");
                state.reset_video_count();
                state.clear_final_summary();
            }
        }
        LineKind::AddingMetadata => {
            state
                .transcript_mut()
                .append(stamp, "Processing file [adding metadata]...");
        }
        LineKind::MergingFormats => {
            state
                .transcript_mut()
                .append(stamp, "Processing file [merging formats]...");
        }
        LineKind::AlreadyRecorded => {
            state.transcript_mut().append(stamp, "File already downloaded.");
        }
        LineKind::PlaylistTotal { total } => {
            state.video_count_mut().total = total;
        }
        LineKind::ItemStarted { current, total } => {
            let count = state.video_count_mut();
            count.current = current;
            count.total = total;
        }
    }
}

/// `HH:MM` of the server stamp when present, else of local receipt.
fn stamp_for(server_millis: Option<i64>, received_at: DateTime<Local>) -> String {
    server_millis
        .and_then(|millis| Local.timestamp_millis_opt(millis).single())
        .unwrap_or(received_at)
        .format("%H:%M")
        .to_string()
}
