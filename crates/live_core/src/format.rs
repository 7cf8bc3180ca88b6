//! Human-readable renderings of progress numbers.

use chrono::{DateTime, Local, Utc};

use crate::progress::{CHANNEL_DOWNLOADS, MANUAL_DOWNLOADS};
use crate::{FinalSummary, ProgressSnapshot, VideoCount};

/// Formats an ETA in seconds as `1h5m`, `2m5s` or `45s`.
///
/// Zero components are omitted and seconds are dropped once hours are shown.
/// Zero or negative input yields an empty string.
pub fn format_eta(seconds: i64) -> String {
    if seconds <= 0 {
        return String::new();
    }

    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{hours}h"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}m"));
    }
    if secs > 0 && hours == 0 {
        out.push_str(&format!("{secs}s"));
    }
    out
}

/// Formats a byte count with 1024-based units and one decimal.
pub fn format_bytes(bytes: f64) -> String {
    if !bytes.is_finite() || bytes <= 0.0 {
        return "0 B".to_string();
    }
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

/// Title line for the status overlay: display title plus ETA when known.
pub fn overlay_title(snapshot: &ProgressSnapshot) -> String {
    let title = snapshot
        .video_info
        .as_ref()
        .map(|info| info.display_title.as_str())
        .unwrap_or_default();
    if title.eq_ignore_ascii_case("unknown title") {
        return String::new();
    }

    let eta = format_eta(snapshot.progress.eta_seconds.floor() as i64);
    if !eta.is_empty() && !title.is_empty() {
        format!("{title} · ETA {eta}")
    } else {
        title.to_string()
    }
}

/// Renders a completion timestamp as e.g. `Mar 4, 9:05 PM` in local time.
pub fn format_completed_at(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%b %-d, %-I:%M %p").to_string()
}

/// Counter line under the status bar.
///
/// Channel sweeps name the channel being processed instead of counting.
pub fn counter_text(
    count: &VideoCount,
    download_type: Option<&str>,
    channel: Option<&str>,
) -> String {
    if download_type == Some(CHANNEL_DOWNLOADS) {
        let channel = channel.filter(|name| !name.is_empty()).unwrap_or("channels");
        format!("Downloading recent from all channels. Currently \"{channel}\"")
    } else {
        format!("Videos: {} of {}", count.current, count.total)
    }
}

/// `2 new videos downloaded, 1 already existed or members only`.
pub fn final_summary_headline(summary: &FinalSummary) -> String {
    let plural = if summary.total_downloaded == 1 { "" } else { "s" };
    let mut headline = format!("{} new video{plural} downloaded", summary.total_downloaded);
    if summary.total_skipped > 0 {
        headline.push_str(&format!(
            ", {} already existed or members only",
            summary.total_skipped
        ));
    }
    headline
}

/// User-facing name of a job type; unknown types pass through.
pub fn job_type_label(job_type: &str) -> &str {
    match job_type {
        CHANNEL_DOWNLOADS => "Channel update",
        MANUAL_DOWNLOADS => "Manual download",
        other => other,
    }
}
