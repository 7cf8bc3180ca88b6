use chrono::{TimeZone, Utc};
use live_core::{
    counter_text, final_summary_headline, format_bytes, format_eta, job_type_label, overlay_title,
    FinalSummary, ProgressSnapshot, TransferProgress, VideoCount, VideoInfo,
};

#[test]
fn eta_drops_zero_and_redundant_units() {
    assert_eq!(format_eta(0), "");
    assert_eq!(format_eta(-5), "");
    assert_eq!(format_eta(45), "45s");
    assert_eq!(format_eta(60), "1m");
    assert_eq!(format_eta(125), "2m5s");
    assert_eq!(format_eta(3600), "1h");
    assert_eq!(format_eta(3665), "1h1m");
    assert_eq!(format_eta(7325), "2h2m");
}

#[test]
fn bytes_use_binary_units() {
    assert_eq!(format_bytes(0.0), "0 B");
    assert_eq!(format_bytes(512.0), "512.0 B");
    assert_eq!(format_bytes(1536.0), "1.5 KB");
    assert_eq!(format_bytes(10.0 * 1024.0 * 1024.0), "10.0 MB");
    assert_eq!(format_bytes(3.0 * 1024.0 * 1024.0 * 1024.0), "3.0 GB");
}

fn snapshot(display_title: &str, eta_seconds: f64) -> ProgressSnapshot {
    ProgressSnapshot {
        progress: TransferProgress {
            eta_seconds,
            ..TransferProgress::default()
        },
        video_info: Some(VideoInfo {
            channel: "Chan".to_string(),
            title: display_title.to_string(),
            display_title: display_title.to_string(),
        }),
        ..ProgressSnapshot::default()
    }
}

#[test]
fn overlay_title_appends_eta() {
    assert_eq!(overlay_title(&snapshot("My Video", 125.0)), "My Video · ETA 2m5s");
    assert_eq!(overlay_title(&snapshot("My Video", 0.0)), "My Video");
}

#[test]
fn overlay_title_hides_unknown_title() {
    assert_eq!(overlay_title(&snapshot("Unknown title", 30.0)), "");
    assert_eq!(overlay_title(&snapshot("Unknown Title", 30.0)), "");
    assert_eq!(overlay_title(&ProgressSnapshot::default()), "");
}

#[test]
fn completed_at_renders_month_and_clock() {
    let at = Utc.with_ymd_and_hms(2024, 3, 4, 12, 0, 0).unwrap();
    let rendered = live_core::format_completed_at(&at);
    assert!(rendered.contains(':'));
    assert!(rendered.ends_with("AM") || rendered.ends_with("PM"));
}

#[test]
fn counter_names_the_channel_during_channel_sweeps() {
    let count = VideoCount {
        current: 4,
        total: 12,
        ..VideoCount::default()
    };
    assert_eq!(
        counter_text(&count, Some("Channel Downloads"), Some("Tech Talks")),
        "Downloading recent from all channels. Currently \"Tech Talks\""
    );
    assert_eq!(
        counter_text(&count, Some("Channel Downloads"), None),
        "Downloading recent from all channels. Currently \"channels\""
    );
    assert_eq!(
        counter_text(&count, Some("Manually Added Urls"), Some("Tech Talks")),
        "Videos: 4 of 12"
    );
}

#[test]
fn summary_headline_and_job_labels() {
    let mut summary = FinalSummary {
        total_downloaded: 3,
        ..FinalSummary::default()
    };
    assert_eq!(final_summary_headline(&summary), "3 new videos downloaded");
    summary.total_downloaded = 1;
    summary.total_skipped = 4;
    assert_eq!(
        final_summary_headline(&summary),
        "1 new video downloaded, 4 already existed or members only"
    );

    assert_eq!(job_type_label("Channel Downloads"), "Channel update");
    assert_eq!(job_type_label("Manually Added Urls"), "Manual download");
    assert_eq!(job_type_label("Playlist"), "Playlist");
}
