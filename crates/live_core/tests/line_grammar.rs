use live_core::line::{classify, strip_repeated_tag, video_name_from_path, LineKind};

#[test]
fn percentage_lines_are_progress() {
    assert_eq!(
        classify("[download]  45.0% of 10.00MiB at 1.00MiB/s ETA 00:05"),
        Some(LineKind::Progress {
            text: "45.0% of 10.00MiB at 1.00MiB/s ETA 00:05".to_string()
        })
    );
    assert_eq!(
        classify("[download] 45.0% of 10.00MiB"),
        Some(LineKind::Progress {
            text: "45.0% of 10.00MiB".to_string()
        })
    );
    assert_eq!(
        classify("[download] 100% of 10.00MiB in 00:00:04"),
        Some(LineKind::Progress {
            text: "100% of 10.00MiB in 00:00:04".to_string()
        })
    );
}

#[test]
fn unknown_eta_and_existing_files_are_progress() {
    assert!(matches!(
        classify("[download] Unknown% of ~1.00MiB ETA Unknown"),
        Some(LineKind::Progress { .. })
    ));
    assert_eq!(
        classify("[download] /out/Clip [abc].mp4 has already been downloaded"),
        Some(LineKind::Progress {
            text: "/out/Clip [abc].mp4 has already been downloaded".to_string()
        })
    );
}

#[test]
fn destination_lines_carry_video_name() {
    assert_eq!(
        classify("[download] Destination: /x/My Video-abc123xyz012.mp4"),
        Some(LineKind::Destination {
            name: "My Video".to_string()
        })
    );
    assert_eq!(
        classify("[download] Destination: C:\\media\\Chan - Title [dQw4w9WgXcQ].f137.mp4"),
        Some(LineKind::Destination {
            name: "Chan - Title".to_string()
        })
    );
}

#[test]
fn video_name_keeps_dots_inside_title() {
    assert_eq!(video_name_from_path("/a/Mr. Smith [dQw4w9WgXcQ].mp4"), "Mr. Smith");
    assert_eq!(video_name_from_path("plain.webm"), "plain");
}

#[test]
fn repeated_tag_is_truncated() {
    assert_eq!(
        strip_repeated_tag("[download]  10.0% of 5MiB[download]  11.0% of 5MiB"),
        "[download]  10.0% of 5MiB"
    );
    assert_eq!(strip_repeated_tag("no tags here"), "no tags here");
    assert_eq!(
        classify("[download]  10.0% of 5MiB [download]  11.0% of 5MiB"),
        Some(LineKind::Progress {
            text: "10.0% of 5MiB".to_string()
        })
    );
}

#[test]
fn status_markers_are_recognized() {
    assert_eq!(
        classify("Completed: 3 videos downloaded"),
        Some(LineKind::Completed {
            text: "Completed: 3 videos downloaded".to_string()
        })
    );
    assert_eq!(
        classify("[youtube] Extracting URL: https://youtu.be/abc"),
        Some(LineKind::ExtractingUrl)
    );
    assert_eq!(
        classify("[youtube:tab] Extracting URL: https://youtube.com/@chan"),
        Some(LineKind::ExtractingUrl)
    );
    assert_eq!(
        classify("[Metadata] Adding metadata to \"/x/a.mp4\""),
        Some(LineKind::AddingMetadata)
    );
    assert_eq!(
        classify("[Merger] Merging formats into \"/x/a.mp4\""),
        Some(LineKind::MergingFormats)
    );
    assert_eq!(
        classify("[download] abc123: has already been recorded in the archive"),
        Some(LineKind::AlreadyRecorded)
    );
}

#[test]
fn counter_lines_are_parsed() {
    assert_eq!(
        classify("[youtube:tab] Playlist Chan - Videos: Downloading 5 items of 12"),
        Some(LineKind::PlaylistTotal { total: 12 })
    );
    assert_eq!(
        classify("[download] Downloading item 3 of 12"),
        Some(LineKind::ItemStarted {
            current: 3,
            total: 12
        })
    );
}

#[test]
fn unrecognized_lines_are_ignored() {
    assert_eq!(classify(""), None);
    assert_eq!(classify("   "), None);
    assert_eq!(classify("[info] Writing video metadata"), None);
    assert_eq!(classify("Initiating download..."), None);
    assert_eq!(classify("[download] Downloading playlist: Chan - Videos"), None);
}
