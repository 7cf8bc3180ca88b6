//! Grammar for the free-text lines the downloader prints.
//!
//! Each recognized shape maps to one [`LineKind`]; anything else is ignored by
//! the decoder. Patterns are checked in table order, first match wins.

use std::sync::LazyLock;

use regex::Regex;

const DOWNLOAD_TAG: &str = "[download]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// A new file starts; carries the cleaned-up video name.
    Destination { name: String },
    /// Percentage/ETA/finished update for the current file, tag removed.
    Progress { text: String },
    /// `Completed: ...` summary printed at the end of a run.
    Completed { text: String },
    ExtractingUrl,
    AddingMetadata,
    MergingFormats,
    AlreadyRecorded,
    PlaylistTotal { total: u32 },
    ItemStarted { current: u32, total: u32 },
}

struct Rule {
    pattern: Regex,
    build: fn(&regex::Captures<'_>, &str) -> Option<LineKind>,
}

fn rule(pattern: &str, build: fn(&regex::Captures<'_>, &str) -> Option<LineKind>) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("line pattern compiles"),
        build,
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"Destination:\s*(?P<path>.+)$", |caps, _| {
            Some(LineKind::Destination {
                name: video_name_from_path(&caps["path"]),
            })
        }),
        rule(r"^\[download\] Downloading item (?P<n>\d+) of (?P<m>\d+)", |caps, _| {
            Some(LineKind::ItemStarted {
                current: caps["n"].parse().ok()?,
                total: caps["m"].parse().ok()?,
            })
        }),
        rule(
            r"^\[download\]\s+(?:\d{1,3}(?:\.\d+)?%|.*\bETA\b|.*has already been downloaded)",
            |_, line| {
                Some(LineKind::Progress {
                    text: line.trim_start_matches(DOWNLOAD_TAG).trim().to_string(),
                })
            },
        ),
        rule(r"^Completed:", |_, line| {
            Some(LineKind::Completed {
                text: line.to_string(),
            })
        }),
        rule(r"\[youtube(?::tab)?\] Extracting URL:", |_, _| {
            Some(LineKind::ExtractingUrl)
        }),
        rule(r"\[youtube:tab\].*Downloading (?P<n>\d+) items of (?P<m>\d+)", |caps, _| {
            Some(LineKind::PlaylistTotal {
                total: caps["m"].parse().ok()?,
            })
        }),
        rule(r"\[Metadata\] Adding metadata", |_, _| Some(LineKind::AddingMetadata)),
        rule(r"\[Merger\] Merging formats", |_, _| Some(LineKind::MergingFormats)),
        rule(r"has already been recorded in the archive", |_, _| {
            Some(LineKind::AlreadyRecorded)
        }),
    ]
});

static EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.f\d+)?\.[^.]+$").expect("extension pattern compiles"));
static ID_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\s+\[[^\]]+\]|-[A-Za-z0-9_-]{11,12})$").expect("id suffix pattern compiles")
});

/// Drops everything from the second `[download]` tag onward.
///
/// The downloader occasionally flushes two progress updates into one line.
pub fn strip_repeated_tag(line: &str) -> &str {
    match line.find(DOWNLOAD_TAG) {
        Some(first) => {
            let rest_start = first + DOWNLOAD_TAG.len();
            match line[rest_start..].find(DOWNLOAD_TAG) {
                Some(offset) => line[..rest_start + offset].trim_end(),
                None => line,
            }
        }
        None => line,
    }
}

/// Classifies one trimmed line; `None` for lines the decoder ignores.
pub fn classify(line: &str) -> Option<LineKind> {
    let line = strip_repeated_tag(line.trim());
    if line.is_empty() {
        return None;
    }
    RULES.iter().find_map(|rule| {
        rule.pattern
            .captures(line)
            .and_then(|caps| (rule.build)(&caps, line))
    })
}

/// Extracts a display name from a destination path.
///
/// Keeps the last path component, removes the (format-qualified) extension,
/// then the trailing video id written by the output template.
pub fn video_name_from_path(path: &str) -> String {
    let filename = path
        .trim()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let stem = EXTENSION.replace(filename, "");
    ID_SUFFIX.replace(&stem, "").trim().to_string()
}
