use live_client::ConnectionState;
use live_core::{LiveViewModel, Remediation, StatusView, Tone};

const RULE: &str = "----------------------------------------";

/// Renders the view model as plain terminal lines, top to bottom.
pub fn render(view: &LiveViewModel, connection: ConnectionState) -> Vec<String> {
    let mut lines = vec![format!("Youtarr live | {}", connection_label(connection))];

    if let Some(status) = &view.status {
        lines.push(status_line(status));
        lines.push(transfer_line(status));
    }

    if let Some(counter) = &view.video_count {
        lines.push(counter.text.clone());
    }

    if let Some(error) = &view.error {
        let mut line = format!("Error: {}", error.message);
        if error.remediation == Some(Remediation::OpenConfiguration) {
            line.push_str(" (update cookies on the Configuration page)");
        }
        lines.push(line);
    }

    if let Some(warning) = &view.warning {
        match &warning.reason {
            Some(reason) => lines.push(format!("Warning: {} ({})", warning.message, reason)),
            None => lines.push(format!("Warning: {}", warning.message)),
        }
    }

    if let Some(summary) = &view.final_summary {
        lines.push(format!("Summary of last job: {}", summary.headline));
        let mut detail = summary.job_label.clone();
        if let Some(at) = &summary.completed_at {
            detail.push_str(&format!(" • Completed {at}"));
        }
        if !detail.is_empty() {
            lines.push(detail);
        }
    }

    lines.push(RULE.to_string());
    if view.transcript.is_empty() {
        lines.push("No download activity yet".to_string());
    } else {
        lines.extend(view.transcript.iter().cloned());
    }
    if view.transcript_len > view.transcript.len() {
        lines.push(format!(
            "({} earlier lines)",
            view.transcript_len - view.transcript.len()
        ));
    }

    lines
}

fn connection_label(state: ConnectionState) -> String {
    match state {
        ConnectionState::Connecting => "connecting...".to_string(),
        ConnectionState::Open => "connected".to_string(),
        ConnectionState::Closed { retry_in } => {
            format!("disconnected, retrying in {}s", retry_in.as_secs_f64().ceil())
        }
        ConnectionState::Stopped => "stopped".to_string(),
    }
}

fn status_line(status: &StatusView) -> String {
    let marker = match status.tone {
        Tone::Idle => "..",
        Tone::Active => ">>",
        Tone::Stalled => "!!",
        Tone::Complete => "ok",
        Tone::Terminated => "--",
        Tone::Failed => "xx",
    };
    if status.title.is_empty() {
        format!("[{marker}] {}", status.label)
    } else {
        format!("[{marker}] {} {}", status.label, status.title)
    }
}

fn transfer_line(status: &StatusView) -> String {
    let mut line = format!(
        "     {:>5.1}%  {} / {}  {}",
        status.percent, status.downloaded, status.total, status.speed
    );
    if !status.eta.is_empty() {
        line.push_str(&format!("  ETA {}", status.eta));
    }
    line
}
