use std::collections::VecDeque;

pub const DEFAULT_MAX_TRANSCRIPT_LINES: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    /// Wall-clock `HH:MM` at which the line was received.
    pub stamp: String,
    pub text: String,
}

impl TranscriptLine {
    pub fn render(&self) -> String {
        format!("{} - {}", self.stamp, self.text)
    }
}

/// Bounded scrollback with one optionally tracked, overwritable line.
///
/// Adjacent lines never share the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    lines: VecDeque<TranscriptLine>,
    tracked: Option<usize>,
    max_lines: usize,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_TRANSCRIPT_LINES)
    }
}

impl Transcript {
    pub fn with_capacity(max_lines: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            tracked: None,
            max_lines: max_lines.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &TranscriptLine> + ExactSizeIterator {
        self.lines.iter()
    }

    pub fn tracked_index(&self) -> Option<usize> {
        self.tracked
    }

    /// Appends a line unless it repeats the last one. Returns whether it grew.
    pub fn append(&mut self, stamp: &str, text: &str) -> bool {
        if self.lines.back().is_some_and(|last| last.text == text) {
            return false;
        }
        self.lines.push_back(TranscriptLine {
            stamp: stamp.to_string(),
            text: text.to_string(),
        });
        self.enforce_cap();
        true
    }

    /// Writes a progress update for the current file.
    ///
    /// The first update after [`Transcript::release_tracked`] appends a line
    /// and tracks it; later updates overwrite the tracked line in place.
    pub fn upsert_tracked(&mut self, stamp: &str, text: &str) {
        match self.tracked.and_then(|idx| self.lines.get_mut(idx)) {
            Some(line) => {
                line.stamp = stamp.to_string();
                line.text = text.to_string();
            }
            None => {
                self.append(stamp, text);
                self.tracked = self.lines.len().checked_sub(1);
            }
        }
    }

    /// Stops tracking; the next progress update starts a fresh line.
    pub fn release_tracked(&mut self) {
        self.tracked = None;
    }

    fn enforce_cap(&mut self) {
        while self.lines.len() > self.max_lines {
            self.lines.pop_front();
            self.tracked = match self.tracked {
                Some(0) | None => None,
                Some(idx) => Some(idx - 1),
            };
        }
    }
}
