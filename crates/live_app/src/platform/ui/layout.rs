use live_core::Layout;

use crate::platform::config::LayoutChoice;

/// Terminals narrower than this get the compact transcript.
pub const COMPACT_BELOW_COLUMNS: usize = 80;

/// Width advertised by the shell, if any.
pub fn terminal_columns() -> Option<usize> {
    std::env::var("COLUMNS").ok()?.trim().parse().ok()
}

pub fn resolve_layout(choice: LayoutChoice, columns: Option<usize>) -> Layout {
    match choice {
        LayoutChoice::Wide => Layout::Wide,
        LayoutChoice::Compact => Layout::Compact,
        LayoutChoice::Auto => match columns {
            Some(width) if width < COMPACT_BELOW_COLUMNS => Layout::Compact,
            _ => Layout::Wide,
        },
    }
}
