use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Deliver `Msg::SummaryHoldElapsed { generation }` after `after`.
    ScheduleSummaryClear { generation: u64, after: Duration },
}
