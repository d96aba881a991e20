use crate::repository_detail::domain::{Build, BuildRecord};
use chrono::{DateTime, FixedOffset, Offset, Utc};

/// Number of builds fetched for the detail page
pub const BUILD_HISTORY_WINDOW_SIZE: usize = 5;

/// Date plus hour and minute; no seconds, no offset
pub const STARTED_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// BuildHistoryWindow turns gateway build records into view-ready builds
///
/// Every returned build carries its display timestamp, and the list never
/// grows past the window even if the gateway returns more records.
#[derive(Debug, Clone)]
pub struct BuildHistoryWindow {
    size: usize,
    offset: FixedOffset,
}

impl BuildHistoryWindow {
    pub fn new(size: usize, offset: FixedOffset) -> Self {
        Self { size, offset }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Formats `started` in the configured offset
    pub fn format_started(&self, started: DateTime<Utc>) -> String {
        started
            .with_timezone(&self.offset)
            .format(STARTED_DISPLAY_FORMAT)
            .to_string()
    }

    /// Builds the replacement history list from `records`
    pub fn apply(&self, records: Vec<BuildRecord>) -> Vec<Build> {
        records
            .into_iter()
            .take(self.size)
            .map(|record| {
                let formatted = self.format_started(record.started);
                Build::new(record, formatted)
            })
            .collect()
    }
}

impl Default for BuildHistoryWindow {
    fn default() -> Self {
        Self::new(BUILD_HISTORY_WINDOW_SIZE, Utc.fix())
    }
}
