mod build_history_window;
mod selection;
mod sort;

pub use build_history_window::{BuildHistoryWindow, BUILD_HISTORY_WINDOW_SIZE, STARTED_DISPLAY_FORMAT};
pub use selection::SelectionState;
pub use sort::{SortDirection, SortState};
