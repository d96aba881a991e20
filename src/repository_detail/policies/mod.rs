mod image_dedup;
mod tag_window;

pub use image_dedup::{ImageDedupPolicy, SecurityLookup};
pub use tag_window::{TagWindowPolicy, TAG_WINDOW_SIZE};
