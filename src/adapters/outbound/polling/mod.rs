/// Polling adapters that turn periodic gateway reads into notifications
mod build_poller;

pub use build_poller::BuildPoller;
