//! Broadcast inputs the detail controller reacts to without owning.
//!
//! Sources hand out receivers; the controller holds them between
//! `activate` and `deactivate`, and dropping a receiver is the unsubscribe.

use tokio::sync::{broadcast, watch};

/// Buffered notifications per subscriber before older ones are dropped.
/// A dropped notification is harmless: one reload covers any number of them.
const BUILD_EVENT_CAPACITY: usize = 16;

/// "A build was started or finished" - no payload beyond the occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildNotification;

/// Fan-out source of build notifications
#[derive(Debug, Clone)]
pub struct BuildEventSource {
    sender: broadcast::Sender<BuildNotification>,
}

impl BuildEventSource {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUILD_EVENT_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BuildNotification> {
        self.sender.subscribe()
    }

    /// Publishes a notification; returns how many subscribers received it
    pub fn notify(&self) -> usize {
        self.sender.send(BuildNotification).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BuildEventSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Session-wide "viewer may manage builds" flag
#[derive(Debug, Clone)]
pub struct PermissionBroadcast {
    sender: watch::Sender<bool>,
}

impl PermissionBroadcast {
    pub fn new(initial: bool) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }

    /// Stores the new value even when nobody is subscribed
    pub fn publish(&self, allowed: bool) {
        self.sender.send_replace(allowed);
    }

    pub fn current(&self) -> bool {
        *self.sender.borrow()
    }
}

/// Receivers handed to the controller on activation
#[derive(Debug, Default)]
pub struct Subscriptions {
    pub build_events: Option<broadcast::Receiver<BuildNotification>>,
    pub permission: Option<watch::Receiver<bool>>,
}

impl Subscriptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_build_events(mut self, source: &BuildEventSource) -> Self {
        self.build_events = Some(source.subscribe());
        self
    }

    pub fn with_permission(mut self, broadcast: &PermissionBroadcast) -> Self {
        self.permission = Some(broadcast.subscribe());
        self
    }
}
