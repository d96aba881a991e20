use crate::ports::outbound::{BuildEventSource, BuildHistoryGateway};
use crate::repository_detail::domain::{BuildRecord, RepositoryName};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Ids and phases of a build list; any difference means a build started or
/// changed phase.
type Fingerprint = Vec<(String, String)>;

/// BuildPoller publishes a build notification whenever the registry's
/// recent builds change between two polls.
///
/// Registries without a push channel for build events get one this way;
/// the controller cannot tell the difference.
pub struct BuildPoller<B> {
    gateway: Arc<B>,
    name: RepositoryName,
    source: BuildEventSource,
    interval: Duration,
    window: usize,
}

impl<B: BuildHistoryGateway> BuildPoller<B> {
    pub fn new(
        gateway: Arc<B>,
        name: RepositoryName,
        source: BuildEventSource,
        interval: Duration,
        window: usize,
    ) -> Self {
        Self {
            gateway,
            name,
            source,
            interval,
            window,
        }
    }

    /// Polls until `shutdown` resolves. The first successful poll only
    /// records a baseline.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last: Option<Fingerprint> = None;

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    let records = match self.gateway.fetch_builds(&self.name, self.window).await {
                        Ok(records) => records,
                        Err(e) => {
                            warn!(repository = %self.name, error = %e, "build poll failed");
                            continue;
                        }
                    };

                    let current = fingerprint(&records);
                    if last.as_ref().is_some_and(|previous| *previous != current) {
                        let receivers = self.source.notify();
                        debug!(repository = %self.name, receivers, "builds changed");
                    }
                    last = Some(current);
                }
            }
        }
    }
}

fn fingerprint(records: &[BuildRecord]) -> Fingerprint {
    records
        .iter()
        .map(|record| (record.id.clone(), record.phase.as_str().to_string()))
        .collect()
}
