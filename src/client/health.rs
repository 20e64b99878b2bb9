use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::ApiClient;

/// Shortest polling period; shorter requests, including zero, are raised to it.
pub const MIN_CHECK_INTERVAL: Duration = Duration::from_millis(10);

/// Last observed availability of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiStatus {
    #[default]
    Checking,
    Online,
    Offline,
}

impl ApiStatus {
    pub fn message(&self) -> &'static str {
        match self {
            ApiStatus::Online => "API is online and ready",
            ApiStatus::Offline => "API is offline - check if backend is running",
            ApiStatus::Checking => "Checking API status...",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ApiStatus::Online)
    }
}

/// Polls the service health endpoint in the background.
///
/// The first probe runs immediately, then once per interval. Polling stops when the
/// monitor is stopped or dropped.
pub struct HealthMonitor {
    status: watch::Receiver<ApiStatus>,
    task: JoinHandle<()>,
}

impl HealthMonitor {
    pub fn start(client: ApiClient, every: Duration) -> Self {
        let (tx, rx) = watch::channel(ApiStatus::Checking);
        let every = every.max(MIN_CHECK_INTERVAL);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let status = client.check_health().await;
                tx.send_if_modified(|current| {
                    if *current == status {
                        return false;
                    }
                    tracing::info!(from = ?*current, to = ?status, "service status changed");
                    *current = status;
                    true
                });
            }
        });

        Self { status: rx, task }
    }

    pub fn status(&self) -> ApiStatus {
        *self.status.borrow()
    }

    /// A receiver notified on every status transition.
    pub fn subscribe(&self) -> watch::Receiver<ApiStatus> {
        self.status.clone()
    }

    pub fn stop(self) {}
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
