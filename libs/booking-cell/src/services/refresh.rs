// libs/booking-cell/src/services/refresh.rs
use chrono::NaiveDateTime;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use scheduling_cell::services::clock::Clock;
use shared_config::AppConfig;

/// Periodically republishes "now" so subscribers can re-classify today's
/// slots against the booking cutoff. The background task stops when the
/// refresher is dropped.
pub struct CutoffRefresher {
    handle: JoinHandle<()>,
    receiver: watch::Receiver<NaiveDateTime>,
}

impl CutoffRefresher {
    pub fn spawn(clock: Arc<dyn Clock>, config: &AppConfig) -> Self {
        Self::spawn_with_period(clock, Duration::from_secs(config.cutoff_refresh_secs))
    }

    pub fn spawn_with_period(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (sender, receiver) = watch::channel(clock.now());

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; the initial value already
            // covers it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let now = clock.now();
                debug!("Cutoff refresh tick at {}", now);
                if sender.send(now).is_err() {
                    break;
                }
            }
        });

        Self { handle, receiver }
    }

    /// Watch channel carrying the latest published time.
    pub fn subscribe(&self) -> watch::Receiver<NaiveDateTime> {
        self.receiver.clone()
    }

    pub fn latest(&self) -> NaiveDateTime {
        *self.receiver.borrow()
    }
}

impl Drop for CutoffRefresher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
