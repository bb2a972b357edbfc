use crate::state::messages::SessionRequest;
use std::time::Duration;
use swehockey_api::Refresh;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Summary statistics move slower than the event log; refresh them on every
/// fourth tick only.
const SUMMARY_EVERY: u64 = 4;

/// Watch-mode poller. Only requests partial refreshes; the line-ups are loaded once on startup.
pub struct PeriodicRefresher {
    session_requests: mpsc::Sender<SessionRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(session_requests: mpsc::Sender<SessionRequest>, period: Duration) -> Self {
        Self { session_requests, period }
    }

    pub async fn run(self) {
        let mut ticker = interval(self.period);
        // Skip the immediate first tick so the startup load isn't doubled.
        ticker.tick().await;

        let mut tick: u64 = 0;
        loop {
            ticker.tick().await;
            tick += 1;
            for target in targets_for_tick(tick) {
                if self
                    .session_requests
                    .send(SessionRequest::Refresh { target })
                    .await
                    .is_err()
                {
                    return;
                }
            }
        }
    }
}

fn targets_for_tick(tick: u64) -> Vec<Refresh> {
    if tick % SUMMARY_EVERY == 0 {
        vec![Refresh::Actions, Refresh::Summary]
    } else {
        vec![Refresh::Actions]
    }
}
