//! Board refresh background task
//!
//! Periodically refreshes one departure board. Every board gets its own task
//! so a slow stop never delays the others.

use std::sync::Arc;
use std::time::Duration;

use application::DepartureBoard;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Spawn a background task that refreshes `board` every `interval`.
///
/// With `refresh_immediately` the first refresh runs right away, otherwise
/// it runs after one full interval.
///
/// Returns a `JoinHandle` that can be used to abort the task on shutdown.
pub fn spawn_board_refresh_task(
    board: Arc<DepartureBoard>,
    interval: Duration,
    refresh_immediately: bool,
) -> tokio::task::JoinHandle<()> {
    info!(
        board = %board.unique_id(),
        interval_secs = interval.as_secs(),
        "Starting board refresh background task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick completes immediately
        if !refresh_immediately {
            ticker.tick().await;
        }

        loop {
            ticker.tick().await;
            let snapshot = board.refresh().await;
            debug!(board = %snapshot.unique_id, state = %snapshot.state, "Board refresh tick");
        }
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use application::{ApplicationError, BoardSettings, DeparturePort, DepartureService};
    use async_trait::async_trait;
    use domain::{Departure, DepartureQuery};

    use super::*;

    #[derive(Default)]
    struct CountingPort {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DeparturePort for CountingPort {
        async fn fetch_departures(
            &self,
            _query: &DepartureQuery,
        ) -> Result<Vec<Departure>, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn is_available(&self) -> bool {
            true
        }
    }

    fn board(port: Arc<CountingPort>) -> Arc<DepartureBoard> {
        let service = Arc::new(DepartureService::new(port));
        Arc::new(DepartureBoard::new(BoardSettings::new("1"), service))
    }

    #[tokio::test(start_paused = true)]
    async fn refreshes_on_every_tick() {
        let port = Arc::new(CountingPort::default());
        let handle = spawn_board_refresh_task(board(port.clone()), Duration::from_secs(90), true);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(port.calls.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(port.calls.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_start_waits_one_interval() {
        let port = Arc::new(CountingPort::default());
        let handle = spawn_board_refresh_task(board(port.clone()), Duration::from_secs(90), false);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(90)).await;
        assert_eq!(port.calls.load(Ordering::SeqCst), 1);

        handle.abort();
    }
}
