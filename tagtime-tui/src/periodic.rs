use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// A background task that emits a message every `period` until dropped.
///
/// The first message is sent one full period after spawning. The task also
/// ends on its own once the receiving side of the channel is gone.
#[derive(Debug)]
pub struct PeriodicTask {
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    pub fn spawn<M, F>(period: Duration, tx: UnboundedSender<M>, mut make_message: F) -> Self
    where
        M: Send + 'static,
        F: FnMut() -> M + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(make_message()).is_err() {
                    break;
                }
            }
        });

        Self { handle }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn emits_once_per_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _task = PeriodicTask::spawn(Duration::from_secs(1), tx, || "tick");

        time::sleep(Duration::from_millis(3500)).await;

        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_messages() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = PeriodicTask::spawn(Duration::from_secs(1), tx, || ());

        time::sleep(Duration::from_millis(1500)).await;
        drop(task);
        while rx.try_recv().is_ok() {}

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
    }
}
