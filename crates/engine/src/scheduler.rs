//! Ticker: a cancelable repeating frame task.
//!
//! Bridges the synchronous game loop with a tokio interval running on a dedicated
//! single-worker runtime. The loop pulls [`FrameTick`]s; [`Ticker::stop`] ends the task.

use std::io;
use std::time::Duration;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, trace};

/// Ticks buffered for a slow consumer before elapsed time is folded into later ticks.
const TICK_BACKLOG: usize = 4;

/// One frame of wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Monotonic tick number, starting at 1.
    pub seq: u64,
    /// Milliseconds since the previous delivered tick.
    pub elapsed_ms: u32,
}

/// Running ticker instance.
pub struct Ticker {
    rt: Runtime,
    ticks: mpsc::Receiver<FrameTick>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Spawn the interval task. The first tick is delivered immediately.
    pub fn start(period: Duration) -> io::Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("blockfall-ticker")
            .enable_time()
            .build()?;

        let (tick_tx, ticks) = mpsc::channel::<FrameTick>(TICK_BACKLOG);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = rt.spawn(run_ticks(period, tick_tx, stop_rx));

        debug!(period_ms = period.as_millis() as u64, "ticker started");
        Ok(Self {
            rt,
            ticks,
            stop_tx: Some(stop_tx),
            task,
        })
    }

    pub fn is_running(&self) -> bool {
        self.stop_tx.is_some() && !self.task.is_finished()
    }

    /// Cancel the task. Idempotent; ticks already queued can still be drained.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
            debug!("ticker stopped");
        }
    }

    /// Next queued tick, without waiting.
    pub fn try_recv(&mut self) -> Option<FrameTick> {
        self.ticks.try_recv().ok()
    }

    /// Wait up to `timeout` for the next tick. `None` on timeout or once stopped and drained.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<FrameTick> {
        let ticks = &mut self.ticks;
        self.rt.block_on(async move {
            tokio::time::timeout(timeout, ticks.recv())
                .await
                .ok()
                .flatten()
        })
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticks(
    period: Duration,
    tick_tx: mpsc::Sender<FrameTick>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut last = Instant::now();
    // Carries sub-millisecond remainders and ticks the consumer had no room for.
    let mut pending = Duration::ZERO;
    let mut seq: u64 = 0;

    loop {
        tokio::select! {
            _ = &mut stop_rx => break,
            now = interval.tick() => {
                let elapsed = now.saturating_duration_since(last);
                last = now;
                pending += elapsed;

                let elapsed_ms = pending.as_millis().min(u32::MAX as u128) as u32;
                let tick = FrameTick { seq: seq + 1, elapsed_ms };
                match tick_tx.try_send(tick) {
                    Ok(()) => {
                        seq += 1;
                        pending = pending.saturating_sub(Duration::from_millis(elapsed_ms as u64));
                    }
                    Err(mpsc::error::TrySendError::Full(_)) => {
                        trace!(pending_ms = elapsed_ms, "consumer behind, folding tick");
                    }
                    Err(mpsc::error::TrySendError::Closed(_)) => break,
                }
            }
        }
    }
}
