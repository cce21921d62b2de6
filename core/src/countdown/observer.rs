//! Single-timer countdown
//!
//! A `CountdownObserver` turns an absolute end time into a "whole seconds
//! remaining" value. The value is always re-derived from the clock, never
//! decremented, so it cannot drift over long runs or across a suspended
//! process.
//!
//! # Polling
//!
//! While the timer is running a tokio task re-derives the value once per
//! poll interval and stops by itself when it reaches zero. Any change of end
//! time aborts the current task before a new one is spawned, and dropping
//! the observer aborts it too.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::cooldown;

/// Host-facing control surface of a countdown
pub trait Countdown {
    /// Re-derive remaining seconds from the clock and publish them
    fn on_tick(&self) -> u64;

    /// Stop polling without changing the end time
    fn cancel(&mut self);

    /// Recompute immediately and restart polling if still running.
    /// Hosts call this when the program returns from the background.
    fn force_resync(&mut self);
}

pub struct CountdownObserver<C: Clock> {
    clock: C,
    poll_interval: Duration,
    end_time: Option<i64>,
    remaining: Arc<watch::Sender<u64>>,
    poller: Option<JoinHandle<()>>,
}

impl<C: Clock> CountdownObserver<C> {
    pub fn new(clock: C, poll_interval: Duration) -> Self {
        let (remaining, _) = watch::channel(0);
        Self {
            clock,
            poll_interval,
            end_time: None,
            remaining: Arc::new(remaining),
            poller: None,
        }
    }

    /// Point the countdown at a new end time (`None` = inactive).
    ///
    /// Observing the end time already being observed does nothing.
    pub fn observe(&mut self, end_time: Option<i64>) {
        if end_time == self.end_time {
            return;
        }

        self.cancel();
        self.end_time = end_time;

        if end_time.is_none() {
            self.remaining.send_replace(0);
            return;
        }
        if self.on_tick() > 0 {
            self.spawn_poller();
        }
    }

    pub fn end_time(&self) -> Option<i64> {
        self.end_time
    }

    /// Last published whole seconds remaining
    pub fn remaining(&self) -> u64 {
        *self.remaining.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.remaining.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn spawn_poller(&mut self) {
        let Some(end) = self.end_time else {
            return;
        };
        let Ok(runtime) = Handle::try_current() else {
            tracing::warn!("No async runtime, countdown will only update on resync");
            return;
        };

        let clock = self.clock.clone();
        let remaining = Arc::clone(&self.remaining);
        let interval = self.poll_interval;

        self.poller = Some(runtime.spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                let left = cooldown::remaining_secs(end, clock.now_ms());
                remaining.send_replace(left);
                if left == 0 {
                    tracing::debug!(end, "Countdown finished");
                    break;
                }
            }
        }));
    }
}

impl<C: Clock> Countdown for CountdownObserver<C> {
    fn on_tick(&self) -> u64 {
        let left = self
            .end_time
            .map_or(0, |end| cooldown::remaining_secs(end, self.clock.now_ms()));
        self.remaining.send_replace(left);
        left
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.poller.take() {
            handle.abort();
        }
    }

    fn force_resync(&mut self) {
        self.cancel();
        if self.on_tick() > 0 {
            self.spawn_poller();
        }
    }
}

impl<C: Clock> Drop for CountdownObserver<C> {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl<C: Clock> std::fmt::Debug for CountdownObserver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountdownObserver")
            .field("end_time", &self.end_time)
            .field("remaining", &self.remaining())
            .field("polling", &self.is_polling())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    const T0: i64 = 1_700_000_000_000;
    const TICK: Duration = Duration::from_secs(1);

    fn observer() -> (CountdownObserver<ManualClock>, ManualClock) {
        let clock = ManualClock::new(T0);
        (CountdownObserver::new(clock.clone(), TICK), clock)
    }

    /// Let the poller run at least one more tick
    async fn next_tick() {
        tokio::time::sleep(TICK + TICK / 2).await;
    }

    #[tokio::test(start_paused = true)]
    async fn computes_immediately_on_observe() {
        let (mut obs, _) = observer();
        obs.observe(Some(T0 + 40_000));
        assert_eq!(obs.remaining(), 40);
        assert!(obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn rederives_from_clock_on_each_tick() {
        let (mut obs, clock) = observer();
        obs.observe(Some(T0 + 40_000));

        // Wall clock jumps 10s while only one poll interval passes
        clock.advance_secs(10);
        next_tick().await;
        assert_eq!(obs.remaining(), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_polling_at_zero() {
        let (mut obs, clock) = observer();
        obs.observe(Some(T0 + 40_000));

        clock.advance_secs(41);
        next_tick().await;
        assert_eq!(obs.remaining(), 0);
        assert!(!obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn past_end_time_never_polls() {
        let (mut obs, _) = observer();
        obs.observe(Some(T0 - 10_000));
        assert_eq!(obs.remaining(), 0);
        assert!(!obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn deactivation_zeroes_and_stops() {
        let (mut obs, _) = observer();
        obs.observe(Some(T0 + 40_000));
        obs.observe(None);
        assert_eq!(obs.remaining(), 0);
        assert!(!obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn force_resync_catches_up_after_suspension() {
        let (mut obs, clock) = observer();
        obs.observe(Some(T0 + 40_000));

        // Suspended: polling stopped, wall clock kept moving
        obs.cancel();
        clock.advance_secs(25);
        assert_eq!(obs.remaining(), 40);

        obs.force_resync();
        assert_eq!(obs.remaining(), 15);
        assert!(obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn force_resync_after_expiry_stays_idle() {
        let (mut obs, clock) = observer();
        obs.observe(Some(T0 + 5_000));
        obs.cancel();

        clock.advance_secs(60);
        obs.force_resync();
        assert_eq!(obs.remaining(), 0);
        assert!(!obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn rearm_replaces_previous_poller() {
        let (mut obs, clock) = observer();
        obs.observe(Some(T0 + 5_000));
        obs.observe(Some(T0 + 100_000));

        // A leaked poller for the first end time would publish 0 here
        clock.advance_secs(6);
        for _ in 0..3 {
            next_tick().await;
            assert_eq!(obs.remaining(), 94);
        }
        assert!(obs.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn same_end_time_is_not_rearmed() {
        let (mut obs, clock) = observer();
        obs.observe(Some(T0 + 40_000));
        clock.advance_secs(3);

        // Re-observing does not recompute; only the poller or a resync does
        obs.observe(Some(T0 + 40_000));
        assert_eq!(obs.remaining(), 40);
        next_tick().await;
        assert_eq!(obs.remaining(), 37);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_poller() {
        let (mut obs, _) = observer();
        obs.observe(Some(T0 + 40_000));
        let mut rx = obs.subscribe();
        rx.borrow_and_update();

        drop(obs);
        // Channel closes once the aborted poller releases its sender
        assert!(rx.changed().await.is_err());
    }

    #[test]
    fn without_runtime_only_resync_updates() {
        let clock = ManualClock::new(T0);
        let mut obs = CountdownObserver::new(clock.clone(), TICK);
        obs.observe(Some(T0 + 40_000));
        assert_eq!(obs.remaining(), 40);
        assert!(!obs.is_polling());

        clock.advance_secs(10);
        obs.force_resync();
        assert_eq!(obs.remaining(), 30);
    }
}
