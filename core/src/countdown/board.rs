//! Countdowns for every tracked timer
//!
//! One observer per (slot, timer). The board is fed store snapshots and
//! re-arms only the observers whose end time changed.

use std::time::Duration;

use super::observer::{Countdown, CountdownObserver};
use crate::clock::Clock;
use crate::slot::{SLOT_COUNT, Slots, TimerKind};

#[derive(Debug)]
pub struct CountdownBoard<C: Clock> {
    observers: [[CountdownObserver<C>; 3]; SLOT_COUNT],
}

impl<C: Clock> CountdownBoard<C> {
    pub fn new(clock: C, poll_interval: Duration) -> Self {
        Self {
            observers: std::array::from_fn(|_| {
                std::array::from_fn(|_| CountdownObserver::new(clock.clone(), poll_interval))
            }),
        }
    }

    /// Bring every observer in line with a store snapshot
    pub fn sync(&mut self, slots: &Slots) {
        for (observers, slot) in self.observers.iter_mut().zip(slots.iter()) {
            for kind in TimerKind::ALL {
                observers[kind.index()].observe(slot.end_time(kind));
            }
        }
    }

    /// Host came back from the background: recompute everything now
    pub fn resume(&mut self) {
        tracing::debug!("Resyncing all countdowns");
        for observer in self.observers.iter_mut().flatten() {
            observer.force_resync();
        }
    }

    /// Stop all polling, e.g. when the host is torn down
    pub fn cancel_all(&mut self) {
        for observer in self.observers.iter_mut().flatten() {
            observer.cancel();
        }
    }

    pub fn observer(&self, index: usize, kind: TimerKind) -> Option<&CountdownObserver<C>> {
        self.observers.get(index).map(|row| &row[kind.index()])
    }

    /// Whole seconds remaining; 0 for inactive timers and bad indices
    pub fn remaining(&self, index: usize, kind: TimerKind) -> u64 {
        self.observer(index, kind).map_or(0, |o| o.remaining())
    }

    pub fn is_polling(&self, index: usize, kind: TimerKind) -> bool {
        self.observer(index, kind).is_some_and(|o| o.is_polling())
    }

    /// Number of observers with a live polling task
    pub fn active_pollers(&self) -> usize {
        self.observers
            .iter()
            .flatten()
            .filter(|o| o.is_polling())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use spellwatch_types::TrackingVariant;

    use super::*;
    use crate::catalog::{AbilityInfo, ChampionDetail};
    use crate::clock::ManualClock;
    use crate::slot::SpellSlot;
    use crate::store::TimerStore;

    const T0: i64 = 1_700_000_000_000;

    fn detail() -> ChampionDetail {
        ChampionDetail {
            id: "Ahri".to_string(),
            name: "Ahri".to_string(),
            abilities: (0..4)
                .map(|i| AbilityInfo {
                    id: format!("A{i}"),
                    name: format!("A{i}"),
                    cooldowns: vec![80.0, 60.0, 40.0],
                })
                .collect(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn follows_store_snapshots() {
        let clock = ManualClock::new(T0);
        let mut store = TimerStore::new(TrackingVariant::Full, clock.clone());
        let mut board = CountdownBoard::new(clock.clone(), Duration::from_secs(1));

        store.assign_entity(1, &detail());
        store.start(1, TimerKind::Ultimate);
        board.sync(&store.snapshot());

        assert_eq!(board.remaining(1, TimerKind::Ultimate), 80);
        assert!(board.is_polling(1, TimerKind::Ultimate));
        assert_eq!(board.active_pollers(), 1);

        store.clear(1, TimerKind::Ultimate);
        board.sync(&store.snapshot());
        assert_eq!(board.remaining(1, TimerKind::Ultimate), 0);
        assert_eq!(board.active_pollers(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_recomputes_all() {
        let clock = ManualClock::new(T0);
        let mut store = TimerStore::new(TrackingVariant::Full, clock.clone());
        let mut board = CountdownBoard::new(clock.clone(), Duration::from_secs(1));

        store.assign_entity(0, &detail());
        store.start(0, TimerKind::Ultimate);
        store.start(0, TimerKind::Spell(SpellSlot::First));
        board.sync(&store.snapshot());
        board.cancel_all();

        clock.advance_secs(50);
        board.resume();
        assert_eq!(board.remaining(0, TimerKind::Ultimate), 30);
        assert_eq!(board.remaining(0, TimerKind::Spell(SpellSlot::First)), 250);
        assert_eq!(board.active_pollers(), 2);
    }

    #[test]
    fn bad_index_reads_zero() {
        let board = CountdownBoard::new(ManualClock::new(T0), Duration::from_secs(1));
        assert_eq!(board.remaining(9, TimerKind::Ultimate), 0);
        assert!(!board.is_polling(9, TimerKind::Ultimate));
    }
}
