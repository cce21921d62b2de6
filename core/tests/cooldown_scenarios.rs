//! End-to-end cooldown scenarios
//!
//! Drives the store and the countdown board together, the way a front-end
//! would: mutate, sync the board from the new snapshot, read remaining time.

use std::time::Duration;

use spellwatch_core::catalog::{AbilityInfo, ChampionDetail};
use spellwatch_core::{
    Clock, CountdownBoard, HasteModifier, ManualClock, PersistedState, SpellSlot, TimerKind,
    TimerStore, TrackingVariant,
};

const T0: i64 = 1_700_000_000_000;
const POLL: Duration = Duration::from_secs(1);

fn champion_with_ult(ult: [f64; 3]) -> ChampionDetail {
    let ability = |i: usize, cooldowns: Vec<f64>| AbilityInfo {
        id: format!("Ability{i}"),
        name: format!("Ability {i}"),
        cooldowns,
    };
    ChampionDetail {
        id: "Annie".to_string(),
        name: "Annie".to_string(),
        abilities: vec![
            ability(0, vec![4.0; 5]),
            ability(1, vec![8.0; 5]),
            ability(2, vec![14.0; 5]),
            ability(3, ult.to_vec()),
        ],
    }
}

#[tokio::test(start_paused = true)]
async fn ultimate_with_hundred_haste_counts_down_and_stops() {
    let clock = ManualClock::new(T0);
    let mut store = TimerStore::new(TrackingVariant::Full, clock.clone());
    let mut board = CountdownBoard::new(clock.clone(), POLL);

    store.assign_entity(0, &champion_with_ult([80.0, 60.0, 40.0]));
    assert_eq!(store.active_base_duration(0), Some(80.0));

    store.set_primary_haste(0, 100);
    assert!(store.start(0, TimerKind::Ultimate));
    assert_eq!(store.end_time(0, TimerKind::Ultimate), Some(T0 + 40_000));

    board.sync(&store.snapshot());
    assert_eq!(board.remaining(0, TimerKind::Ultimate), 40);

    // 41 real seconds pass, one poll interval at a time
    for _ in 0..41 {
        clock.advance_secs(1);
        tokio::time::sleep(POLL).await;
    }
    tokio::time::sleep(POLL * 2).await;

    assert_eq!(board.remaining(0, TimerKind::Ultimate), 0);
    assert!(!board.is_polling(0, TimerKind::Ultimate));
    assert_eq!(board.active_pollers(), 0);
}

#[tokio::test(start_paused = true)]
async fn spell_with_both_modifiers_shows_231_on_first_tick() {
    let clock = ManualClock::new(T0);
    let mut store = TimerStore::new(TrackingVariant::Full, clock.clone());
    let mut board = CountdownBoard::new(clock.clone(), POLL);

    store.assign_entity(3, &champion_with_ult([100.0, 80.0, 60.0]));
    store.toggle_modifier(3, HasteModifier::LucidityBoots);
    store.toggle_modifier(3, HasteModifier::CosmicInsight);

    let spell = TimerKind::Spell(SpellSlot::First);
    assert!(store.start(3, spell));
    board.sync(&store.snapshot());

    assert_eq!(board.remaining(3, spell), 231);
}

#[tokio::test(start_paused = true)]
async fn restored_session_shows_no_stale_countdowns() {
    let clock = ManualClock::new(T0);
    let mut store = TimerStore::new(TrackingVariant::Full, clock.clone());
    store.assign_entity(0, &champion_with_ult([80.0, 60.0, 40.0]));
    store.start(0, TimerKind::Ultimate);
    store.start(0, TimerKind::Spell(SpellSlot::Second));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    store.save(&path).unwrap();

    // Program closed for two minutes: ultimate expired, spell still running
    clock.advance_secs(120);
    let restored = TimerStore::load_or_default(&path, TrackingVariant::Full, clock.clone());
    let mut board = CountdownBoard::new(clock.clone(), POLL);
    board.sync(&restored.snapshot());

    assert_eq!(restored.end_time(0, TimerKind::Ultimate), None);
    assert_eq!(board.remaining(0, TimerKind::Ultimate), 0);
    assert_eq!(board.remaining(0, TimerKind::Spell(SpellSlot::Second)), 180);
    assert_eq!(board.active_pollers(), 1);
}

#[test]
fn auxiliary_ten_seconds_past_restores_inactive() {
    let clock = ManualClock::new(T0);
    let mut store = TimerStore::new(TrackingVariant::Simplified, clock.clone());
    store.assign_entity(4, &champion_with_ult([80.0, 60.0, 40.0]));
    store.start(4, TimerKind::Spell(SpellSlot::First));

    let json = serde_json::to_string(&store.to_persisted()).unwrap();
    // Move the clock just past the persisted end time + 10s
    let end = store.end_time(4, TimerKind::Spell(SpellSlot::First)).unwrap();
    clock.set(end + 10_000);

    let state: PersistedState = serde_json::from_str(&json).unwrap();
    let restored = TimerStore::restore(state, TrackingVariant::Simplified, clock.clone()).unwrap();
    assert_eq!(restored.remaining_secs(4, TimerKind::Spell(SpellSlot::First)), 0);
    assert_eq!(restored.end_time(4, TimerKind::Spell(SpellSlot::First)), None);
    assert!(clock.now_ms() > end);
}
