use chrono::{Local, TimeZone};
use std::io::Write;

use spellwatch_core::catalog::champion_icon_url;
use spellwatch_core::slot::parse_haste;
use spellwatch_core::{
    AppConfigExt, Clock, EntitySlot, HasteModifier, SLOT_COUNT, SpellSlot, TimerKind,
};

use crate::CliContext;

// ─────────────────────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────────────────────

pub async fn list_champions(ctx: &mut CliContext, filter: Option<&str>) {
    let version = match ctx.patch_version().await {
        Ok(v) => v,
        Err(e) => return report_catalog_error("resolve patch version", &e),
    };
    let champions = match ctx.catalog.champions(&version).await {
        Ok(list) => list,
        Err(e) => return report_catalog_error("fetch champion list", &e),
    };

    let filter = filter.map(str::to_lowercase);
    let matching: Vec<_> = champions
        .iter()
        .filter(|c| {
            filter
                .as_deref()
                .is_none_or(|f| c.name.to_lowercase().contains(f) || c.id.to_lowercase().contains(f))
        })
        .collect();

    if matching.is_empty() {
        println!("No champions match");
        return;
    }

    println!("{:<20} {:<20} Icon", "Name", "Id");
    println!("{}", "-".repeat(80));
    for champion in &matching {
        let icon = champion_icon_url(ctx.catalog.source().base_url(), &version, &champion.icon);
        println!("{:<20} {:<20} {}", champion.name, champion.id, icon);
    }
    println!("\nTotal: {} champions (patch {})", matching.len(), version);
}

pub async fn list_spells(ctx: &mut CliContext) {
    let version = match ctx.patch_version().await {
        Ok(v) => v,
        Err(e) => return report_catalog_error("resolve patch version", &e),
    };
    let mode = ctx.config.catalog.game_mode.clone();
    let spells = match ctx.catalog.spells(&version, &mode).await {
        Ok(list) => list,
        Err(e) => return report_catalog_error("fetch summoner spells", &e),
    };

    println!("{:<20} {:<24} Cooldown", "Name", "Id");
    println!("{}", "-".repeat(60));
    for spell in &spells {
        println!("{:<20} {:<24} {}s", spell.name, spell.id, spell.cooldown_secs());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Slot Mutations
// ─────────────────────────────────────────────────────────────────────────────

pub async fn assign_champion(ctx: &mut CliContext, index: usize, query: &str) {
    let version = match ctx.patch_version().await {
        Ok(v) => v,
        Err(e) => return report_catalog_error("resolve patch version", &e),
    };

    let summary = match ctx.catalog.find_champion(&version, query).await {
        Ok(Some(summary)) => summary,
        Ok(None) => {
            println!("No champion named '{query}'");
            return;
        }
        Err(e) => return report_catalog_error("fetch champion list", &e),
    };

    // Only a fully fetched detail record ever reaches the store
    let detail = match ctx.catalog.champion_detail(&summary.id, &version).await {
        Ok(detail) => detail,
        Err(e) => return report_catalog_error("fetch champion detail", &e),
    };

    if ctx.store.assign_entity(index, &detail) {
        ctx.commit();
        let table = detail.ultimate_cooldowns();
        println!(
            "Slot {}: {} (ult {}/{}/{}s)",
            index + 1,
            detail.name,
            table[0],
            table[1],
            table[2]
        );
    }
}

pub async fn assign_spell(ctx: &mut CliContext, index: usize, which: SpellSlot, query: &str) {
    if !ctx.store.variant().tracks_spell_details() {
        println!("Spell assignment is not used in simplified mode");
        return;
    }

    let version = match ctx.patch_version().await {
        Ok(v) => v,
        Err(e) => return report_catalog_error("resolve patch version", &e),
    };
    let mode = ctx.config.catalog.game_mode.clone();

    let spell = match ctx.catalog.find_spell(&version, &mode, query).await {
        Ok(Some(spell)) => spell,
        Ok(None) => {
            println!("No summoner spell named '{query}'");
            return;
        }
        Err(e) => return report_catalog_error("fetch summoner spells", &e),
    };

    if ctx.store.assign_auxiliary(index, which, &spell) {
        ctx.commit();
        println!("Slot {}: {} ({}s)", index + 1, spell.name, spell.cooldown_secs());
    }
}

pub fn clear_slot(ctx: &mut CliContext, index: usize) {
    if ctx.store.clear_entity(index) {
        ctx.commit();
        println!("Slot {} cleared", index + 1);
    }
}

pub fn cycle_tier(ctx: &mut CliContext, index: usize) {
    if ctx.store.cycle_tier(index) {
        ctx.commit();
        if let Some(slot) = ctx.store.slot(index) {
            println!(
                "Slot {}: ult {} ({})",
                index + 1,
                slot.tier(),
                format_base(slot.active_base_duration())
            );
        }
    }
}

pub fn set_haste(ctx: &mut CliContext, index: usize, input: &str) {
    let haste = parse_haste(input);
    if ctx.store.set_primary_haste(index, haste) {
        ctx.commit();
    }
    println!("Slot {}: ability haste {}", index + 1, haste);
}

pub fn toggle_modifier(ctx: &mut CliContext, index: usize, modifier: HasteModifier) {
    if !ctx.store.toggle_modifier(index, modifier) {
        println!("Haste modifiers are not used in simplified mode");
        return;
    }
    ctx.commit();
    if let Some(slot) = ctx.store.slot(index) {
        let state = if slot.modifiers().is_active(modifier) { "on" } else { "off" };
        println!(
            "Slot {}: {} {} (summoner spell haste {})",
            index + 1,
            modifier.label(),
            state,
            slot.secondary_haste()
        );
    }
}

pub fn start_timer(ctx: &mut CliContext, index: usize, kind: TimerKind) {
    if ctx.store.start(index, kind) {
        ctx.commit();
        println!(
            "Slot {}: {} on cooldown, {}",
            index + 1,
            kind,
            format_remaining(ctx.board.remaining(index, kind))
        );
    } else {
        println!("Slot {}: {} not started", index + 1, kind);
    }
}

pub fn cancel_timer(ctx: &mut CliContext, index: usize, kind: TimerKind) {
    if ctx.store.clear(index, kind) {
        ctx.commit();
    }
    println!("Slot {}: {} ready", index + 1, kind);
}

pub fn reset_all(ctx: &mut CliContext) {
    ctx.store.reset_all();
    ctx.commit();
    println!("All slots cleared");
}

// ─────────────────────────────────────────────────────────────────────────────
// Display
// ─────────────────────────────────────────────────────────────────────────────

pub fn show_slots(ctx: &CliContext) {
    let snapshot = ctx.store.snapshot();

    println!(
        "{:<3} {:<14} {:<4} {:<8} {:<4} {:<4} {:<16} {:<16} {:<16}",
        "#", "Champion", "Ult", "Base", "AH", "SSH", "Ult CD", "Spell 1", "Spell 2"
    );
    println!("{}", "-".repeat(96));

    for (index, slot) in snapshot.iter().enumerate() {
        if slot.is_empty() {
            println!("{:<3} {:<14}", index + 1, "-");
            continue;
        }
        let name = slot.entity().map(|e| e.name.as_str()).unwrap_or_default();
        println!(
            "{:<3} {:<14} {:<4} {:<8} {:<4} {:<4} {:<16} {:<16} {:<16}",
            index + 1,
            name,
            slot.tier(),
            format_base(slot.active_base_duration()),
            slot.ability_haste(),
            slot.secondary_haste(),
            timer_cell(ctx, slot, index, TimerKind::Ultimate),
            timer_cell(ctx, slot, index, TimerKind::Spell(SpellSlot::First)),
            timer_cell(ctx, slot, index, TimerKind::Spell(SpellSlot::Second)),
        );
    }
}

fn timer_cell(ctx: &CliContext, slot: &EntitySlot, index: usize, kind: TimerKind) -> String {
    let remaining = ctx.board.remaining(index, kind);
    let label = match kind {
        TimerKind::Ultimate => String::new(),
        TimerKind::Spell(which) => slot
            .spell(which)
            .spell
            .as_ref()
            .map(|s| format!("{} ", s.name))
            .unwrap_or_default(),
    };
    format!("{label}{}", format_remaining(remaining))
}

pub fn resume(ctx: &mut CliContext) {
    ctx.board.resume();
    let running = SLOT_COUNT * TimerKind::ALL.len() - count_idle(ctx);
    println!("Resynced countdowns ({running} running)");
}

fn count_idle(ctx: &CliContext) -> usize {
    (0..SLOT_COUNT)
        .flat_map(|i| TimerKind::ALL.map(|k| (i, k)))
        .filter(|(i, k)| ctx.board.remaining(*i, *k) == 0)
        .count()
}

pub fn show_settings(ctx: &CliContext) {
    match spellwatch_core::AppConfig::config_path() {
        Ok(path) => println!("Config file:   {}", path.display()),
        Err(e) => println!("Config file:   unavailable ({e})"),
    }
    println!("State file:    {}", ctx.state_path().display());
    println!("Variant:       {}", ctx.config.variant.label());
    println!("Patch:         {}", ctx.config.catalog.patch_version);
    println!("Locale:        {}", ctx.config.catalog.locale);
    println!("Game mode:     {}", ctx.config.catalog.game_mode);
    println!("Poll interval: {}ms", ctx.config.countdown.poll_interval_ms());

    let now = ctx.store.clock().now_ms();
    if let Some(time) = Local.timestamp_millis_opt(now).single() {
        println!("Local time:    {}", time.format("%H:%M:%S"));
    }
}

pub fn exit() -> Result<(), String> {
    let mut stdout = std::io::stdout();
    writeln!(stdout, "quitting...").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

fn report_catalog_error(action: &str, e: &spellwatch_core::CatalogError) {
    tracing::warn!(error = %e, action, "Catalog request failed");
    println!("Failed to {action}: {e}");
}

fn format_base(base: Option<f64>) -> String {
    match base {
        Some(secs) => format!("{secs}s"),
        None => "-".to_string(),
    }
}

/// `ready`, `45s`, or `2:05`
pub fn format_remaining(secs: u64) -> String {
    match secs {
        0 => "ready".to_string(),
        1..=59 => format!("{secs}s"),
        _ => format!("{}:{:02}", secs / 60, secs % 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_formats() {
        assert_eq!(format_remaining(0), "ready");
        assert_eq!(format_remaining(45), "45s");
        assert_eq!(format_remaining(60), "1:00");
        assert_eq!(format_remaining(231), "3:51");
    }

    #[test]
    fn base_formats() {
        assert_eq!(format_base(None), "-");
        assert_eq!(format_base(Some(80.0)), "80s");
    }
}
