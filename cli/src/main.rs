use clap::{Parser, Subcommand, ValueEnum};
use spellwatch_cli::CliContext;
use spellwatch_cli::commands;
use spellwatch_cli::logging;
use spellwatch_cli::readline;
use spellwatch_core::{HasteModifier, SLOT_COUNT, SpellSlot, TimerKind};
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let mut ctx = CliContext::new();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.shutdown();
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "Enemy cooldown tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Slots are numbered 1 through 5 at the prompt
fn parse_slot(raw: &str) -> Result<usize, String> {
    let slot: usize = raw.parse().map_err(|_| format!("'{raw}' is not a slot number"))?;
    if (1..=SLOT_COUNT).contains(&slot) {
        Ok(slot - 1)
    } else {
        Err(format!("slot must be between 1 and {SLOT_COUNT}"))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ModifierArg {
    Boots,
    Insight,
}

impl From<ModifierArg> for HasteModifier {
    fn from(arg: ModifierArg) -> Self {
        match arg {
            ModifierArg::Boots => HasteModifier::LucidityBoots,
            ModifierArg::Insight => HasteModifier::CosmicInsight,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SpellArg {
    #[value(name = "1")]
    First,
    #[value(name = "2")]
    Second,
}

impl From<SpellArg> for SpellSlot {
    fn from(arg: SpellArg) -> Self {
        match arg {
            SpellArg::First => SpellSlot::First,
            SpellArg::Second => SpellSlot::Second,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimerArg {
    Ult,
    Spell1,
    Spell2,
}

impl From<TimerArg> for TimerKind {
    fn from(arg: TimerArg) -> Self {
        match arg {
            TimerArg::Ult => TimerKind::Ultimate,
            TimerArg::Spell1 => TimerKind::Spell(SpellSlot::First),
            TimerArg::Spell2 => TimerKind::Spell(SpellSlot::Second),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List champions for the configured patch
    Champions { filter: Option<String> },
    /// List summoner spells for the configured game mode
    Spells,
    /// Put a champion in a slot
    Assign {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        champion: String,
    },
    ClearSlot {
        #[arg(value_parser = parse_slot)]
        slot: usize,
    },
    /// Cycle the ultimate rank
    Tier {
        #[arg(value_parser = parse_slot)]
        slot: usize,
    },
    Haste {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    Toggle {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        #[arg(value_enum)]
        modifier: ModifierArg,
    },
    Spell {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        #[arg(value_enum)]
        which: SpellArg,
        spell: String,
    },
    Start {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        #[arg(value_enum)]
        timer: TimerArg,
    },
    Cancel {
        #[arg(value_parser = parse_slot)]
        slot: usize,
        #[arg(value_enum)]
        timer: TimerArg,
    },
    /// Clear every slot and timer
    Reset,
    Show,
    /// Re-arm countdowns from the current state
    Resume,
    Config,
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "spellwatch".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match cli.command {
        Some(Commands::Champions { filter }) => {
            commands::list_champions(ctx, filter.as_deref()).await
        }
        Some(Commands::Spells) => commands::list_spells(ctx).await,
        Some(Commands::Assign { slot, champion }) => {
            commands::assign_champion(ctx, slot, &champion).await
        }
        Some(Commands::ClearSlot { slot }) => commands::clear_slot(ctx, slot),
        Some(Commands::Tier { slot }) => commands::cycle_tier(ctx, slot),
        Some(Commands::Haste { slot, value }) => commands::set_haste(ctx, slot, &value),
        Some(Commands::Toggle { slot, modifier }) => {
            commands::toggle_modifier(ctx, slot, modifier.into())
        }
        Some(Commands::Spell { slot, which, spell }) => {
            commands::assign_spell(ctx, slot, which.into(), &spell).await
        }
        Some(Commands::Start { slot, timer }) => commands::start_timer(ctx, slot, timer.into()),
        Some(Commands::Cancel { slot, timer }) => commands::cancel_timer(ctx, slot, timer.into()),
        Some(Commands::Reset) => commands::reset_all(ctx),
        Some(Commands::Show) => commands::show_slots(ctx),
        Some(Commands::Resume) => commands::resume(ctx),
        Some(Commands::Config) => commands::show_settings(ctx),
        Some(Commands::Exit) => {
            commands::exit()?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
