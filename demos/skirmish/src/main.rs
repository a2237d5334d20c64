//! skirmish: scripted single-player match driving the rts decision core.
//!
//! A small scripted world stands in for the game engine: it mines, trains
//! units on a fixed cadence, loses some of them at random, and feeds every
//! build the agent requests through the reference `TaskManager`.  Run with
//! `RUST_LOG=debug` to see every reconciliation decision.

mod world;

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rts_behavior::{ForcedRetreat, Goal, GoalKind, NoopActionFactory, UnitGroup};
use rts_core::{AgentConfig, Position, Race, Tick};
use rts_economy::{AllTech, BuildOrderFlags, EconomyContext, ReconcileReport};
use rts_sim::{AgentBuilder, AgentObserver, SquadAssignments, TickInput, TickSummary};
use rts_task::TaskHandle;

use world::World;

// ── Constants ─────────────────────────────────────────────────────────────────

const WORKER_EVERY:  u64 = 120;
const ARMY_EVERY:    u64 = 45;
const LOSS_EVERY:    u64 = 150;
const ATTACK_AFTER:  u64 = 3_000;
const RETREAT_TICKS: u32 = 24;
const ENEMY_BASE:    Position = Position { x: 960, y: 960 };

const EXPANSION_SITES: [Position; 6] = [
    Position { x: 180, y: 90 },
    Position { x: 90, y: 220 },
    Position { x: 400, y: 120 },
    Position { x: 300, y: 380 },
    Position { x: 640, y: 200 },
    Position { x: 520, y: 600 },
];

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, ValueEnum)]
enum RaceArg {
    Protoss,
    Terran,
    Zerg,
}

impl From<RaceArg> for Race {
    fn from(arg: RaceArg) -> Race {
        match arg {
            RaceArg::Protoss => Race::Protoss,
            RaceArg::Terran => Race::Terran,
            RaceArg::Zerg => Race::Zerg,
        }
    }
}

/// Run a scripted match and report what the decision core did.
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
struct Args {
    /// Ticks to simulate
    #[arg(long, default_value_t = 8_000)]
    ticks: u64,

    /// Random seed for reproducible runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Our race
    #[arg(long, value_enum, default_value_t = RaceArg::Protoss)]
    race: RaceArg,

    /// The opponent's race
    #[arg(long, value_enum, default_value_t = RaceArg::Zerg)]
    enemy: RaceArg,

    /// JSON file with `AgentConfig` overrides
    #[arg(long, env = "SKIRMISH_CONFIG")]
    config: Option<PathBuf>,

    /// Log a progress line every N ticks
    #[arg(long, default_value_t = 1_000)]
    report_every: u64,
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct ProgressObserver {
    report_every: u64,
    issued:       usize,
    cancelled:    usize,
    handled:      usize,
}

impl AgentObserver for ProgressObserver {
    fn on_reconcile(&mut self, _tick: Tick, report: &ReconcileReport) {
        let total = report.total();
        self.issued += total.issued;
        self.cancelled += total.cancelled;
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.handled += summary.handled;
        if tick.on_interval(self.report_every) {
            info!(
                tick = tick.0,
                units = summary.units,
                issued = self.issued,
                cancelled = self.cancelled,
                "progress"
            );
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&PathBuf>) -> Result<AgentConfig> {
    let Some(path) = path else {
        return Ok(AgentConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let race = Race::from(args.race);
    let enemy_races = [Race::from(args.enemy)];

    println!("=== skirmish: {race} vs {} ===", enemy_races[0]);
    println!("Ticks: {}  |  Seed: {}", args.ticks, args.seed);
    println!();

    let mut agent = AgentBuilder::new().config(config).build::<TaskHandle>()?;
    let mut world = World::new(race, EXPANSION_SITES);
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut observer = ProgressObserver { report_every: args.report_every, ..Default::default() };
    let orders = BuildOrderFlags::default();

    for _ in 0..4 {
        let (unit, unit_type) = world.spawn(true);
        agent.on_unit_created(unit, unit_type, &NoopActionFactory)?;
    }

    for t in 1..=args.ticks {
        let tick = Tick(t);
        world.advance(tick);
        world.mine(&mut rng);

        // ── Script: train, lose, retreat ──────────────────────────────────
        if tick.on_interval(WORKER_EVERY) {
            let (unit, unit_type) = world.spawn(true);
            agent.on_unit_created(unit, unit_type, &NoopActionFactory)?;
        }
        if tick.on_interval(ARMY_EVERY) {
            let (unit, unit_type) = world.spawn(false);
            agent.on_unit_created(unit, unit_type, &NoopActionFactory)?;
        }
        if tick.on_interval(LOSS_EVERY) {
            if let Some(unit) = world.kill_random(&mut rng) {
                agent.on_unit_destroyed(unit)?;
            }
            if let Some(&survivor) = world.army.first() {
                let retreat = Box::new(ForcedRetreat::new(survivor, RETREAT_TICKS));
                if let Err(err) = agent.add_action(survivor, retreat) {
                    warn!(%err, "retreat order dropped");
                }
            }
        }

        // ── Squads ────────────────────────────────────────────────────────
        let mut squads = SquadAssignments::new();
        let goal = if t >= ATTACK_AFTER {
            Goal::new(GoalKind::Attack, ENEMY_BASE)
        } else {
            Goal::new(GoalKind::Hold, world.home())
        };
        let army = UnitGroup::new(world.army.iter().map(|&u| (u, world.home())).collect());
        squads.add_squad(goal, army);

        // ── Decide ────────────────────────────────────────────────────────
        let economy = EconomyContext {
            tick,
            race,
            enemy_races: &enemy_races,
            bases: &world.bases,
            supply_total: world.supply_total(),
            signals: world.signals(),
            orders,
            tech: &AllTech,
        };
        agent.on_tick(&TickInput { economy, squads: &squads }, &mut world.tasks, &mut observer);
    }

    let bank = world.tasks.bank();
    println!();
    println!("Bases:        {}", world.bases.len());
    println!("Units:        {}", agent.unit_count());
    println!("Issued:       {}", observer.issued);
    println!("Cancelled:    {}", observer.cancelled);
    println!("Handled:      {}", observer.handled);
    println!("Open tasks:   {}", world.tasks.len());
    println!("Bank:         {} minerals / {} gas", bank.minerals, bank.gas);
    Ok(())
}
