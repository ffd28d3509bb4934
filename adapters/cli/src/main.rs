#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives Tile Puzzle sessions.

mod agents;
mod output;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tile_puzzle_core::{Action, Agent, Observation, WELCOME_BANNER};
use tile_puzzle_rendering::{Frame, RenderingBackend, Scene};
use tile_puzzle_system_analytics::{Analytics, RunReport};
use tile_puzzle_system_wanderer::{Config as WandererConfig, Wanderer};
use tile_puzzle_world::{self as world, query, LevelCatalog, Session};
use tracing::info;

use crate::{
    agents::{parse_script, ScriptedAgent, StdinAgent},
    output::{JsonBackend, TextBackend},
};

/// Tick cap applied to the wanderer when none is given.
const DEFAULT_WANDER_TICKS: u64 = 1_000;

/// Where actions come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    /// Read action words from standard input.
    Stdin,
    /// Replay the action words in `--script`.
    Script,
    /// Seeded random walk.
    Wander,
}

/// How each tick is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Board, status line and event log.
    Text,
    /// One JSON object per line.
    Json,
}

/// Command-line arguments for the Tile Puzzle driver.
#[derive(Debug, Parser)]
#[command(
    name = "tile-puzzle",
    about = "Drive a tile puzzle session from a script, stdin or a random walker"
)]
struct CliArgs {
    /// Level to start on; wraps around the catalog.
    #[arg(long, default_value_t = 0)]
    level: usize,

    /// Source of actions.
    #[arg(long, value_enum, default_value_t = AgentKind::Stdin)]
    agent: AgentKind,

    /// Script file for `--agent script`.
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,

    /// Seed for `--agent wander`.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of ticks to run; 0 means no cap.
    #[arg(long)]
    ticks: Option<u64>,

    /// Per-tick output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print only the final summary.
    #[arg(long)]
    quiet: bool,
}

/// Action source selected on the command line.
enum Source {
    Script(ScriptedAgent),
    Stdin(StdinAgent<io::StdinLock<'static>>),
    Wander(Wanderer),
}

impl Source {
    fn from_args(args: &CliArgs) -> Result<Self> {
        match args.agent {
            AgentKind::Script => {
                let Some(path) = &args.script else {
                    bail!("--agent script requires --script <PATH>");
                };
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read script {}", path.display()))?;
                Ok(Self::Script(ScriptedAgent::new(parse_script(&text))))
            }
            AgentKind::Stdin => Ok(Self::Stdin(StdinAgent::new(io::stdin().lock()))),
            AgentKind::Wander => Ok(Self::Wander(Wanderer::new(WandererConfig::new(args.seed)))),
        }
    }

    /// Next action, or `None` when the source has nothing more to say.
    fn next_action(&mut self, observation: &Observation) -> Option<Action> {
        match self {
            Self::Script(agent) if agent.is_finished() => None,
            Self::Script(agent) => Some(agent.decide(observation)),
            Self::Stdin(agent) => agent.next_action(),
            Self::Wander(agent) => Some(agent.decide(observation)),
        }
    }
}

/// Entry point for the Tile Puzzle command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = CliArgs::parse();
    let tick_cap = match (args.ticks, args.agent) {
        (Some(0), AgentKind::Wander) => bail!("--agent wander needs a non-zero --ticks"),
        (Some(0), _) => None,
        (Some(ticks), _) => Some(ticks),
        (None, AgentKind::Wander) => Some(DEFAULT_WANDER_TICKS),
        (None, _) => None,
    };

    let mut source = Source::from_args(&args)?;
    let mut session = Session::with_catalog(LevelCatalog::standard(), args.level);
    info!(
        level_index = query::progress(&session).level_index,
        agent = ?args.agent,
        "{WELCOME_BANNER}"
    );

    if args.format == OutputFormat::Text && !args.quiet {
        println!("{WELCOME_BANNER}");
        println!("{}", Scene::from_observation(&query::observation(&session)));
        println!();
    }

    let backend: Option<Box<dyn RenderingBackend>> = match (args.quiet, args.format) {
        (true, _) => None,
        (false, OutputFormat::Text) => Some(Box::new(TextBackend::new(io::stdout().lock()))),
        (false, OutputFormat::Json) => Some(Box::new(JsonBackend::new(io::stdout().lock()))),
    };

    let (ticks, report) = run(&mut session, &mut source, backend, tick_cap)?;
    info!(ticks, score = report.score(), "run finished");
    print_summary(&session, ticks, &report, args.format)
}

/// Drives the session until the source runs dry or the tick cap is reached.
fn run(
    session: &mut Session,
    source: &mut Source,
    mut backend: Option<Box<dyn RenderingBackend>>,
    tick_cap: Option<u64>,
) -> Result<(u64, RunReport)> {
    let mut analytics = Analytics::new();
    let mut events = Vec::new();
    let mut tick = 0;

    while tick_cap.map_or(true, |cap| tick < cap) {
        let observation = query::observation(session);
        let Some(action) = source.next_action(&observation) else {
            break;
        };

        events.clear();
        world::apply(session, action, &mut events);
        analytics.handle(&events);

        if let Some(backend) = backend.as_mut() {
            let observation = query::observation(session);
            backend.present(&Frame {
                tick,
                action,
                events: &events,
                observation: &observation,
            })?;
        }
        tick += 1;
    }

    if let Some(backend) = backend.as_mut() {
        backend.finish()?;
    }
    Ok((tick, analytics.report()))
}

fn print_summary(
    session: &Session,
    ticks: u64,
    report: &RunReport,
    format: OutputFormat,
) -> Result<()> {
    let progress = query::progress(session);
    let inventory = query::inventory(session);
    let mut out = io::stdout().lock();

    match format {
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "summary": {
                    "ticks": ticks,
                    "level_index": progress.level_index,
                    "batteries_remaining": progress.batteries_remaining,
                    "keys": inventory.keys,
                    "extinguishers": inventory.extinguishers,
                    "score": report.score(),
                    "report": report,
                }
            });
            writeln!(out, "{summary}").context("failed to write summary")?;
        }
        OutputFormat::Text => {
            writeln!(out, "ticks: {ticks}").context("failed to write summary")?;
            writeln!(
                out,
                "level: {} ({} batteries left)",
                progress.level_index + 1,
                progress.batteries_remaining
            )
            .context("failed to write summary")?;
            writeln!(
                out,
                "moves: {} accepted, {} rejected",
                report.moves,
                report.rejected()
            )
            .context("failed to write summary")?;
            writeln!(
                out,
                "levels cleared: {}, restarts: {}, score: {}",
                report.levels_cleared,
                report.restarts,
                report.score()
            )
            .context("failed to write summary")?;
        }
    }
    out.flush().context("failed to flush summary")
}
