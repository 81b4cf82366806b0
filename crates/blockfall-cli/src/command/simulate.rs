use std::{path::PathBuf, time::Duration};

use blockfall_engine::{
    Command, CommandOutcome, GameSession, PieceSeed, SessionConfig, SessionSnapshot, TickOutcome,
};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use serde::Serialize;

use crate::{
    command::{LogArg, SessionConfigArg},
    util::Output,
};

/// Simulated time between two input decisions.
const FRAME: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    session: SessionConfigArg,
    #[clap(flatten)]
    log: LogArg,
    /// Number of fall ticks to run before stopping
    #[clap(long, default_value_t = 1000)]
    ticks: usize,
    /// Seed for the random input sequence
    #[clap(long, default_value_t = 0)]
    input_seed: u64,
    /// Write the summary to this file instead of stdout
    #[clap(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationSummary {
    seed: PieceSeed,
    input_seed: u64,
    ticks: usize,
    commands: usize,
    landings: usize,
    game_over: bool,
    snapshot: SessionSnapshot,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        session,
        log,
        ticks,
        input_seed,
        output,
    } = arg;

    log.init()?;
    let config = session.resolve()?;
    let summary = simulate(config, *ticks, *input_seed)?;
    Output::save_json(&summary, output.as_deref())
}

fn simulate(
    config: SessionConfig,
    max_ticks: usize,
    input_seed: u64,
) -> anyhow::Result<SimulationSummary> {
    let mut session = GameSession::new(config)?;
    let mut rng = StdRng::seed_from_u64(input_seed);
    log::info!(
        "simulate: seed={} input_seed={input_seed} ticks={max_ticks}",
        session.seed()
    );

    session.start();
    let mut ticks = 0;
    let mut commands = 0;
    let mut landings = 0;
    let mut count = |outcome: TickOutcome| {
        if outcome.is_landed() || outcome.is_game_over() {
            landings += 1;
        }
    };

    while ticks < max_ticks && session.state().is_running() {
        // roughly one input every other frame
        if rng.random_bool(0.5) {
            let command = Command::ALL[rng.random_range(0..Command::ALL.len())];
            match session.apply(command) {
                CommandOutcome::Tick(outcome) => count(outcome),
                CommandOutcome::Ignored | CommandOutcome::Blocked | CommandOutcome::Applied => {}
            }
            commands += 1;
        }
        if let Some(outcome) = session.advance(FRAME) {
            ticks += 1;
            count(outcome);
        }
    }

    Ok(SimulationSummary {
        seed: session.seed(),
        input_seed,
        ticks,
        commands,
        landings,
        game_over: session.state().is_game_over(),
        snapshot: session.snapshot(),
    })
}
