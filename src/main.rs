use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use adaptive_connect_four::ai::{
    Agent, DecisionEngine, Difficulty, DifficultySource, PracticeTier, RandomAgent, ScriptedAgent,
};
use adaptive_connect_four::arena::{measure_block_rate, play_match, ArenaMetrics};
use adaptive_connect_four::config::{AppConfig, EngineConfig};
use adaptive_connect_four::game::{GameOutcome, GameState, Side};

/// Play Connect Four against an adaptive computer opponent.
#[derive(Parser)]
#[command(name = "connect-four", version, about)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "connect_four.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive game in the terminal
    Play {
        /// Difficulty level 1-10
        #[arg(long, conflicts_with_all = ["tier", "rating"])]
        difficulty: Option<u8>,

        /// Practice tier
        #[arg(long, value_enum, conflicts_with = "rating")]
        tier: Option<TierArg>,

        /// Skill rating, mapped through the configured rating bands
        #[arg(long)]
        rating: Option<u32>,

        /// Let the computer move first
        #[arg(long)]
        ai_first: bool,
    },
    /// Play every tier against a reference opponent and report results
    Arena {
        #[arg(long, value_enum, default_value = "random")]
        opponent: OpponentArg,

        /// Override games per tier
        #[arg(long)]
        games: Option<usize>,
    },
    /// Measure one-move block rates per tier
    Calibrate {
        /// Override trials per tier
        #[arg(long)]
        trials: Option<usize>,
    },
    /// Print the default configuration as TOML
    DefaultConfig,
}

#[derive(Clone, Copy, ValueEnum)]
enum TierArg {
    Noob,
    Average,
    Good,
    Professional,
}

impl From<TierArg> for PracticeTier {
    fn from(arg: TierArg) -> Self {
        match arg {
            TierArg::Noob => PracticeTier::Noob,
            TierArg::Average => PracticeTier::Average,
            TierArg::Good => PracticeTier::Good,
            TierArg::Professional => PracticeTier::Professional,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OpponentArg {
    Random,
    Scripted,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if let Command::DefaultConfig = cli.command {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match cli.command {
        Command::Play {
            difficulty,
            tier,
            rating,
            ai_first,
        } => {
            let source = match (difficulty, tier, rating) {
                (Some(level), _, _) => {
                    if !(1..=10).contains(&level) {
                        bail!("difficulty must be between 1 and 10, got {level}");
                    }
                    DifficultySource::Level(level)
                }
                (_, Some(tier), _) => DifficultySource::Tier(tier.into()),
                (_, _, Some(rating)) => DifficultySource::Rating(rating),
                _ => DifficultySource::Tier(PracticeTier::Average),
            };
            play_interactive(source, &config.engine, ai_first)
        }
        Command::Arena { opponent, games } => {
            let games = games.unwrap_or(config.arena.games_per_tier);
            run_arena(&config, opponent, games);
            Ok(())
        }
        Command::Calibrate { trials } => {
            let trials = trials.unwrap_or(config.arena.block_trials);
            let seed = config.engine.seed.unwrap_or(0);
            println!("level  expected  measured");
            for level in 1..=10 {
                let d = Difficulty::new(level);
                let rate = measure_block_rate(d, trials, seed.wrapping_add(u64::from(level)));
                println!("{level:>5}  {:>8.2}  {rate:>8.4}", d.block_chance());
            }
            Ok(())
        }
        Command::DefaultConfig => Ok(()),
    }
}

fn play_interactive(source: DifficultySource, config: &EngineConfig, ai_first: bool) -> Result<()> {
    let mut engine = DecisionEngine::new(source, config);
    let first = if ai_first { Side::Ai } else { Side::Human };
    let mut state = GameState::initial(first);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!(
        "Difficulty {} ({:?}). You are X, the computer is O.",
        engine.difficulty(),
        engine.play_style()
    );
    println!("Enter a column 0-6, 'h' for a hint, 'q' to resign.");

    while !state.is_terminal() {
        println!("\n{}", state.board());
        match state.current_side() {
            Side::Human => {
                print!("> ");
                io::stdout().flush()?;
                let Some(line) = lines.next() else {
                    state.forfeit(Side::Human);
                    break;
                };
                let line = line?;
                match line.trim() {
                    "q" => state.forfeit(Side::Human),
                    "h" => match engine.coaching_hint(state.board()) {
                        Some(hint) => println!("Hint: {hint}"),
                        None => println!("No moves left."),
                    },
                    input => match input.parse::<usize>() {
                        Ok(col) => {
                            if let Err(err) = state.apply_move_mut(col) {
                                println!("{err}");
                            }
                        }
                        Err(_) => println!("Enter a column 0-6, 'h' or 'q'."),
                    },
                }
            }
            Side::Ai => {
                println!("Thinking...");
                let is_first_move = engine.own_moves().is_empty();
                let last = state
                    .last_move()
                    .filter(|&(side, _)| side == Side::Human)
                    .map(|(_, col)| col);
                match engine.choose_move(state.board(), is_first_move, last) {
                    Some(col) => {
                        state
                            .apply_move_mut(col)
                            .with_context(|| format!("engine chose column {col}"))?;
                        println!("Computer plays column {col}.");
                    }
                    None => state.declare_draw(),
                }
            }
        }
    }

    println!("\n{}", state.board());
    match state.outcome() {
        Some(GameOutcome::Winner(Side::Human)) => println!("You win!"),
        Some(GameOutcome::Winner(Side::Ai)) => println!("The computer wins."),
        Some(GameOutcome::Forfeit(Side::Human)) => println!("You resigned."),
        Some(GameOutcome::Forfeit(Side::Ai)) => println!("The computer resigned."),
        Some(GameOutcome::Draw) | None => println!("Draw."),
    }
    Ok(())
}

fn run_arena(config: &AppConfig, opponent: OpponentArg, games: usize) {
    let mut engine_config = config.engine.clone();
    engine_config.thinking_delay.enabled = false;
    let base_seed = engine_config.seed;
    let abandon = AtomicBool::new(false);

    println!("level  win    draw   loss   avg-len  ms/move");
    for level in 1..=10u8 {
        let mut metrics = ArenaMetrics::with_capacity(config.arena.window);
        for game in 0..games {
            engine_config.seed = base_seed.map(|s| s.wrapping_add((u64::from(level) << 32) + game as u64));
            let mut engine = DecisionEngine::new(DifficultySource::Level(level), &engine_config);
            let mut agent: Box<dyn Agent> = match opponent {
                OpponentArg::Random => match base_seed {
                    Some(s) => Box::new(RandomAgent::with_seed(s ^ game as u64)),
                    None => Box::new(RandomAgent::new()),
                },
                OpponentArg::Scripted => Box::new(ScriptedAgent::new(vec![3, 4, 2, 3, 4, 2])),
            };
            let record = play_match(&mut engine, agent.as_mut(), game % 2 == 0, &abandon);
            for &t in &record.decision_times {
                metrics.record_decision_time(t);
            }
            metrics.record_match(record.result());
        }
        let n = config.arena.window;
        info!("level {level}: {} games played", metrics.total_matches());
        println!(
            "{level:>5}  {:.2}   {:.2}   {:.2}   {:>7.1}  {:>7.2}",
            metrics.win_rate(n),
            metrics.draw_rate(n),
            metrics.loss_rate(n),
            metrics.average_length(n),
            metrics.avg_decision_ms(n),
        );
    }
}
