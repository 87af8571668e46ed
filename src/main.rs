//! Battle Optimizer command line
//!
//! Reads an optimization request as JSON and prints the optimized plan.

use battle_optimizer::battle::replay::EventBus;
use battle_optimizer::config::OptimizerConfig;
use battle_optimizer::errors::ServiceError;
use battle_optimizer::service::{boss_trainers, BattleOptimizer, OptimizeRequest, OptimizeResponse};
use battle_optimizer::teams::{BaseStatsRecord, PokemonRecord};
use battle_optimizer::{Ranking, Strategy};
use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

/// Find the best move sequence for a Generation 1 battle
#[derive(Parser, Debug)]
#[command(name = "battle-optimizer")]
#[command(about = "Search Generation 1 battles for the fastest win or the most damage")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Optimize a request read from a JSON file, or stdin when no file is given
    Optimize {
        file: Option<PathBuf>,

        #[command(flatten)]
        search: SearchArgs,

        /// Print a readable battle log instead of JSON
        #[arg(long)]
        text: bool,
    },
    /// List the preset boss trainers
    Bosses,
    /// Run every strategy with a built-in team against a boss
    Demo {
        /// Boss trainer id
        #[arg(long, default_value = "blue")]
        boss: String,

        /// Level of the built-in team
        #[arg(long, default_value_t = 65)]
        level: u8,

        #[command(flatten)]
        search: SearchArgs,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// RON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// greedy, dp or dijkstra
    #[arg(long)]
    algorithm: Option<Strategy>,

    #[arg(long)]
    max_turns: Option<u32>,

    #[arg(long)]
    max_depth: Option<u32>,

    #[arg(long)]
    max_states: Option<usize>,

    /// Rank greedy moves by one seeded random roll instead of the average roll
    #[arg(long, conflicts_with = "crit_weighted")]
    seed: Option<u64>,

    /// Rank greedy moves by expected damage including critical hits
    #[arg(long)]
    crit_weighted: bool,
}

impl SearchArgs {
    fn load_config(&self) -> Result<OptimizerConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => OptimizerConfig::load_from_path(path)?,
            None => OptimizerConfig::default(),
        };
        if let Some(strategy) = self.algorithm {
            config.strategy = strategy;
        }
        if let Some(max_turns) = self.max_turns {
            config.max_turns = max_turns;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(max_states) = self.max_states {
            config.max_states = max_states;
        }
        if let Some(seed) = self.seed {
            config.ranking = Ranking::Sampled { seed };
        }
        if self.crit_weighted {
            config.ranking = Ranking::CritWeighted;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("battle_optimizer=info")),
        )
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Optimize { file, search, text } => run_optimize(file, &search, text),
        Command::Bosses => run_bosses(),
        Command::Demo { boss, level, search } => run_demo(&boss, level, &search),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_optimize(file: Option<PathBuf>, search: &SearchArgs, text: bool) -> Result<(), Box<dyn Error>> {
    let body = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut request: OptimizeRequest = serde_json::from_str(&body).map_err(ServiceError::from)?;
    // An explicit flag beats the algorithm named in the request.
    if let Some(strategy) = search.algorithm {
        request.algorithm = Some(strategy.to_string());
    }

    let optimizer = BattleOptimizer::new(search.load_config()?);
    let response = optimizer.optimize(&request)?;
    if text {
        print_response(&response);
    } else {
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

fn run_bosses() -> Result<(), Box<dyn Error>> {
    for boss in boss_trainers() {
        println!("{:<10} {} ({}), {} Pokemon", boss.id, boss.name, boss.title, boss.team_size);
        println!("           {}", boss.description);
    }
    Ok(())
}

fn run_demo(boss: &str, level: u8, search: &SearchArgs) -> Result<(), Box<dyn Error>> {
    let request = OptimizeRequest {
        player_team: demo_team(),
        boss_trainer: Some(boss.to_string()),
        player_level: Some(level),
        ..OptimizeRequest::default()
    };

    let optimizer = BattleOptimizer::new(search.load_config()?);
    let responses = optimizer.compare(&request)?;

    println!("Blastoise, Charizard and Pikachu (Lv. {}) vs {}", level, boss);
    println!("{:<10} {:>8} {:>6} {:>8} {:>10}", "algorithm", "result", "turns", "damage", "states");
    for response in &responses {
        println!(
            "{:<10} {:>8} {:>6} {:>8} {:>10}",
            response.algorithm.to_string(),
            if response.victory { "victory" } else { "defeat" },
            response.turns,
            response.total_damage,
            response.states_explored
        );
    }
    for response in &responses {
        println!();
        println!("== {} ==", response.algorithm);
        println!("{}", response.move_sequence.join(" -> "));
    }
    Ok(())
}

fn print_response(response: &OptimizeResponse) {
    println!(
        "{} vs {}: {} in {} turns, {} damage",
        response.algorithm,
        response.opponent,
        if response.victory { "victory" } else { "defeat" },
        response.turns,
        response.total_damage
    );
    let log: EventBus = response.battle_log.iter().cloned().collect();
    log.print_formatted();
}

fn demo_member(name: &str, types: &[&str], base_stats: BaseStatsRecord, moves: &[&str]) -> PokemonRecord {
    PokemonRecord {
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        base_stats,
        selected_moves: moves.iter().map(|m| m.to_string()).collect(),
        ..PokemonRecord::default()
    }
}

fn demo_team() -> Vec<PokemonRecord> {
    vec![
        demo_member(
            "blastoise",
            &["water"],
            BaseStatsRecord {
                hp: 79,
                attack: 83,
                defense: 100,
                special: 85,
                speed: 78,
            },
            &["surf", "ice-beam", "bite", "skull-bash"],
        ),
        demo_member(
            "charizard",
            &["fire", "flying"],
            BaseStatsRecord {
                hp: 78,
                attack: 84,
                defense: 78,
                special: 85,
                speed: 100,
            },
            &["flamethrower", "slash", "earthquake", "fire-blast"],
        ),
        demo_member(
            "pikachu",
            &["electric"],
            BaseStatsRecord {
                hp: 35,
                attack: 55,
                defense: 40,
                special: 50,
                speed: 90,
            },
            &["thunderbolt", "thunder-wave", "quick-attack", "thunder"],
        ),
    ]
}
