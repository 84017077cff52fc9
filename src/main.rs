use anyhow::Result;
use clap::Parser;
use neuroarena_lib::model::metrics::init_logging;
use neuroarena_lib::{App, RunOptions};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generations to simulate before exiting
    #[arg(short, long, default_value_t = 10)]
    generations: u32,

    /// RNG seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per update (1-10)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=10))]
    speed: Option<u32>,

    /// Directory for the JSONL event history
    #[arg(long)]
    history: Option<PathBuf>,

    /// Write a gzip snapshot here when the run ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Resume from a snapshot instead of a fresh world
    #[arg(long, conflicts_with = "config")]
    load: Option<PathBuf>,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let options = RunOptions {
        config: args.config,
        generations: args.generations,
        seed: args.seed,
        speed: args.speed,
        history: args.history,
        save: args.save,
        load: args.load,
    };
    let summary = App::new(&options)?.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for stats in &summary.generations {
            println!(
                "gen {:>4}  alive {:>3}  predators {:>3}  prey {:>3}  kills {:>3}  avg {:>9.2}  max {:>9.2}",
                stats.generation,
                stats.alive,
                stats.predators,
                stats.prey,
                stats.total_kills,
                stats.avg_fitness,
                stats.max_fitness
            );
        }
    }
    Ok(())
}
