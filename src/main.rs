//! Kohonen CLI - Competitive-Learning Vector Quantizer
//!
//! Command-line interface for training a neuron set on the region catalog.

use clap::{Parser, Subcommand};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use kohonen::render::{render_final, render_initial, save_snapshot};
use kohonen::{Config, Experiment, ExperimentOutcome, Region, Result};
use log::error;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "kohonen")]
#[command(version)]
#[command(about = "Competitive-learning vector quantizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a neuron set on samples from the region catalog
    Train {
        /// JSON configuration file (missing fields use defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of neurons (default: 10)
        #[arg(short = 'm', long)]
        neurons: Option<usize>,

        /// Number of training iterations (default: 15000)
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Initial learning rate (default: 0.1)
        #[arg(short, long)]
        learning_rate: Option<f64>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write a PNG of the neurons before training
        #[arg(long)]
        initial_image: Option<PathBuf>,

        /// Write a PNG of the neurons after training
        #[arg(long)]
        final_image: Option<PathBuf>,
    },

    /// List the regions samples are drawn from
    Catalog {
        /// JSON configuration file (missing fields use defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let result = match cli.command {
        Commands::Train {
            config,
            neurons,
            iterations,
            learning_rate,
            seed,
            initial_image,
            final_image,
        } => load_config(config).and_then(|mut config| {
            if let Some(neurons) = neurons {
                config.quantizer.neurons = neurons;
            }
            if let Some(iterations) = iterations {
                config.quantizer.iterations = iterations;
            }
            if let Some(rate) = learning_rate {
                config.quantizer.initial_learning_rate = rate;
            }
            if seed.is_some() {
                config.quantizer.seed = seed;
            }
            train(&config, initial_image, final_image)
        }),

        Commands::Catalog { config } => load_config(config).and_then(|config| show_catalog(&config)),
    };

    if let Err(e) = result {
        error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(&path),
        None => Ok(Config::default()),
    }
}

fn train(config: &Config, initial_image: Option<PathBuf>, final_image: Option<PathBuf>) -> Result<()> {
    let start_time = Instant::now();
    let experiment = Experiment::new(config)?;

    println!("Kohonen competitive learning");
    println!(
        "   {} neurons, {} regions, {} iterations, lr={}",
        experiment.quantizer().total_neurons(),
        experiment.regions().len(),
        config.quantizer.iterations,
        config.quantizer.initial_learning_rate
    );
    println!();

    if let Some(path) = &initial_image {
        save_snapshot(&render_initial(experiment.quantizer(), &config.render), path)?;
        println!("✓ Initial snapshot written to {}", path.display());
    }

    let bar_style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");

    let pb = ProgressBar::new(config.quantizer.iterations as u64);
    pb.set_style(bar_style);
    pb.set_message("Training...");

    let regions = experiment.regions().to_vec();
    let outcome = experiment.run_with_progress(|step, _, rate| {
        pb.set_position(step as u64);
        pb.set_message(format!("Training... lr={:.5}", rate));
    })?;

    pb.finish_and_clear();
    println!(
        "✓ Trained in {} ({} of {} neurons won at least once)",
        HumanDuration(start_time.elapsed()),
        outcome.report.winners.len(),
        outcome.trained.total_neurons()
    );
    println!();

    print_neurons(&outcome, &regions);
    print_region_coverage(&outcome, &regions)?;

    if let Some(path) = &final_image {
        save_snapshot(
            &render_final(&outcome.trained, &outcome.report.winners, &config.render),
            path,
        )?;
        println!();
        println!("✓ Final snapshot written to {}", path.display());
    }

    Ok(())
}

fn print_neurons(outcome: &ExperimentOutcome, regions: &[Region]) {
    println!("Final neurons (K = won at least once, X = never won):");
    println!("  {:>3}  {:>4}  {:>24}  {:>24}  {:>7}  region", "#", "mark", "initial", "final", "wins");

    for (idx, neuron) in outcome.trained.neurons().iter().enumerate() {
        let mark = if outcome.report.winners.contains(idx) { "K" } else { "X" };
        let region = regions
            .iter()
            .find(|r| r.contains(&neuron.weights))
            .map(|r| r.name.as_str())
            .unwrap_or("-");
        println!(
            "  {:>3}  {:>4}  {:>24}  {:>24}  {:>7}  {}",
            idx,
            mark,
            format_point(&outcome.initial.neurons()[idx].weights),
            format_point(&neuron.weights),
            outcome.report.win_counts[idx],
            region
        );
    }

    println!();
    println!(
        "Mean quantization error: {:.3}, final learning rate: {:e}",
        outcome.report.mean_quantization_error, outcome.report.final_learning_rate
    );
}

fn print_region_coverage(outcome: &ExperimentOutcome, regions: &[Region]) -> Result<()> {
    println!();
    println!("Closest neuron to each region center:");
    for region in regions {
        let center = region.center();
        if let Some((idx, dist)) = outcome.trained.k_nearest(&center, 1)?.first() {
            println!("  {:<8} neuron {:>3} at distance {:.2}", region.name, idx, dist);
        }
    }
    Ok(())
}

fn show_catalog(config: &Config) -> Result<()> {
    config.sampler.validate()?;
    let total_weight: f64 = config.sampler.regions.iter().map(|r| r.weight).sum();

    println!("Region catalog ({} regions)", config.sampler.regions.len());
    for region in &config.sampler.regions {
        println!(
            "  {:<8} x=[{}, {})  y=[{}, {})  p={:.3}",
            region.name,
            region.x,
            region.x + region.width,
            region.y,
            region.y + region.height,
            region.weight / total_weight
        );
    }
    Ok(())
}

fn format_point(point: &[f64]) -> String {
    let parts: Vec<String> = point.iter().map(|v| format!("{:.2}", v)).collect();
    format!("({})", parts.join(", "))
}
