use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use particles::config::{DisplayConfig, RunConfig};
use particles::render::{animate, animate_path, trajectory_bounds, Frame, Renderer, TextRenderer};
use particles::{decompose, GenerationConfig, Histogram, Simulation, Vector};
use std::io::{self, Write};
use std::path::PathBuf;

const WIDTH: usize = 60;
const HEIGHT: usize = 30;

#[derive(Parser, Debug)]
#[command(about = "Generate, inspect and draw a box of 2-D particles")]
struct Args {
    /// YAML run configuration; overrides the generation flags below.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short = 'n', long, default_value_t = 20)]
    count: usize,
    #[arg(short, long, default_value_t = 100.)]
    box_length: f64,
    #[arg(short, long)]
    seed: Option<u64>,
    #[arg(long, default_value_t = 10)]
    bins: usize,
    /// Times to play the configured trajectory.
    #[arg(long, default_value_t = 1)]
    loops: usize,
    /// Follow one particle through the trajectory instead of drawing the whole set.
    #[arg(short, long, value_name = "INDEX")]
    track: Option<usize>,
    /// Split (3, 2) along this direction and print the parts.
    #[arg(long, num_args = 2, value_names = ["DX", "DY"], allow_negative_numbers = true)]
    decompose: Option<Vec<f64>>,
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) -> Result<()> {
    let stderr = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}")))
        .build();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn load_run(args: &Args) -> Result<RunConfig> {
    if let Some(path) = &args.config {
        return RunConfig::from_path(path);
    }
    let mut particles = GenerationConfig::new(args.count, args.box_length);
    particles.seed = args.seed;
    Ok(RunConfig {
        particles,
        display: DisplayConfig {
            box_length: Some(args.box_length),
            bins: args.bins,
            width: WIDTH,
            height: HEIGHT,
        },
        trajectory: Vec::new(),
    })
}

fn print_histogram(out: &mut impl Write, histogram: &Histogram) -> io::Result<()> {
    writeln!(out, "speed histogram")?;
    for (i, count) in histogram.counts.iter().enumerate() {
        writeln!(
            out,
            "[{:>8.4}, {:>8.4}) {:>4} {}",
            histogram.edges[i],
            histogram.edges[i + 1],
            count,
            "#".repeat(*count)
        )?;
    }
    Ok(())
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    if let Some(direction) = &args.decompose {
        let vec = Vector::new(3., 2.);
        let parts = decompose(&vec, &Vector::new(direction[0], direction[1]))
            .context("direction must be non-zero")?;
        println!("vector     ({}, {})", vec.x, vec.y);
        println!("along      ({}, {})", parts.along.x, parts.along.y);
        println!("remainder  ({}, {})", parts.remainder.x, parts.remainder.y);
        match parts.tangent {
            Some(t) => println!("tangent    ({}, {})", t.x, t.y),
            None => println!("tangent    undefined (vector is parallel to direction)"),
        }
        return Ok(());
    }

    let run = load_run(&args)?;
    let mut simulation = Simulation::from_config(&run.particles)?;
    simulation.box_length = run.display.box_length;
    simulation.trajectory = run.trajectory;
    info!(
        "Simulation ready: {} particles, {} trajectory frames",
        simulation.particles.len(),
        simulation.trajectory.len()
    );
    let overlaps = simulation.overlapping_pairs();
    let histogram = simulation.speed_histogram(run.display.bins)?;

    let stdout = io::stdout();
    match args.track {
        Some(index) => {
            let path = simulation
                .particle_path(index)
                .with_context(|| format!("no particle {}", index))?;
            let bounds = trajectory_bounds(&path).resolve(simulation.plot_bounds());
            let mut renderer =
                TextRenderer::new(stdout.lock(), bounds, run.display.width, run.display.height);
            animate_path(&mut renderer, &path)?;
            renderer.close()?;
        }
        None => {
            let mut renderer = TextRenderer::new(
                stdout.lock(),
                simulation.plot_bounds(),
                run.display.width,
                run.display.height,
            );
            if simulation.trajectory.is_empty() {
                renderer.update(&Frame::from_positions(&simulation.positions()))?;
            } else {
                animate(&mut renderer, &simulation.trajectory, args.loops)?;
            }
            renderer.close()?;
        }
    }

    let mut out = stdout.lock();
    print_histogram(&mut out, &histogram)?;
    writeln!(out, "overlapping pairs: {}", overlaps.len())?;
    for (i, j) in &overlaps {
        writeln!(out, "  {} {}", i, j)?;
    }
    Ok(())
}
