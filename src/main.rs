use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use life_pool::{GameState, PatternKind, Pool, RandomSeeder, Seed, SimConfig, Strategy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless Game of Life pool runner", long_about = None)]
struct Args {
    /// Run many games side by side, or a single one
    #[arg(short, long, value_enum, default_value = "pool")]
    mode: Mode,

    /// Config file path (defaults are used when it is missing)
    #[arg(short, long, default_value = "life_pool.toml")]
    config: PathBuf,

    /// Horizontal grid extent
    #[arg(long)]
    length: Option<usize>,

    /// Vertical grid extent
    #[arg(long)]
    width: Option<usize>,

    /// Number of grids in the pool
    #[arg(long)]
    total: Option<usize>,

    /// Number of grids kept on display
    #[arg(long)]
    displayed: Option<usize>,

    /// Stop after this many generations
    #[arg(short, long, default_value_t = 100)]
    generations: u64,

    /// Pause between generations
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Tick pooled grids on the calling thread only
    #[arg(long)]
    serial: bool,

    /// Pattern to stamp in single mode (e.g. glider, lwss, gosper); random if absent
    #[arg(long)]
    pattern: Option<String>,

    /// Pattern anchor column
    #[arg(short, long, default_value_t = 1)]
    x: usize,

    /// Pattern anchor row
    #[arg(short, long, default_value_t = 1)]
    y: usize,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Pool,
    Single,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "life_pool=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    match args.mode {
        Mode::Pool => run_pool(&args, &config),
        Mode::Single => run_single(&args, &config),
    }
}

fn build_config(args: &Args) -> Result<SimConfig> {
    let mut config = SimConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    if let Some(length) = args.length {
        config.grid.length = length;
    }
    if let Some(width) = args.width {
        config.grid.width = width;
    }
    if let Some(total) = args.total {
        config.pool.total_count = total;
    }
    if let Some(displayed) = args.displayed {
        config.pool.displayed_count = displayed;
    }
    if args.serial {
        config.pool.strategy = Strategy::Serial;
    }

    config.validate()?;
    Ok(config)
}

fn run_pool(args: &Args, config: &SimConfig) -> Result<()> {
    let mut pool = Pool::new(&config.pool, &config.grid, &mut RandomSeeder::thread())?;
    let delay = Duration::from_millis(args.delay_ms);

    for _ in 0..args.generations {
        pool.advance();

        let view = pool.view(config.display.line_width);
        let shown: Vec<String> = view
            .fields
            .iter()
            .map(|field| format!("#{}:{}", field.index, field.alive_count))
            .collect();
        tracing::info!(
            "Generation {}: {}/{} fields alive, {} cells alive, showing [{}]",
            view.generation,
            view.fields_alive,
            view.total_count,
            view.total_alive_cells,
            shown.join(" ")
        );

        if pool.is_exhausted() {
            break;
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    tracing::info!(
        "Finished at generation {} with {} of {} fields alive",
        pool.generation(),
        pool.fields_alive(),
        pool.total_count()
    );
    Ok(())
}

fn run_single(args: &Args, config: &SimConfig) -> Result<()> {
    let mut state = GameState::from_config(config)?;
    let seed = match &args.pattern {
        Some(token) => Seed::Pattern {
            kind: token.parse::<PatternKind>()?,
            x: args.x,
            y: args.y,
        },
        None => Seed::Random,
    };
    state.seed(&seed, &mut rand::rng())?;

    let delay = Duration::from_millis(args.delay_ms);
    for _ in 0..args.generations {
        let alive = state.step_once();
        tracing::info!(
            "Generation {}: {} alive, {} dead ({:.3} ms)",
            state.generation(),
            alive,
            state.grid.dead_count(),
            state.last_evolution_time_ms
        );
        if alive == 0 {
            tracing::info!("Field died out");
            break;
        }
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
    Ok(())
}
