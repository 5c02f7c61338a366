//! Pool tick throughput: serial vs parallel across pool sizes

use std::time::Instant;

use life_pool::config::{GridConfig, PoolConfig};
use life_pool::{Pool, RandomSeeder, Strategy};

fn build_pool(total: usize, grid: &GridConfig, strategy: Strategy) -> Pool {
    let config = PoolConfig {
        total_count: total,
        displayed_count: 1,
        strategy,
    };
    Pool::new(&config, grid, &mut RandomSeeder::thread()).expect("benchmark config is valid")
}

fn benchmark(total: usize, grid: &GridConfig, strategy: Strategy, iterations: u32) -> f64 {
    let mut pool = build_pool(total, grid, strategy);

    let start = Instant::now();
    for _ in 0..iterations {
        pool.advance();
    }
    start.elapsed().as_secs_f64() * 1000.0 / iterations as f64
}

fn main() {
    println!("=== Game of Life Pool Benchmark ===\n");

    let grid = GridConfig { length: 80, width: 40 };
    let sizes = [1, 10, 100, 500, 1000];
    let iterations = 20;

    println!("Grid {}x{}, {} ticks per run\n", grid.length, grid.width, iterations);
    println!("{:>8} {:>12} {:>12} {:>10}", "Grids", "Serial", "Parallel", "Speedup");
    println!("{:-<46}", "");

    for total in sizes {
        let serial_ms = benchmark(total, &grid, Strategy::Serial, iterations);
        let parallel_ms = benchmark(total, &grid, Strategy::Parallel, iterations);

        println!(
            "{:>8} {:>12.3} {:>12.3} {:>9.1}x",
            total,
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }

    let cells = (grid.length * grid.width * 1000) as f64;
    let parallel_ms = benchmark(1000, &grid, Strategy::Parallel, iterations);
    println!(
        "\nParallel, 1000 grids: {:.2} ms/gen, {:.1}M cells/sec",
        parallel_ms,
        cells / (parallel_ms / 1000.0) / 1_000_000.0
    );
}
