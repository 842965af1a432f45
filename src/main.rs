/*!
 * Allocator Benchmark - Main Entry Point
 *
 * Generates a request size sequence, runs both allocators over it, prints the
 * comparison and exports the results as CSV.
 */

use miette::Result;
use tracing::info;

use pool_allocators::benchmark::{export_csv, generate_sizes, render_comparison};
use pool_allocators::{compare_algorithms, init_tracing, BenchConfig, BenchError};

fn main() -> Result<()> {
    init_tracing();

    let config = BenchConfig::from_env()?;
    info!(
        pool_size = config.pool_size,
        allocations = config.allocations,
        min_request = config.min_request,
        max_request = config.max_request,
        seed = ?config.seed,
        "Benchmark configuration loaded"
    );

    let sizes = generate_sizes(
        config.allocations,
        config.min_request,
        config.max_request,
        config.seed,
    );

    let results = compare_algorithms(config.pool_size, &sizes).map_err(BenchError::from)?;

    if config.json_output {
        let json = serde_json::to_string_pretty(&results).map_err(BenchError::from)?;
        println!("{}", json);
    } else {
        println!("{}", render_comparison(config.pool_size, config.allocations, &results));
    }

    export_csv(&config.csv_path, &results)?;
    println!("✓ Benchmark results saved to {}", config.csv_path.display());

    Ok(())
}
