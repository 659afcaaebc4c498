use env_logger::Env;
use log::{error, info, warn};
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

mod error;
mod loader;
mod perf;
mod plot;
mod plot_threads;
mod plot_thresholds;
mod report;
mod stats;
mod thread_stats;
mod threshold_stats;

use crate::error::Result;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "matmul-analyze",
    about = "Charts ForkJoin, Parallel and Sequential matrix multiplication timings"
)]
struct Opt {
    /// Per thread count timings (Threads, ForkJoin, Parallel, Sequential)
    #[structopt(long, parse(from_os_str), default_value = "output/thread_results.csv")]
    thread_results: PathBuf,

    /// ForkJoin timings per threshold (Threads, Threshold, Time)
    #[structopt(long, parse(from_os_str), default_value = "output/threshold_results.csv")]
    threshold_results: PathBuf,

    /// Thread comparison chart, `.svg` or a bitmap format such as `.png`
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "output/forkjoin_vs_parallel_comparison.png"
    )]
    thread_chart: PathBuf,

    /// 2x2 threshold variation chart, `.svg` or a bitmap format such as `.png`
    #[structopt(
        long,
        parse(from_os_str),
        default_value = "output/threshold_variation_comparison_subplots.png"
    )]
    threshold_chart: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    if let Err(e) = run(&opt) {
        error!("{}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            error!("  caused by: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<()> {
    let thread_rows = loader::load_thread_results(&opt.thread_results)?;
    let threshold_rows = loader::load_threshold_results(&opt.threshold_results)?;

    let by_threads = thread_stats::thread_stats(&thread_rows);
    info!(
        "sequential baseline {:.2} ms ± {:.2} over {} thread counts",
        by_threads.sequential.mean,
        by_threads.sequential.std_dev,
        by_threads.threads.len()
    );
    plot_threads::render_thread_comparison(&by_threads, &opt.thread_chart)?;

    let by_threshold = threshold_stats::threshold_stats(&threshold_rows);
    if by_threshold.is_empty() {
        warn!("{} has no trials", opt.threshold_results.display());
    }
    plot_thresholds::render_threshold_variation(&by_threshold, &opt.threshold_chart)?;

    report::print_best_thresholds(&report::best_thresholds(&by_threshold));

    Ok(())
}
