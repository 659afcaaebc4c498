use crate::perf::{present, ThreadResult};
use crate::stats::Stat;
use log::{debug, warn};

/// Per thread count ForkJoin and Parallel figures, plus the Sequential baseline.
/// `fork_join[i]` and `parallel[i]` belong to `threads[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadStats {
    pub threads: Vec<u32>,
    pub fork_join: Vec<Stat>,
    pub parallel: Vec<Stat>,
    pub sequential: Stat,
}

pub fn thread_stats(rows: &[ThreadResult]) -> ThreadStats {
    let mut threads: Vec<u32> = Vec::new();
    for row in rows {
        if !threads.contains(&row.threads) {
            threads.push(row.threads);
        }
    }

    let group = |count: u32, column: fn(&ThreadResult) -> Option<f64>| {
        Stat::of(
            rows.iter()
                .filter(|row| row.threads == count)
                .filter_map(|row| present(column(row))),
        )
    };

    let fork_join: Vec<Stat> = threads
        .iter()
        .map(|&count| group(count, |row| row.fork_join))
        .collect();
    let parallel: Vec<Stat> = threads
        .iter()
        .map(|&count| group(count, |row| row.parallel))
        .collect();

    // Sequential runs are single threaded, so one baseline covers every group.
    let sequential = Stat::of(rows.iter().filter_map(|row| present(row.sequential)));

    for (i, count) in threads.iter().enumerate() {
        if !fork_join[i].is_defined() || !parallel[i].is_defined() {
            warn!("{} threads: missing ForkJoin or Parallel samples", count);
        }
    }
    debug!(
        "{} thread counts, sequential baseline {:.2} ± {:.2}",
        threads.len(),
        sequential.mean,
        sequential.std_dev
    );

    ThreadStats {
        threads,
        fork_join,
        parallel,
        sequential,
    }
}
