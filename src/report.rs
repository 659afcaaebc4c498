use crate::stats::Stat;
use crate::threshold_stats::ThresholdStats;
use thousands::Separable;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestThreshold {
    pub threads: u32,
    pub threshold: u32,
    pub stat: Stat,
}

/// Fastest threshold per thread count. The first one measured wins a tie.
pub fn best_thresholds(stats: &ThresholdStats) -> Vec<BestThreshold> {
    stats
        .iter()
        .filter_map(|(threads, series)| {
            series
                .points()
                .filter(|(_, stat)| stat.is_defined())
                .fold(None, |best: Option<(u32, Stat)>, (threshold, stat)| match best {
                    Some((_, b)) if b.mean <= stat.mean => best,
                    _ => Some((threshold, stat)),
                })
                .map(|(threshold, stat)| BestThreshold {
                    threads,
                    threshold,
                    stat,
                })
        })
        .collect()
}

pub fn print_best_thresholds(best: &[BestThreshold]) {
    println!("{:>8} {:>10} {:>12} {:>10}", "threads", "threshold", "mean (ms)", "std (ms)");
    for b in best {
        println!(
            "{:>8} {:>10} {:>12} {:>10.2}",
            b.threads,
            b.threshold.separate_with_commas(),
            format!("{:.2}", b.stat.mean).separate_with_commas(),
            b.stat.std_dev
        );
    }
}
