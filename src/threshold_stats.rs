use crate::perf::ThresholdResult;
use crate::stats::Stat;
use ahash::AHashMap;
use log::debug;

/// Mean time per threshold for one thread count. One entry per input row, so a
/// threshold measured in several trials appears once per trial with the same
/// figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThresholdSeries {
    pub thresholds: Vec<u32>,
    pub stats: Vec<Stat>,
}

impl ThresholdSeries {
    pub fn points(&self) -> impl Iterator<Item = (u32, Stat)> + '_ {
        self.thresholds.iter().copied().zip(self.stats.iter().copied())
    }
}

/// Thread count to series, iterated in the order thread counts were first seen.
#[derive(Debug, Clone, Default)]
pub struct ThresholdStats {
    entries: Vec<(u32, ThresholdSeries)>,
    index: AHashMap<u32, usize>,
}

impl ThresholdStats {
    pub fn get(&self, threads: u32) -> Option<&ThresholdSeries> {
        self.index.get(&threads).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &ThresholdSeries)> {
        self.entries.iter().map(|(threads, series)| (*threads, series))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&mut self, threads: u32) -> &mut ThresholdSeries {
        let i = match self.index.get(&threads) {
            Some(&i) => i,
            None => {
                self.entries.push((threads, ThresholdSeries::default()));
                self.index.insert(threads, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }
}

pub fn threshold_stats(rows: &[ThresholdResult]) -> ThresholdStats {
    let mut samples: AHashMap<(u32, u32), Vec<f64>> = AHashMap::new();
    for row in rows {
        samples
            .entry((row.threads, row.threshold))
            .or_default()
            .push(row.time);
    }

    let per_key: AHashMap<(u32, u32), Stat> = samples
        .into_iter()
        .map(|(key, times)| (key, Stat::of(times)))
        .collect();

    let mut result = ThresholdStats::default();
    for row in rows {
        let stat = per_key[&(row.threads, row.threshold)];
        let series = result.entry(row.threads);
        series.thresholds.push(row.threshold);
        series.stats.push(stat);
    }

    debug!(
        "{} thread counts across {} threshold trials",
        result.len(),
        rows.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(threads: u32, threshold: u32, time: f64) -> ThresholdResult {
        ThresholdResult {
            threads,
            threshold,
            time,
        }
    }

    #[test]
    fn trials_share_one_stat() {
        let rows = vec![row(1, 8, 10.0), row(1, 8, 20.0)];

        let stats = threshold_stats(&rows);
        let series = stats.get(1).unwrap();

        assert_eq!(series.thresholds, vec![8, 8]);
        assert_eq!(series.stats, vec![Stat { mean: 15.0, std_dev: 5.0 }; 2]);
    }

    #[test]
    fn matches_direct_computation_per_key() {
        let rows = vec![
            row(2, 1, 40.0),
            row(1, 1, 30.0),
            row(2, 2, 12.0),
            row(2, 1, 44.0),
            row(1, 1, 34.0),
            row(2, 2, 18.0),
            row(2, 1, 48.0),
        ];

        let stats = threshold_stats(&rows);

        for (threads, series) in stats.iter() {
            for (threshold, stat) in series.points() {
                let direct = Stat::of(
                    rows.iter()
                        .filter(|r| r.threads == threads && r.threshold == threshold)
                        .map(|r| r.time),
                );
                assert_eq!(stat, direct);
            }
        }
        assert_eq!(stats.get(2).unwrap().stats[0].mean, 44.0);
        assert_eq!(stats.get(1).unwrap().stats[0].mean, 32.0);
    }

    #[test]
    fn keeps_first_seen_order() {
        let rows = vec![
            row(4, 64, 5.0),
            row(4, 2, 9.0),
            row(2, 8, 7.0),
            row(4, 16, 3.0),
        ];

        let stats = threshold_stats(&rows);

        assert_eq!(stats.iter().map(|(t, _)| t).collect::<Vec<_>>(), vec![4, 2]);
        assert_eq!(stats.get(4).unwrap().thresholds, vec![64, 2, 16]);
        assert_eq!(stats.get(2).unwrap().thresholds, vec![8]);
        assert!(stats.get(3).is_none());
    }

    #[test]
    fn no_rows_no_groups() {
        let stats = threshold_stats(&[]);
        assert!(stats.is_empty());
    }
}
