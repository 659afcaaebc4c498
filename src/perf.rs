use serde::Deserialize;

/// One line of `thread_results.csv`. Sequential-only lines carry no ForkJoin or
/// Parallel timing and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThreadResult {
    #[serde(rename = "Threads")]
    pub threads: u32,
    #[serde(rename = "Sequential")]
    pub sequential: Option<f64>,
    #[serde(rename = "ForkJoin")]
    pub fork_join: Option<f64>,
    #[serde(rename = "Parallel")]
    pub parallel: Option<f64>,
}

impl ThreadResult {
    pub const COLUMNS: [&'static str; 4] = ["Threads", "Sequential", "ForkJoin", "Parallel"];
}

/// One ForkJoin trial of `threshold_results.csv`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ThresholdResult {
    #[serde(rename = "Threads")]
    pub threads: u32,
    #[serde(rename = "Threshold")]
    pub threshold: u32,
    #[serde(rename = "Time")]
    pub time: f64,
}

impl ThresholdResult {
    pub const COLUMNS: [&'static str; 3] = ["Threads", "Threshold", "Time"];
}

/// Empty fields and NaN both count as "no sample".
pub fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}
