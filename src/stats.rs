/// Mean and population standard deviation of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub mean: f64,
    pub std_dev: f64,
}

impl Stat {
    pub const UNDEFINED: Stat = Stat {
        mean: f64::NAN,
        std_dev: f64::NAN,
    };

    /// Population convention (divide by n) so a single trial has zero spread.
    /// An empty sample is undefined rather than zero.
    pub fn of<I>(values: I) -> Stat
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().collect();
        if values.is_empty() {
            return Stat::UNDEFINED;
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Stat {
            mean,
            std_dev: variance.sqrt(),
        }
    }

    pub fn is_defined(&self) -> bool {
        self.mean.is_finite()
    }

    pub fn low(&self) -> f64 {
        self.mean - self.std_dev
    }

    pub fn high(&self) -> f64 {
        self.mean + self.std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn population_std() {
        let stat = Stat::of([10.0, 20.0]);
        assert_eq!(stat.mean, 15.0);
        assert_eq!(stat.std_dev, 5.0);

        let stat = Stat::of([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(stat.mean, 5.0);
        assert_eq!(stat.std_dev, 2.0);
    }

    #[test]
    fn single_sample_has_no_spread() {
        let stat = Stat::of([100.0]);
        assert_eq!(stat.mean, 100.0);
        assert_eq!(stat.std_dev, 0.0);
        assert_eq!(stat.low(), 100.0);
        assert_eq!(stat.high(), 100.0);
    }

    #[test]
    fn empty_sample_is_undefined() {
        let stat = Stat::of(std::iter::empty());
        assert!(stat.mean.is_nan());
        assert!(stat.std_dev.is_nan());
        assert!(!stat.is_defined());
    }
}
