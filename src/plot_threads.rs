use crate::error::{AnalysisError, Result};
use crate::plot::{
    self, LineStyle, Marker, OutputFormat, TickedAxis, BLUE_C0, FONT, GREEN_C2, ORANGE_C1,
};
use crate::stats::Stat;
use crate::thread_stats::ThreadStats;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const PLOT_WIDTH: u32 = 1200;
const PLOT_HEIGHT: u32 = 600;

/// Parallel and ForkJoin mean ± std per thread count against the Sequential
/// baseline band.
pub fn render_thread_comparison(stats: &ThreadStats, path: &Path) -> Result<()> {
    plot::prepare_output(path)?;

    let resolution = (PLOT_WIDTH, PLOT_HEIGHT);
    match OutputFormat::of(path) {
        OutputFormat::Svg => draw(SVGBackend::new(path, resolution).into_drawing_area(), stats),
        OutputFormat::Bitmap => {
            draw(BitMapBackend::new(path, resolution).into_drawing_area(), stats)
        }
    }
    .map_err(|e| AnalysisError::render(e, path))?;

    info!("wrote thread comparison to {}", path.display());
    Ok(())
}

fn points(threads: &[u32], stats: &[Stat]) -> Vec<(f64, f64, f64)> {
    threads
        .iter()
        .zip(stats)
        .map(|(&t, s)| (t as f64, s.mean, s.std_dev))
        .collect()
}

fn x_range(threads: &[u32]) -> (f64, f64) {
    match plot::finite_extent(threads.iter().map(|&t| t as f64)) {
        Some((lo, hi)) => (lo - 0.5, hi + 0.5),
        None => (0.0, 1.0),
    }
}

/// Covers every whisker and the baseline band, padded by 5%.
fn y_range(stats: &ThreadStats) -> (f64, f64) {
    let series = stats.fork_join.iter().chain(stats.parallel.iter());
    let values = series
        .flat_map(|s| [s.mean, s.low(), s.high()])
        .chain([
            stats.sequential.mean,
            stats.sequential.low(),
            stats.sequential.high(),
        ]);

    match plot::finite_extent(values) {
        Some((lo, hi)) => {
            let padding = ((hi - lo) * 0.05).max(1.0);
            (lo - padding, hi + padding)
        }
        None => (0.0, 1.0),
    }
}

fn draw<DB>(
    root: DrawingArea<DB, Shift>,
    stats: &ThreadStats,
) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_min, x_max) = x_range(&stats.threads);
    let (y_min, y_max) = y_range(stats);
    let key_points: Vec<f64> = stats.threads.iter().map(|&t| t as f64).collect();
    let (first, last) =
        plot::finite_extent(key_points.iter().copied()).unwrap_or((x_min, x_max));

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(
            "ForkJoin vs Parallel vs Sequential Matrix Multiplication Times",
            (FONT, 22),
        )
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 50)
        .build_cartesian_2d(TickedAxis::new(x_min..x_max, key_points), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| format!("{}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .y_labels(15)
        .x_desc("Number of Threads")
        .y_desc("Time (ms)")
        .draw()?;

    let series = [
        ("Parallel", &stats.parallel, Marker::Square(3), BLUE_C0),
        ("ForkJoin", &stats.fork_join, Marker::Circle(3), ORANGE_C1),
    ];
    for (name, figures, marker, color) in series {
        let points = points(&stats.threads, figures);
        let line: Vec<(f64, f64)> = points
            .iter()
            .filter(|(_, mean, _)| mean.is_finite())
            .map(|&(x, mean, _)| (x, mean))
            .collect();

        plot::draw_line(&mut chart, line, LineStyle::Dashed, color.stroke_width(2))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        plot::draw_error_bars(&mut chart, &points, marker, color)?;
    }

    let baseline = stats.sequential;
    for level in [baseline.low(), baseline.high()] {
        if level.is_finite() {
            plot::draw_line(
                &mut chart,
                vec![(first, level), (last, level)],
                LineStyle::Dashed,
                GREEN_C2.stroke_width(1),
            )?;
        }
    }
    if baseline.mean.is_finite() {
        plot::draw_line(
            &mut chart,
            vec![(first, baseline.mean), (last, baseline.mean)],
            LineStyle::Dashed,
            GREEN_C2.stroke_width(2),
        )?
        .label("Sequential")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], GREEN_C2.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 13))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> ThreadStats {
        ThreadStats {
            threads: vec![1, 2, 4],
            fork_join: vec![
                Stat { mean: 50.0, std_dev: 5.0 },
                Stat::UNDEFINED,
                Stat { mean: 20.0, std_dev: 2.0 },
            ],
            parallel: vec![
                Stat { mean: 60.0, std_dev: 0.0 },
                Stat { mean: 40.0, std_dev: 4.0 },
                Stat { mean: 30.0, std_dev: 1.0 },
            ],
            sequential: Stat { mean: 100.0, std_dev: 10.0 },
        }
    }

    #[test]
    fn y_range_covers_band_and_whiskers() {
        let (lo, hi) = y_range(&stats());
        assert!(lo < 18.0);
        assert!(hi > 110.0);
        assert!(lo.is_finite() && hi.is_finite());
    }

    #[test]
    fn y_range_tolerates_undefined_everything() {
        let stats = ThreadStats {
            threads: vec![1],
            fork_join: vec![Stat::UNDEFINED],
            parallel: vec![Stat::UNDEFINED],
            sequential: Stat::UNDEFINED,
        };
        assert_eq!(y_range(&stats), (0.0, 1.0));
    }

    #[test]
    fn x_range_pads_thread_counts() {
        assert_eq!(x_range(&[2, 1, 4]), (0.5, 4.5));
        assert_eq!(x_range(&[]), (0.0, 1.0));
    }

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("matmul-analyze-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn renders_with_undefined_groups() {
        let path = scratch_path("threads-undefined.svg");

        render_thread_comparison(&stats(), &path).unwrap();

        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn renders_without_any_samples() {
        let stats = ThreadStats {
            threads: vec![1, 2],
            fork_join: vec![Stat::UNDEFINED; 2],
            parallel: vec![Stat::UNDEFINED; 2],
            sequential: Stat::UNDEFINED,
        };
        let path = scratch_path("threads-empty.svg");

        render_thread_comparison(&stats, &path).unwrap();

        assert!(path.exists());
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn points_follow_thread_order() {
        let s = stats();
        let points = points(&s.threads, &s.parallel);
        assert_eq!(points[0], (1.0, 60.0, 0.0));
        assert_eq!(points[2], (4.0, 30.0, 1.0));
    }
}
