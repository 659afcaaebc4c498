use crate::error::{AnalysisError, Result};
use crate::plot::{self, LineStyle, Marker, OutputFormat, FONT, SERIES_COLORS};
use crate::threshold_stats::{ThresholdSeries, ThresholdStats};
use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const PLOT_WIDTH: u32 = 1400;
const PLOT_HEIGHT: u32 = 1000;

/// Inclusive thread count ranges, one sub-chart each, laid out row by row.
pub const THREAD_GROUPS: [(u32, u32); 4] = [(1, 4), (5, 8), (9, 12), (13, 16)];

const X_LIMITS: (f64, f64) = (1.0, 540.0);
/// Only these thresholds decide the y limits.
const Y_FIT_THRESHOLDS: (u32, u32) = (1, 512);
const Y_MARGIN: f64 = 10.0;

#[derive(Debug)]
pub struct Panel<'a> {
    pub low: u32,
    pub high: u32,
    /// Thread count, position within the group and its series.
    pub series: Vec<(u32, usize, &'a ThresholdSeries)>,
    pub y_range: (f64, f64),
}

impl<'a> Panel<'a> {
    pub fn new(stats: &'a ThresholdStats, low: u32, high: u32) -> Result<Panel<'a>> {
        let series: Vec<(u32, usize, &ThresholdSeries)> = (low..=high)
            .enumerate()
            .filter_map(|(i, threads)| stats.get(threads).map(|s| (threads, i, s)))
            .collect();

        let y_range = y_bounds(series.iter().map(|(_, _, s)| *s))
            .ok_or(AnalysisError::EmptyRange { low, high })?;

        debug!(
            "threads {}-{}: {} series, y {:.1}..{:.1}",
            low,
            high,
            series.len(),
            y_range.0,
            y_range.1
        );

        Ok(Panel {
            low,
            high,
            series,
            y_range,
        })
    }
}

/// `(min mean - 10, max mean + 10)` over the points with threshold in [1, 512].
pub fn y_bounds<'a, I>(series: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a ThresholdSeries>,
{
    let (fit_lo, fit_hi) = Y_FIT_THRESHOLDS;
    let means = series.into_iter().flat_map(|s| {
        s.points()
            .filter(move |(threshold, _)| (fit_lo..=fit_hi).contains(threshold))
            .map(|(_, stat)| stat.mean)
    });

    plot::finite_extent(means).map(|(lo, hi)| (lo - Y_MARGIN, hi + Y_MARGIN))
}

/// ForkJoin time against threshold for each thread count, one sub-chart per
/// entry of [`THREAD_GROUPS`]. Every panel's bounds are settled before the
/// output file is touched, so a range without data leaves nothing behind.
pub fn render_threshold_variation(stats: &ThresholdStats, path: &Path) -> Result<()> {
    let panels = THREAD_GROUPS
        .iter()
        .map(|&(low, high)| Panel::new(stats, low, high))
        .collect::<Result<Vec<_>>>()?;

    plot::prepare_output(path)?;

    let resolution = (PLOT_WIDTH, PLOT_HEIGHT);
    match OutputFormat::of(path) {
        OutputFormat::Svg => draw(SVGBackend::new(path, resolution).into_drawing_area(), &panels),
        OutputFormat::Bitmap => {
            draw(BitMapBackend::new(path, resolution).into_drawing_area(), &panels)
        }
    }
    .map_err(|e| AnalysisError::render(e, path))?;

    info!("wrote threshold variation to {}", path.display());
    Ok(())
}

fn draw<DB>(root: DrawingArea<DB, Shift>, panels: &[Panel]) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let areas = root.split_evenly((2, 2));
    for (area, panel) in areas.iter().zip(panels) {
        draw_panel(area, panel)?;
    }

    root.present()?;
    Ok(())
}

fn draw_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel) -> std::result::Result<(), Box<dyn Error>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (x_min, x_max) = X_LIMITS;
    let (y_min, y_max) = panel.y_range;

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(format!("Thread Group {}-{}", panel.low, panel.high), (FONT, 18))
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d((x_min..x_max).log_scale().base(2.0), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|v| format!("{:.0}", v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("Threshold")
        .y_desc("Time (ms)")
        .draw()?;

    for &(threads, position, series) in &panel.series {
        let color = SERIES_COLORS[position % SERIES_COLORS.len()];
        let points: Vec<(f64, f64, f64)> = series
            .points()
            .map(|(threshold, stat)| (threshold as f64, stat.mean, stat.std_dev))
            .filter(|&(x, _, _)| x >= x_min && x <= x_max)
            .collect();
        let line: Vec<(f64, f64)> = points
            .iter()
            .filter(|(_, mean, _)| mean.is_finite())
            .map(|&(x, mean, _)| (x, mean))
            .collect();

        plot::draw_line(&mut chart, line, LineStyle::nth(position), color.stroke_width(1))?
            .label(format!("{} Threads", threads))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        plot::draw_error_bars(&mut chart, &points, Marker::Circle(2), color)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font((FONT, 12))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}
