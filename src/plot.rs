use crate::error::{AnalysisError, Result};
use plotters::chart::SeriesAnno;
use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint};
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::path::Path;

pub const FONT: &str = "sans-serif";

pub const BLUE_C0: RGBColor = RGBColor(31, 119, 180);
pub const ORANGE_C1: RGBColor = RGBColor(255, 127, 14);
pub const GREEN_C2: RGBColor = RGBColor(44, 160, 44);
pub const RED_C3: RGBColor = RGBColor(214, 39, 40);

pub const SERIES_COLORS: [RGBColor; 4] = [BLUE_C0, ORANGE_C1, GREEN_C2, RED_C3];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Bitmap,
}

impl OutputFormat {
    /// `.svg` gets vector output, anything else is encoded as a bitmap by extension.
    pub fn of(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
            _ => OutputFormat::Bitmap,
        }
    }
}

pub fn prepare_output(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| AnalysisError::io(e, dir))
        }
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    LongDashed,
    Dotted,
}

impl LineStyle {
    pub const CYCLE: [LineStyle; 4] = [
        LineStyle::Solid,
        LineStyle::Dashed,
        LineStyle::LongDashed,
        LineStyle::Dotted,
    ];

    pub fn nth(i: usize) -> LineStyle {
        Self::CYCLE[i % Self::CYCLE.len()]
    }

    /// Dash length and gap in pixels.
    fn dash(self) -> Option<(u32, u32)> {
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some((8, 5)),
            LineStyle::LongDashed => Some((16, 4)),
            LineStyle::Dotted => Some((2, 4)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle(u32),
    Square(i32),
}

pub fn draw_line<'a, 'b, DB, X>(
    chart: &'b mut ChartContext<'a, DB, Cartesian2d<X, RangedCoordf64>>,
    points: Vec<(f64, f64)>,
    line: LineStyle,
    style: ShapeStyle,
) -> std::result::Result<&'b mut SeriesAnno<'a, DB>, DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64>,
{
    match line.dash() {
        None => chart.draw_series(LineSeries::new(points, style)),
        Some((size, spacing)) => {
            chart.draw_series(DashedLineSeries::new(points, size, spacing, style))
        }
    }
}

/// Mean ± std whiskers and a marker per point. Points with an undefined mean
/// are left out; a point without a usable spread keeps its marker only.
pub fn draw_error_bars<'a, DB, X>(
    chart: &mut ChartContext<'a, DB, Cartesian2d<X, RangedCoordf64>>,
    points: &[(f64, f64, f64)],
    marker: Marker,
    color: RGBColor,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend + 'a,
    X: Ranged<ValueType = f64>,
{
    chart.draw_series(
        points
            .iter()
            .filter(|(_, mean, std_dev)| mean.is_finite() && std_dev.is_finite())
            .map(|&(x, mean, std_dev)| {
                ErrorBar::new_vertical(x, mean - std_dev, mean, mean + std_dev, color, 6)
            }),
    )?;

    let finite = points
        .iter()
        .filter(|(_, mean, _)| mean.is_finite())
        .map(|&(x, mean, _)| (x, mean));

    match marker {
        Marker::Circle(size) => {
            chart.draw_series(
                finite.map(|p| EmptyElement::at(p) + Circle::new((0, 0), size, color.filled())),
            )?;
        }
        Marker::Square(half) => {
            chart.draw_series(finite.map(|p| {
                EmptyElement::at(p) + Rectangle::new([(-half, -half), (half, half)], color.filled())
            }))?;
        }
    }

    Ok(())
}

/// Linear `f64` axis whose ticks sit exactly on the given values.
#[derive(Clone)]
pub struct TickedAxis {
    range: RangedCoordf64,
    ticks: Vec<f64>,
}

impl TickedAxis {
    pub fn new(range: std::ops::Range<f64>, ticks: Vec<f64>) -> Self {
        Self {
            range: range.into(),
            ticks,
        }
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }
}

impl Ranged for TickedAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.range.map(value, limit)
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        self.ticks.clone()
    }

    fn range(&self) -> std::ops::Range<f64> {
        self.range.range()
    }
}

/// Min and max over the finite values, `None` when there are none.
pub fn finite_extent<I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(OutputFormat::of(Path::new("out/a.svg")), OutputFormat::Svg);
        assert_eq!(OutputFormat::of(Path::new("out/a.SVG")), OutputFormat::Svg);
        assert_eq!(OutputFormat::of(Path::new("out/a.png")), OutputFormat::Bitmap);
        assert_eq!(OutputFormat::of(Path::new("chart")), OutputFormat::Bitmap);
    }

    #[test]
    fn line_styles_cycle() {
        assert_eq!(LineStyle::nth(0), LineStyle::Solid);
        assert_eq!(LineStyle::nth(3), LineStyle::Dotted);
        assert_eq!(LineStyle::nth(5), LineStyle::Dashed);
    }

    #[test]
    fn ticked_axis_keeps_given_ticks() {
        let axis = TickedAxis::new(0.5..4.5, vec![1.0, 2.0, 4.0]);

        assert_eq!(axis.ticks(), &[1.0, 2.0, 4.0]);
        assert_eq!(axis.range(), 0.5..4.5);
        assert_eq!(axis.map(&0.5, (0, 400)), 0);
        assert_eq!(axis.map(&4.5, (0, 400)), 400);
    }

    #[test]
    fn extent_skips_nan() {
        assert_eq!(finite_extent([3.0, f64::NAN, -1.0, 7.5]), Some((-1.0, 7.5)));
        assert_eq!(finite_extent([f64::NAN]), None);
        assert_eq!(finite_extent(std::iter::empty()), None);
    }
}
