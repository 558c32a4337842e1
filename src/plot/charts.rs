//! SVG chart files rendered with Plotters.
//!
//! The SVG backend keeps the dependency surface small (no system font/raster
//! libraries) while producing files that open anywhere. All series data
//! comes from already-computed aggregates.

use std::error::Error;
use std::path::{Path, PathBuf};

use plotters::coord::ranged1d::{IntoSegmentedCoord, SegmentValue};
use plotters::prelude::*;

use crate::domain::AggregateResult;
use crate::error::AnalysisError;

const CHART_SIZE: (u32, u32) = (800, 480);

// Palette close to the classic dashboard look.
const LINE_BLUE: RGBColor = RGBColor(65, 105, 225);
const BAR_CORAL: RGBColor = RGBColor(240, 128, 128);
const BAR_GREEN: RGBColor = RGBColor(60, 179, 113);

/// Paths of the rendered chart files.
#[derive(Debug, Clone)]
pub struct ChartFiles {
    pub daily_revenue: PathBuf,
    pub units_by_product: PathBuf,
    pub revenue_by_product: PathBuf,
}

/// Render the three dashboard charts into `dir`.
pub fn render_dashboard_svg(
    dir: &Path,
    by_date: &AggregateResult,
    by_product: &AggregateResult,
) -> Result<ChartFiles, AnalysisError> {
    std::fs::create_dir_all(dir).map_err(|e| AnalysisError::Io {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let files = ChartFiles {
        daily_revenue: dir.join("daily_revenue.svg"),
        units_by_product: dir.join("units_by_product.svg"),
        revenue_by_product: dir.join("revenue_by_product.svg"),
    };

    let date_labels: Vec<String> = by_date.groups.keys().map(|k| k.to_string()).collect();
    let date_revenue: Vec<f64> = by_date
        .groups
        .values()
        .map(|t| t.revenue_sum.as_f64_dollars())
        .collect();

    let product_labels: Vec<String> = by_product.groups.keys().map(|k| k.to_string()).collect();
    let product_units: Vec<f64> = by_product
        .groups
        .values()
        .map(|t| t.quantity_sum as f64)
        .collect();
    let product_revenue: Vec<f64> = by_product
        .groups
        .values()
        .map(|t| t.revenue_sum.as_f64_dollars())
        .collect();

    render_line(
        &files.daily_revenue,
        "Daily Revenue Trend",
        "Revenue ($)",
        &date_labels,
        &date_revenue,
    )
    .map_err(|e| render_error(&files.daily_revenue, e))?;

    render_bars(
        &files.units_by_product,
        "Total Units Sold by Product",
        "Quantity Sold",
        &product_labels,
        &product_units,
        BAR_CORAL,
    )
    .map_err(|e| render_error(&files.units_by_product, e))?;

    render_bars(
        &files.revenue_by_product,
        "Total Revenue by Product",
        "Revenue ($)",
        &product_labels,
        &product_revenue,
        BAR_GREEN,
    )
    .map_err(|e| render_error(&files.revenue_by_product, e))?;

    Ok(files)
}

fn render_error(path: &Path, e: Box<dyn Error>) -> AnalysisError {
    AnalysisError::Render {
        target: path.display().to_string(),
        message: e.to_string(),
    }
}

fn render_line(
    path: &Path,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_max = labels.len().saturating_sub(1).max(1) as f64;
    let y_max = padded_max(values);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_labels(labels.len().min(12))
        .x_label_formatter(&|x| {
            let rounded = x.round();
            if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
                return String::new();
            }
            labels
                .get(rounded as usize)
                .cloned()
                .unwrap_or_default()
        })
        .draw()?;

    chart.draw_series(LineSeries::new(
        values.iter().enumerate().map(|(i, &v)| (i as f64, v)),
        &LINE_BLUE,
    ))?;
    chart.draw_series(
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Circle::new((i as f64, v), 3, LINE_BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn render_bars(
    path: &Path,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
    color: RGBColor,
) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = padded_max(values);

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d((0..labels.len()).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_desc)
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                labels.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0.0),
                (SegmentValue::Exact(i + 1), v),
            ],
            color.mix(0.85).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}

/// Max value with 10% headroom; never zero so the y-range stays valid.
fn padded_max(values: &[f64]) -> f64 {
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    if max <= 0.0 { 1.0 } else { max * 1.1 }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::agg::aggregate;
    use crate::data::sample::canonical_records;
    use crate::domain::GroupDim;

    #[test]
    fn dashboard_renders_three_svg_files() {
        let records = canonical_records();
        let by_date = aggregate(&records, GroupDim::Date).unwrap();
        let by_product = aggregate(&records, GroupDim::Product).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let files = render_dashboard_svg(dir.path(), &by_date, &by_product).unwrap();

        for path in [
            &files.daily_revenue,
            &files.units_by_product,
            &files.revenue_by_product,
        ] {
            let contents = std::fs::read_to_string(path).unwrap();
            assert!(contents.contains("<svg"), "not an SVG: {}", path.display());
        }
    }

    #[test]
    fn single_day_dataset_still_renders() {
        let records: Vec<_> = canonical_records()
            .into_iter()
            .filter(|r| r.date == chrono::NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .collect();
        let by_date = aggregate(&records, GroupDim::Date).unwrap();
        let by_product = aggregate(&records, GroupDim::Product).unwrap();

        let dir = tempfile::tempdir().unwrap();
        render_dashboard_svg(dir.path(), &by_date, &by_product).unwrap();
    }

    #[test]
    fn padded_max_has_headroom() {
        assert_eq!(padded_max(&[]), 1.0);
        assert_eq!(padded_max(&[0.0]), 1.0);
        assert!((padded_max(&[100.0]) - 110.0).abs() < 1e-9);
    }
}
