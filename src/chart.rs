use crate::error::{DashboardError, Result};
use crate::pipeline::aggregate::{MonthlyTotal, RegionTotal};
use crate::report::format_amount;
use plotters::prelude::*;
use std::path::Path;
use tracing::{info, warn};

fn chart_error(e: impl std::fmt::Display) -> DashboardError {
    DashboardError::Chart(e.to_string())
}

/// Render the monthly sales trend as a line chart with point markers.
///
/// Consumes the chart-ready monthly series; an empty series is skipped
/// rather than drawn.
pub fn render_monthly_trend(
    series: &[MonthlyTotal],
    path: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    if series.is_empty() {
        warn!("No monthly data to chart, skipping trend chart");
        return Ok(());
    }

    let max_total = series
        .iter()
        .map(|m| m.total_sales)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Monthly Sales Trend", ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..series.len() as f64 - 0.5, 0.0..max_total * 1.1)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_labels(series.len())
        .x_label_formatter(&|x| {
            let at = x.round();
            if at < 0.0 {
                return String::new();
            }
            series
                .get(at as usize)
                .map(|m| m.month.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| format_amount(*y))
        .y_desc("Sales")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(LineSeries::new(
            series
                .iter()
                .enumerate()
                .map(|(i, m)| (i as f64, m.total_sales)),
            &BLUE,
        ))
        .map_err(chart_error)?;

    chart
        .draw_series(
            series
                .iter()
                .enumerate()
                .map(|(i, m)| Circle::new((i as f64, m.total_sales), 4, BLUE.filled())),
        )
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    info!(path = %path.display(), "Wrote monthly trend chart");
    Ok(())
}

/// Render sales by region as a bar chart, highlighting the top region.
///
/// Expects the descending-sorted region series so the first bar is the
/// best region; that bar is drawn in the highlight color.
pub fn render_region_bars(
    series: &[RegionTotal],
    path: &Path,
    width: u32,
    height: u32,
) -> Result<()> {
    if series.is_empty() {
        warn!("No regional data to chart, skipping bar chart");
        return Ok(());
    }

    let max_total = series
        .iter()
        .map(|r| r.total_sales)
        .fold(0.0f64, f64::max)
        .max(1.0);

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sales by Region", ("sans-serif", 24).into_font())
        .margin(12)
        .x_label_area_size(35)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..series.len() as f64 - 0.5, 0.0..max_total * 1.15)
        .map_err(chart_error)?;

    chart
        .configure_mesh()
        .x_labels(series.len())
        .x_label_formatter(&|x| {
            let at = x.round();
            if at < 0.0 {
                return String::new();
            }
            series
                .get(at as usize)
                .map(|r| r.region.clone())
                .unwrap_or_default()
        })
        .y_label_formatter(&|y| format_amount(*y))
        .y_desc("Total Sales")
        .draw()
        .map_err(chart_error)?;

    chart
        .draw_series(series.iter().enumerate().map(|(i, r)| {
            // First bar is the top region
            let color = if i == 0 { GREEN } else { BLUE };
            Rectangle::new(
                [(i as f64 - 0.3, 0.0), (i as f64 + 0.3, r.total_sales)],
                color.filled(),
            )
        }))
        .map_err(chart_error)?;

    chart
        .draw_series(series.iter().enumerate().map(|(i, r)| {
            Text::new(
                format_amount(r.total_sales),
                (i as f64 - 0.15, r.total_sales + max_total * 0.02),
                ("sans-serif", 13).into_font(),
            )
        }))
        .map_err(chart_error)?;

    root.present().map_err(chart_error)?;
    info!(path = %path.display(), "Wrote regional bar chart");
    Ok(())
}
