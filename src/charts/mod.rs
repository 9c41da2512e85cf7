// src/charts/mod.rs
use std::path::Path;

use plotters::element::Pie;
use plotters::prelude::*;

use crate::extractors::Listing;
use crate::utils::error::ChartError;

const BAR_CHART_SIZE: (u32, u32) = (1280, 960);
const PIE_CHART_SIZE: (u32, u32) = (900, 700);

// Bar fill matches the dashboard accent color.
const BAR_COLOR: RGBColor = RGBColor(20, 184, 166);

const PIE_PALETTE: [RGBColor; 6] = [
    RGBColor(20, 184, 166),
    RGBColor(249, 115, 22),
    RGBColor(99, 102, 241),
    RGBColor(234, 179, 8),
    RGBColor(236, 72, 153),
    RGBColor(107, 114, 128),
];

/// Renders the price-per-title bar chart as an SVG file.
/// Fixed styling; callers guarantee a non-empty listing.
pub fn render_bar_chart(listing: &Listing, path: &Path) -> Result<(), ChartError> {
    let root = SVGBackend::new(path, BAR_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let max_price = listing.iter().map(|r| r.price).fold(1.0_f64, f64::max);

    let mut chart = ChartBuilder::on(&root)
        .caption("Book Prices", ("sans-serif", 30))
        .margin(12)
        .x_label_area_size(200)
        .y_label_area_size(60)
        .build_cartesian_2d(0usize..listing.len(), 0.0..max_price * 1.1)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(listing.len().min(60))
        .x_label_formatter(&|index| axis_title(listing, *index))
        .x_label_style(
            ("sans-serif", 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_desc("Price (£)")
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    chart.draw_series(listing.iter().enumerate().map(|(index, record)| {
        let mut bar = Rectangle::new(
            [(index, 0.0), (index + 1, record.price)],
            BAR_COLOR.filled(),
        );
        bar.set_margin(0, 0, 2, 2);
        bar
    }))?;

    root.present()?;
    tracing::info!("Rendered bar chart to {}", path.display());
    Ok(())
}

/// Renders the availability breakdown pie chart as an SVG file.
/// One slice per distinct availability string, sized by record count.
pub fn render_pie_chart(listing: &Listing, path: &Path) -> Result<(), ChartError> {
    let root = SVGBackend::new(path, PIE_CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Availability", ("sans-serif", 30))?;

    let breakdown = availability_breakdown(listing);
    let sizes: Vec<f64> = breakdown.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<String> = breakdown.iter().map(|(name, _)| name.clone()).collect();
    let colors: Vec<RGBColor> = PIE_PALETTE
        .iter()
        .cycle()
        .take(breakdown.len())
        .cloned()
        .collect();

    let center = (
        PIE_CHART_SIZE.0 as i32 / 2,
        PIE_CHART_SIZE.1 as i32 / 2 - 20,
    );
    let radius = 240.0;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(-90.0);
    pie.label_style(("sans-serif", 18).into_font());
    pie.percentages(("sans-serif", 14).into_font());

    root.draw(&pie)?;
    root.present()?;
    tracing::info!("Rendered pie chart to {}", path.display());
    Ok(())
}

/// Record counts per distinct availability string, first-seen order.
fn availability_breakdown(listing: &Listing) -> Vec<(String, usize)> {
    let mut breakdown: Vec<(String, usize)> = Vec::new();
    for record in listing.iter() {
        match breakdown
            .iter_mut()
            .find(|(name, _)| *name == record.availability)
        {
            Some((_, count)) => *count += 1,
            None => breakdown.push((record.availability.clone(), 1)),
        }
    }
    breakdown
}

/// Axis label for a bar: the record title, truncated to keep the label
/// area readable.
fn axis_title(listing: &Listing, index: usize) -> String {
    const MAX_LABEL: usize = 22;
    match listing.records.get(index) {
        Some(record) if record.title.chars().count() > MAX_LABEL => {
            let head: String = record.title.chars().take(MAX_LABEL - 1).collect();
            format!("{}…", head)
        }
        Some(record) => record.title.clone(),
        None => String::new(),
    }
}
