use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters_canvas::CanvasBackend;
use std::collections::BTreeSet;

use crate::config::token_color;
use crate::format::short_date;
use crate::models::{DateRange, PriceHistory, TokenProportion, TokenWeight};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub color: (u8, u8, u8),
    pub points: Vec<(i64, f64)>,
}

/// Price lines of every visible token over `range` of the date axis.
///
/// With `apply_scale` each line is divided by its first price in range so
/// tokens with very different prices share one axis.
pub fn history_series(
    history: &PriceHistory,
    range: DateRange,
    apply_scale: bool,
    hidden: &BTreeSet<String>,
) -> Vec<ChartSeries> {
    history
        .iter()
        .enumerate()
        .filter(|(_, (name, _))| !hidden.contains(*name))
        .map(|(position, (name, samples))| {
            let end = (range.end + 1).min(samples.len());
            let start = range.start.min(end);
            let window = &samples[start..end];
            let base = window.first().map(|s| s.value).unwrap_or(0.0);
            let points = window
                .iter()
                .map(|sample| {
                    let value = if apply_scale && base != 0.0 {
                        sample.value / base
                    } else {
                        sample.value
                    };
                    (sample.time, value)
                })
                .collect();
            ChartSeries {
                name: name.clone(),
                color: token_color(position),
                points,
            }
        })
        .collect()
}

/// Step lines of each token's weight, from the base proportions through every
/// scheduled change, between `initial_date` and `finish_date`.
pub fn weight_series(
    weights: &[TokenWeight],
    initial: &[TokenProportion],
    initial_date: i64,
    finish_date: i64,
) -> Vec<ChartSeries> {
    initial
        .iter()
        .enumerate()
        .map(|(position, proportion)| {
            let mut current = proportion.weight;
            let mut points = vec![(initial_date, current)];
            for entry in weights {
                if let Some(token) = entry.tokens.iter().find(|t| t.name == proportion.name) {
                    points.push((entry.timestamp, current));
                    current = token.weight;
                    points.push((entry.timestamp, current));
                }
            }
            points.push((finish_date.max(initial_date), current));
            ChartSeries {
                name: proportion.name.clone(),
                color: token_color(position),
                points,
            }
        })
        .collect()
}

fn bounds(series: &[ChartSeries]) -> Option<((i64, i64), (f64, f64))> {
    let mut points = series.iter().flat_map(|s| s.points.iter());
    let first = points.next()?;
    let init = ((first.0, first.0), (first.1, first.1));
    let ((x0, x1), (y0, y1)) = points.fold(init, |((x0, x1), (y0, y1)), (x, y)| {
        ((x0.min(*x), x1.max(*x)), (y0.min(*y), y1.max(*y)))
    });
    let x1 = if x1 == x0 { x0 + 1 } else { x1 };
    let pad = ((y1 - y0) * 0.05).max(0.01);
    Some(((x0, x1), (y0 - pad, y1 + pad)))
}

pub fn draw_series<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    caption: &str,
    series: &[ChartSeries],
) -> Result<(), Box<dyn std::error::Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let Some(((x0, x1), (y0, y1))) = bounds(series) else {
        root.present()?;
        return Ok(());
    };

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_labels(6)
        .x_label_formatter(&|time| short_date(*time).unwrap_or_default())
        .draw()?;

    for line in series {
        let color = RGBColor(line.color.0, line.color.1, line.color.2);
        chart
            .draw_series(LineSeries::new(line.points.iter().copied(), &color))?
            .label(line.name.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Draws into the canvas element with id `canvas_id`.
pub fn draw_on_canvas(
    canvas_id: &str,
    caption: &str,
    series: &[ChartSeries],
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = CanvasBackend::new(canvas_id)
        .ok_or_else(|| format!("Cannot find canvas '{}'", canvas_id))?;
    let root = backend.into_drawing_area();
    draw_series(&root, caption, series)
}
