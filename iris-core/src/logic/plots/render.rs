//! Chart rendering (PNG via the plotters bitmap backend)

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::confusion::ConfusionMatrix;
use super::font::FONT_FAMILY;
use super::PlotError;

const CONFUSION_SIZE: (u32, u32) = (800, 600);
const ACCURACY_SIZE: (u32, u32) = (600, 400);
const BAR_COLOR: RGBColor = RGBColor(0x4c, 0x72, 0xb0);

fn render_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

/// White-to-navy ramp, like a "Blues" heatmap
fn blues(fraction: f64) -> RGBColor {
    let t = fraction.clamp(0.0, 1.0);
    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    RGBColor(lerp(0xf7, 0x08), lerp(0xfb, 0x30), lerp(0xff, 0x6b))
}

fn centered() -> Pos {
    Pos::new(HPos::Center, VPos::Center)
}

/// Heatmap of `matrix`, true labels top to bottom, predicted left to right
pub fn draw_confusion_matrix(
    path: &Path,
    matrix: &ConfusionMatrix,
    title: &str,
) -> Result<(), PlotError> {
    let n = matrix.size() as i32;
    if n == 0 {
        return Err(PlotError::EmptyResults);
    }
    let max = matrix.max_count().max(1) as f64;

    let root = BitMapBackend::new(path, CONFUSION_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, (FONT_FAMILY, 24))
        .x_label_area_size(50)
        .y_label_area_size(110)
        .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())
        .map_err(render_err)?;

    // Row 0 is drawn at the top
    let flip = |row: i32| n - 1 - row;

    let label_at = |index: i32| {
        matrix
            .labels
            .get(index as usize)
            .cloned()
            .unwrap_or_default()
    };
    let x_fmt = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => label_at(*i),
        _ => String::new(),
    };
    let y_fmt = |v: &SegmentValue<i32>| match v {
        SegmentValue::CenterOf(i) => label_at(flip(*i)),
        _ => String::new(),
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n as usize)
        .y_labels(n as usize)
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt)
        .x_desc("Predicted")
        .y_desc("Actual")
        .label_style((FONT_FAMILY, 14))
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()
        .map_err(render_err)?;

    let cells: Vec<(i32, i32, usize)> = (0..n)
        .flat_map(|r| (0..n).map(move |c| (r, c)))
        .map(|(r, c)| (r, c, matrix.get(r as usize, c as usize)))
        .collect();

    chart
        .draw_series(cells.iter().map(|&(r, c, count)| {
            let y = flip(r);
            Rectangle::new(
                [
                    (SegmentValue::Exact(c), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(c + 1), SegmentValue::Exact(y + 1)),
                ],
                blues(count as f64 / max).filled(),
            )
        }))
        .map_err(render_err)?;

    chart
        .draw_series(cells.iter().map(|&(r, c, count)| {
            let color = if count as f64 / max > 0.5 { WHITE } else { BLACK };
            Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(c), SegmentValue::CenterOf(flip(r))),
                (FONT_FAMILY, 20).into_font().color(&color).pos(centered()),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Single bar of height `accuracy` on a 0 - 1.1 axis, value printed inside
pub fn draw_accuracy_chart(
    path: &Path,
    accuracy: f64,
    title: &str,
) -> Result<(), PlotError> {
    let root = BitMapBackend::new(path, ACCURACY_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption(title, (FONT_FAMILY, 20))
        .x_label_area_size(10)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0f64..1.0f64, 0.0f64..1.1f64)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(12)
        .y_desc("Accuracy Score")
        .label_style((FONT_FAMILY, 12))
        .axis_desc_style((FONT_FAMILY, 14))
        .draw()
        .map_err(render_err)?;

    let height = accuracy.clamp(0.0, 1.1);
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(0.2, 0.0), (0.8, height)],
            BAR_COLOR.filled(),
        )))
        .map_err(render_err)?;

    chart
        .draw_series(std::iter::once(Text::new(
            format!("{:.3}", accuracy),
            (0.5, height / 2.0),
            (FONT_FAMILY, 22).into_font().color(&WHITE).pos(centered()),
        )))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}
