use std::path::Path;

use plotters::element::Pie;
use plotters::prelude::*;
use plotters::style::Palette;

use crate::config::ChartOptions;
use crate::stats::Count;
use crate::utils::format_number;

const TEXT_COLOR: RGBColor = RGBColor(38, 64, 64);
const LEGEND_ROW_HEIGHT: i32 = 36;
const LEGEND_SWATCH: i32 = 24;

/// Slice color for the entry at `index` in legend order.
pub fn slice_color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[index % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

/// Draws `entries` (already in legend order) as a pie with a legend on the
/// right. With `percentages` set each slice is labelled with its share.
pub(crate) fn draw_pie(
    path: &Path,
    entries: &[(&str, Count)],
    title: &str,
    options: &ChartOptions,
    percentages: bool,
) -> anyhow::Result<()> {
    let font = options.font_family.as_str();
    let text_style = (font, options.label_font_size)
        .into_font()
        .color(&TEXT_COLOR);

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        title,
        (font, options.title_font_size)
            .into_font()
            .color(&TEXT_COLOR),
    )?;

    let (pie_area, legend_area) = root.split_horizontally((options.width as i32) * 3 / 5);

    let sizes: Vec<f64> = entries.iter().map(|(_, count)| *count as f64).collect();
    let colors: Vec<RGBColor> = (0..entries.len()).map(slice_color).collect();
    let labels: Vec<String> = if percentages {
        entries.iter().map(|(label, _)| label.to_string()).collect()
    } else {
        vec![String::new(); entries.len()]
    };

    let (width, height) = pie_area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.38;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(text_style.clone());
    if percentages {
        pie.percentages(text_style.clone());
    }
    pie_area.draw(&pie)?;

    let (_, legend_height) = legend_area.dim_in_pixel();
    let capacity = ((legend_height as i32 - LEGEND_ROW_HEIGHT) / LEGEND_ROW_HEIGHT).max(1) as usize;
    let shown = if entries.len() > capacity {
        capacity - 1
    } else {
        entries.len()
    };

    for (index, (label, count)) in entries.iter().take(shown).enumerate() {
        let top = LEGEND_ROW_HEIGHT / 2 + index as i32 * LEGEND_ROW_HEIGHT;
        legend_area.draw(&Rectangle::new(
            [(0, top), (LEGEND_SWATCH, top + LEGEND_SWATCH)],
            slice_color(index).filled(),
        ))?;
        legend_area.draw(&Text::new(
            format!("{} ({})", label, format_number(*count)),
            (LEGEND_SWATCH + 12, top),
            text_style.clone(),
        ))?;
    }

    if shown < entries.len() {
        let rest: Count = entries[shown..].iter().map(|(_, count)| *count).sum();
        let top = LEGEND_ROW_HEIGHT / 2 + shown as i32 * LEGEND_ROW_HEIGHT;
        legend_area.draw(&Text::new(
            format!(
                "... {} more ({})",
                entries.len() - shown,
                format_number(rest)
            ),
            (LEGEND_SWATCH + 12, top),
            text_style.clone(),
        ))?;
    }

    root.present()?;
    Ok(())
}
