use std::ops::Range;
use std::path::Path;

use plotters::prelude::*;

use crate::config::ChartOptions;
use crate::stats::{Count, FrequencyTable};
use crate::utils::format_number;

const LINE_COLOR: RGBColor = RGBColor(226, 74, 51);
const TEXT_COLOR: RGBColor = RGBColor(38, 64, 64);

/// Half-open range of registration years plotted on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearDomain {
    start: i32,
    end: i32,
}

impl YearDomain {
    /// Spans from the earliest year in `table` through the latest year that
    /// is not after `current_year`. Future-dated keys never extend the axis.
    /// `None` when no key is at or before `current_year`, or when the last
    /// year has no successor in `i32`.
    pub fn from_table(table: &FrequencyTable<i32>, current_year: i32) -> Option<Self> {
        let start = *table.keys().min()?;
        let last = table
            .keys()
            .copied()
            .filter(|year| *year <= current_year)
            .max()?;
        Some(Self {
            start,
            end: last.checked_add(1)?,
        })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    /// Exclusive.
    pub fn end(&self) -> i32 {
        self.end
    }

    pub fn years(&self) -> Range<i32> {
        self.start..self.end
    }

    pub fn decades(&self) -> Vec<i32> {
        self.years().filter(|year| year.rem_euclid(10) == 0).collect()
    }

    /// One point per year in the domain; years missing from `table` count
    /// as zero.
    pub fn points(&self, table: &FrequencyTable<i32>) -> Vec<(i32, Count)> {
        self.years()
            .map(|year| (year, table.get(&year).copied().unwrap_or(0)))
            .collect()
    }
}

pub(crate) fn draw_year_series(
    path: &Path,
    points: &[(i32, Count)],
    domain: YearDomain,
    title: &str,
    options: &ChartOptions,
) -> anyhow::Result<()> {
    let peak = points.iter().map(|(_, count)| *count as u64).max().unwrap_or(0);
    let y_top = peak + peak / 10 + 1;
    let last_year = (domain.end() - 1).max(domain.start() + 1);
    let font = options.font_family.as_str();

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            title,
            (font, options.title_font_size)
                .into_font()
                .color(&TEXT_COLOR),
        )
        .margin(50)
        .x_label_area_size(70)
        .y_label_area_size(100)
        .build_cartesian_2d(
            (domain.start()..last_year)
                .with_key_points(domain.decades())
                .with_light_points(domain.years()),
            0u64..y_top,
        )?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("# of Companies Registered")
        .axis_desc_style((font, options.label_font_size).into_font().color(&TEXT_COLOR))
        .label_style((font, options.label_font_size).into_font().color(&TEXT_COLOR))
        .x_label_formatter(&|year| year.to_string())
        .y_label_formatter(&|count| format_number(*count as usize))
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|(year, count)| (*year, *count as u64)),
        LINE_COLOR.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}
