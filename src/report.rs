use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, warn};

use crate::aggregate::{count_by_field, count_by_registration_year, group_by_field};
use crate::company::{Company, Field};
use crate::render::ChartRenderer;

pub const TIMELINE_SLUG: &str = "registration_year";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOutcome {
    pub name: &'static str,
    pub path: PathBuf,
    pub written: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub companies: usize,
    pub charts: Vec<ChartOutcome>,
}

impl ReportSummary {
    pub fn written(&self) -> usize {
        self.charts.iter().filter(|chart| chart.written).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ChartOutcome> {
        self.charts.iter().filter(|chart| !chart.written)
    }
}

/// Renders one pie per [`Field`] plus the registration timeline into
/// `out_dir/<slug>.png`. A failing chart is recorded and skipped.
pub fn generate_report<R: ChartRenderer>(
    renderer: &R,
    companies: &[Company],
    out_dir: &Path,
    label: &str,
) -> ReportSummary {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "report",
        label = label,
        companies = companies.len(),
        "Generating chart report"
    );

    let mut summary = ReportSummary {
        companies: companies.len(),
        charts: Vec::with_capacity(Field::ALL.len() + 1),
    };

    for field in Field::ALL {
        let path = out_dir.join(format!("{}.png", field.slug()));
        let title = format!("{} ({})", field.title(), label);
        let written = match field {
            Field::Status => {
                let groups = group_by_field(companies, field);
                renderer.render_status_pie_from_groups_titled(&groups, &path, &title)
            }
            _ => {
                let table = count_by_field(companies, field);
                renderer.render_category_pie(&table, &path, &title)
            }
        };
        summary.charts.push(ChartOutcome {
            name: field.slug(),
            path,
            written,
        });
    }

    let path = out_dir.join(format!("{}.png", TIMELINE_SLUG));
    let title = format!("Company Registrations per Year ({})", label);
    let years = count_by_registration_year(companies);
    let written = renderer.render_year_series(&years, &path, &title);
    summary.charts.push(ChartOutcome {
        name: TIMELINE_SLUG,
        path,
        written,
    });

    let failed = summary.charts.len() - summary.written();
    if failed > 0 {
        warn!(
            action = "complete",
            component = "report",
            label = label,
            written = summary.written(),
            failed,
            duration_ms = start_time.elapsed().as_millis(),
            "Chart report finished with failures"
        );
    } else {
        info!(
            action = "complete",
            component = "report",
            label = label,
            written = summary.written(),
            duration_ms = start_time.elapsed().as_millis(),
            "Chart report finished"
        );
    }

    summary
}
