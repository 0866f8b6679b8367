use std::fs;
use std::io;
use std::path::Path;
use std::time::Instant;

use chrono::{Datelike, Local};
use tracing::{error, info};

use crate::config::ChartOptions;
use crate::error::RenderError;
use crate::pie::draw_pie;
use crate::stats::{group_sizes, ranked, FrequencyTable, GroupedTable};
use crate::timeline::{draw_year_series, YearDomain};

/// Turns frequency tables into image files.
///
/// Implementors provide the `try_*` methods, which report the structured
/// reason for a failure. The `render_*` methods wrap them for batch use:
/// failures are logged and collapsed into `false` so one broken chart
/// never aborts the caller.
pub trait ChartRenderer {
    fn try_render_category_pie<K: AsRef<str>>(
        &self,
        table: &FrequencyTable<K>,
        output_path: &Path,
        title: &str,
    ) -> Result<(), RenderError>;

    fn try_render_year_series(
        &self,
        table: &FrequencyTable<i32>,
        output_path: &Path,
        title: &str,
    ) -> Result<(), RenderError>;

    fn try_render_status_pie_from_groups<K: AsRef<str>, R>(
        &self,
        table: &GroupedTable<K, R>,
        output_path: &Path,
        title: Option<&str>,
    ) -> Result<(), RenderError>;

    fn render_category_pie<K: AsRef<str>>(
        &self,
        table: &FrequencyTable<K>,
        output_path: &Path,
        title: &str,
    ) -> bool {
        report_outcome(
            "category_pie",
            output_path,
            self.try_render_category_pie(table, output_path, title),
        )
    }

    fn render_year_series(
        &self,
        table: &FrequencyTable<i32>,
        output_path: &Path,
        title: &str,
    ) -> bool {
        report_outcome(
            "year_series",
            output_path,
            self.try_render_year_series(table, output_path, title),
        )
    }

    /// Uses the renderer's default status title.
    fn render_status_pie_from_groups<K: AsRef<str>, R>(
        &self,
        table: &GroupedTable<K, R>,
        output_path: &Path,
    ) -> bool {
        report_outcome(
            "status_pie",
            output_path,
            self.try_render_status_pie_from_groups(table, output_path, None),
        )
    }

    fn render_status_pie_from_groups_titled<K: AsRef<str>, R>(
        &self,
        table: &GroupedTable<K, R>,
        output_path: &Path,
        title: &str,
    ) -> bool {
        report_outcome(
            "status_pie",
            output_path,
            self.try_render_status_pie_from_groups(table, output_path, Some(title)),
        )
    }
}

fn report_outcome(chart: &str, output_path: &Path, outcome: Result<(), RenderError>) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            error!(
                action = "render",
                component = chart,
                path = ?output_path,
                error = %e,
                "Chart rendering failed"
            );
            false
        }
    }
}

/// Creates the directory `output_path` will be written into. Only the
/// immediate parent is created unless `recursive` is set, so a path with
/// several missing ancestors fails with [`RenderError::Directory`].
pub fn ensure_parent_dir(output_path: &Path, recursive: bool) -> Result<(), RenderError> {
    let parent = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => return Ok(()),
    };

    if parent.is_dir() {
        return Ok(());
    }

    let created = if recursive {
        fs::create_dir_all(parent)
    } else {
        fs::create_dir(parent)
    };

    match created {
        Ok(()) => {
            info!(action = "create", component = "output_dir", path = ?parent, "Created output directory");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists && parent.is_dir() => Ok(()),
        Err(source) => Err(RenderError::Directory {
            path: parent.to_path_buf(),
            source,
        }),
    }
}

/// [`ChartRenderer`] writing PNG files through plotters' bitmap backend.
#[derive(Debug, Clone, Default)]
pub struct PlottersRenderer {
    options: ChartOptions,
}

impl PlottersRenderer {
    pub fn new(options: ChartOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn current_year(&self) -> i32 {
        self.options
            .reference_year
            .unwrap_or_else(|| Local::now().year())
    }

    fn draw_pie_chart(
        &self,
        chart: &str,
        table: &FrequencyTable<&str>,
        output_path: &Path,
        title: &str,
        percentages: bool,
    ) -> Result<(), RenderError> {
        let start_time = Instant::now();
        if table.is_empty() {
            return Err(RenderError::EmptyTable);
        }

        let entries = ranked(table);
        ensure_parent_dir(output_path, self.options.create_missing_ancestors)?;
        draw_pie(output_path, &entries, title, &self.options, percentages)
            .map_err(RenderError::Rendering)?;

        info!(
            action = "complete",
            component = chart,
            path = ?output_path,
            slices = entries.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Pie chart written"
        );
        Ok(())
    }
}

impl ChartRenderer for PlottersRenderer {
    fn try_render_category_pie<K: AsRef<str>>(
        &self,
        table: &FrequencyTable<K>,
        output_path: &Path,
        title: &str,
    ) -> Result<(), RenderError> {
        let table: FrequencyTable<&str> = table
            .iter()
            .map(|(key, count)| (key.as_ref(), *count))
            .collect();
        self.draw_pie_chart("category_pie", &table, output_path, title, false)
    }

    fn try_render_year_series(
        &self,
        table: &FrequencyTable<i32>,
        output_path: &Path,
        title: &str,
    ) -> Result<(), RenderError> {
        let start_time = Instant::now();
        let current_year = self.current_year();
        let domain = YearDomain::from_table(table, current_year)
            .ok_or(RenderError::EmptyDomain { current_year })?;
        let points = domain.points(table);

        ensure_parent_dir(output_path, self.options.create_missing_ancestors)?;
        draw_year_series(output_path, &points, domain, title, &self.options)
            .map_err(RenderError::Rendering)?;

        info!(
            action = "complete",
            component = "year_series",
            path = ?output_path,
            first_year = domain.start(),
            last_year = domain.end() - 1,
            duration_ms = start_time.elapsed().as_millis(),
            "Registration timeline written"
        );
        Ok(())
    }

    fn try_render_status_pie_from_groups<K: AsRef<str>, R>(
        &self,
        table: &GroupedTable<K, R>,
        output_path: &Path,
        title: Option<&str>,
    ) -> Result<(), RenderError> {
        let sizes = group_sizes(table);
        let title = title.unwrap_or(&self.options.status_title);
        self.draw_pie_chart("status_pie", &sizes, output_path, title, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_missing_parent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("charts").join("status.png");

        ensure_parent_dir(&path, false).unwrap();
        assert!(tmp.path().join("charts").is_dir());

        // second call is a no-op
        ensure_parent_dir(&path, false).unwrap();
    }

    #[test]
    fn test_refuses_multiple_missing_levels() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a").join("b").join("chart.png");

        let err = ensure_parent_dir(&path, false).unwrap_err();
        assert!(matches!(err, RenderError::Directory { .. }));
        assert!(!tmp.path().join("a").exists());
    }

    #[test]
    fn test_recursive_creation_when_enabled() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("a").join("b").join("chart.png");

        ensure_parent_dir(&path, true).unwrap();
        assert!(tmp.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        ensure_parent_dir(Path::new("chart.png"), false).unwrap();
    }

    #[test]
    fn test_reference_year_overrides_clock() {
        let renderer = PlottersRenderer::new(ChartOptions {
            reference_year: Some(2024),
            ..Default::default()
        });
        assert_eq!(renderer.current_year(), 2024);
    }

    #[test]
    fn test_empty_year_table_fails_without_side_effects() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("timeline").join("years.png");
        let renderer = PlottersRenderer::default();

        let err = renderer
            .try_render_year_series(&FrequencyTable::new(), &path, "Registrations")
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyDomain { .. }));
        assert!(!renderer.render_year_series(&FrequencyTable::new(), &path, "Registrations"));
        assert!(!path.exists());
        assert!(!tmp.path().join("timeline").exists());
    }

    #[test]
    fn test_empty_pie_table_fails() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("class.png");
        let renderer = PlottersRenderer::default();
        let table: FrequencyTable<String> = FrequencyTable::new();

        let err = renderer
            .try_render_category_pie(&table, &path, "Company Class")
            .unwrap_err();
        assert!(matches!(err, RenderError::EmptyTable));
        assert!(!path.exists());
    }
}
