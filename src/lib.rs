pub mod aggregate;
pub mod company;
pub mod config;
pub mod error;
pub mod pie;
pub mod render;
pub mod report;
pub mod stats;
pub mod timeline;
pub mod utils;

pub use aggregate::{count_by, count_by_field, count_by_registration_year, group_by, group_by_field};
pub use company::{Company, Field};
pub use config::ChartOptions;
pub use error::RenderError;
pub use render::{ChartRenderer, PlottersRenderer};
pub use report::{generate_report, ReportSummary};
pub use stats::{Count, FrequencyTable, GroupedTable};
pub use timeline::YearDomain;
