use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create output directory {path:?}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no registration year at or before {current_year} to build an axis from")]
    EmptyDomain { current_year: i32 },

    #[error("frequency table is empty, nothing to plot")]
    EmptyTable,

    #[error("chart backend failed: {0:#}")]
    Rendering(#[source] anyhow::Error),
}
