use serde::{Deserialize, Serialize};

/// Rendering parameters shared by every chart. Unset fields in a
/// deserialized config fall back to [`ChartOptions::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub font_family: String,
    pub title_font_size: u32,
    pub label_font_size: u32,
    /// Title used by the status pie when the caller does not pass one.
    pub status_title: String,
    /// Year treated as "now" when clipping future-dated registrations.
    /// `None` reads the local clock.
    pub reference_year: Option<i32>,
    /// Create every missing ancestor of the output path instead of only
    /// its immediate parent.
    pub create_missing_ancestors: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 2400,
            height: 1200,
            font_family: "serif".to_string(),
            title_font_size: 36,
            label_font_size: 20,
            status_title: "Company Status".to_string(),
            reference_year: None,
            create_missing_ancestors: false,
        }
    }
}
