//! JSON output of a [`Report`].

use crate::Report;

/// Render a report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
