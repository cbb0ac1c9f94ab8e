use anyhow::Context;
use cdr_core::entities::AuditResult;
use cdr_core::radar::{RadarGeometry, RadarLayout};

use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::{output, report};
use crate::ui;

/// Print a result: the report screen for `table`, the stored JSON otherwise.
pub fn show_result(result: &AuditResult, flags: &GlobalFlags) -> anyhow::Result<()> {
    match flags.format {
        OutputFormat::Table => {
            println!("{}", report::render_result(result, ui::prefs().table_color));
            Ok(())
        }
        format => output(result, format),
    }
}

#[must_use]
pub fn radar_svg(result: &AuditResult) -> String {
    RadarGeometry::from_scores(&result.scores, RadarLayout::default()).render_svg()
}

/// Write the radar chart to `path`, or to stdout without one.
pub fn write_radar(result: &AuditResult, path: Option<&str>) -> anyhow::Result<()> {
    let svg = radar_svg(result);
    match path {
        Some(path) => std::fs::write(path, svg)
            .with_context(|| format!("failed to write radar chart to {path}")),
        None => {
            print!("{svg}");
            Ok(())
        }
    }
}
