//! Rendering a run's result for the terminal.

use clap::ValueEnum;
use swatch_core::RunReport;
use swatch_render::{MiniJinjaEngine, RenderError, TemplateEngine};

const SUMMARY_TEMPLATE: &str = r#"{{ title }}: {{ count }} colour{% if count != 1 %}s{% endif %}
{%- if initial %}
No previous snapshot, every colour is new.
{%- endif %}
{%- for section in sections %}{% if section.names %}
{{ section.label }} ({{ section.names | length }}): {{ section.names | join(", ") }}
{%- endif %}{% endfor %}
Version bump: {{ bump if bump else "none" }}"#;

/// How the run summary is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Renders a run summary. `dry_run` only changes the heading.
pub fn render_report(
    report: &RunReport,
    format: ReportFormat,
    dry_run: bool,
) -> Result<String, RenderError> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Text => {
            let changes = &report.changes;
            let title = if dry_run { "Dry run" } else { "Synced" };
            let data = serde_json::json!({
                "title": title,
                "count": report.snapshot.len(),
                "initial": changes.initial,
                "sections": [
                    { "label": "Added", "names": changes.added },
                    { "label": "Updated", "names": changes.updated },
                    { "label": "Deleted", "names": changes.deleted },
                ],
                "bump": report.bump.label(),
            });
            MiniJinjaEngine::new().render_template(SUMMARY_TEMPLATE, &data)
        }
    }
}
