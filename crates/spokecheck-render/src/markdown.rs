use crate::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();

    out.push_str("# Spokecheck report\n\n");
    out.push_str(&format!(
        "- Spoke: `{}`\n- Hub: `{}`\n- Verdict: **{}** (overall severity: {})\n\n",
        report.target.spoke_network_id,
        report.target.hub_network_id,
        report.verdict.label(),
        report.summary.overall_severity.label()
    ));

    if report.findings.is_empty() {
        out.push_str("No findings.\n\n");
    } else {
        out.push_str("## Findings\n\n");
        out.push_str("| | Rule | Finding |\n|---|---|---|\n");
        for f in &report.findings {
            out.push_str(&format!(
                "| {} | `{}` | {} |\n",
                f.symbol.glyph(),
                f.rule_id,
                escape_cell(&f.message)
            ));
        }
        out.push('\n');
    }

    out.push_str("## Summary\n\n");
    out.push_str(&report.summary.narrative);
    out.push('\n');

    out
}

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}
