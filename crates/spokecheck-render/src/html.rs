use crate::RenderableReport;

const STYLE: &str = "table { border-collapse: collapse; margin: 20px; }
th, td { border: 1px solid #dddddd; text-align: left; padding: 8px; }
th { background-color: #f2f2f2; }
tr:nth-child(even) { background-color: #f2f2f2; }
tr:nth-child(odd) { background-color: #e6e6e6; }";

/// Standalone HTML page: one row per finding (symbol + message) and a summary row.
pub fn render_html(report: &RenderableReport) -> String {
    let mut rows = String::new();
    for f in &report.findings {
        rows.push_str(&format!(
            "      <tr><td title=\"{}\">{}</td><td>{}</td></tr>\n",
            escape(&f.rule_id),
            f.symbol.glyph(),
            escape(&f.message)
        ));
    }

    format!(
        "<!DOCTYPE html>
<html>
<head>
  <meta charset=\"utf-8\">
  <title>Spoke check report</title>
  <style>
{STYLE}
  </style>
</head>
<body>
  <table>
    <tr><th colspan=\"2\" align=\"center\">Spoke check report ({verdict})</th></tr>
    <tr><td>Spoke</td><td>{spoke}</td></tr>
    <tr><td>Hub</td><td>{hub}</td></tr>
{rows}    <tr><td>Summary</td><td width=\"600\">{narrative}</td></tr>
  </table>
</body>
</html>
",
        verdict = report.verdict.label(),
        spoke = escape(&report.target.spoke_network_id),
        hub = escape(&report.target.hub_network_id),
        narrative = escape(&report.summary.narrative),
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
