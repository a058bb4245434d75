//! DOT export for graph rendering.
//!
//! One node per phase, one edge per phase -> dependency. Declared phases are
//! filled by predominant status; dangling phases render dashed.

use std::fmt::Write as _;

use crate::core::report::ScanReport;

fn status_color(status: Option<&str>) -> &'static str {
    match status {
        Some("IMPLEMENTED") => "green",
        Some("PARTIAL") => "yellow",
        Some("NOT_STARTED") => "lightgray",
        Some("FIXED") => "lightgreen",
        Some("DEPRECATED") => "orange",
        _ => "white",
    }
}

pub fn render(report: &ScanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph ACD_Dependencies {{");
    let _ = writeln!(out, "  rankdir=LR;");
    let _ = writeln!(out, "  node [shape=box];");
    let _ = writeln!(out);

    for node in report.phases.values() {
        if node.dangling {
            let _ = writeln!(out, "  \"{}\" [style=dashed];", node.name);
        } else {
            let color = status_color(node.predominant_status());
            let _ = writeln!(out, "  \"{}\" [style=filled, fillcolor={}];", node.name, color);
        }
    }

    let _ = writeln!(out);

    for node in report.phases.values() {
        for dep in &node.declared_dependencies {
            let _ = writeln!(out, "  \"{}\" -> \"{}\";", node.name, dep);
        }
    }

    let _ = writeln!(out, "}}");
    out
}
