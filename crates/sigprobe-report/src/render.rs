//! Console table for a fuzz report.
//!
//! Fixed-width, box-drawing layout: a TESTED header, a SUCCESSES table and
//! (behind a flag) a FAILURES table. Each row shows one type key and the
//! FIRST exemplar argument list recorded for it — the report may hold many
//! combinations per key, but one per shape is what a reader scans for.

use std::fmt::Write;

use sigprobe_engine::{FuzzReport, OutcomeMap};
use sigprobe_pool::Value;

const WIDTH: usize = 80;
const INDENT: usize = 40;

/// Rendering choices for one report.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Also render the failing combinations.
    pub show_failures: bool,
}

/// Render a report to a string; printing is the caller's business.
pub fn render(report: &FuzzReport, options: &RenderOptions) -> String {
    let mut out = String::new();

    thick_bar(&mut out);
    let _ = writeln!(
        out,
        "{}TESTED\n{}",
        " ".repeat(INDENT - 2),
        report.function_to_type
    );

    let _ = writeln!(out, "\n{}SUCCESSES", " ".repeat(INDENT - 3));
    section(&mut out, &report.results.successes);

    if options.show_failures {
        let _ = writeln!(out, "\n\n{}FAILURES", " ".repeat(INDENT - 3));
        section(&mut out, &report.results.failures);
    }
    thick_bar(&mut out);

    out
}

fn thick_bar(out: &mut String) {
    let _ = writeln!(out, "{}", "━".repeat(WIDTH));
}

fn section(out: &mut String, map: &OutcomeMap) {
    let half = INDENT / 2 - 2;
    let _ = writeln!(
        out,
        "{}┬{}",
        "─".repeat(INDENT),
        "─".repeat(WIDTH - INDENT - 1)
    );
    let _ = writeln!(
        out,
        "{pad}type{pad}│   instance",
        pad = " ".repeat(half)
    );
    let _ = writeln!(
        out,
        "{}┼{}",
        "─".repeat(INDENT),
        "─".repeat(WIDTH - INDENT - 1)
    );

    for (key, bucket) in map.iter() {
        // First exemplar per type shape only.
        let exemplar = bucket.first().map(|args| format_args(args)).unwrap_or_default();
        let _ = writeln!(out, "{key:>width$} │ {exemplar}", width = INDENT - 1);
    }
}

fn format_args(args: &[Value]) -> String {
    let mut rendered = String::from("[");
    for (i, value) in args.iter().enumerate() {
        if i > 0 {
            rendered.push_str(", ");
        }
        let _ = write!(rendered, "{value}");
    }
    rendered.push(']');
    rendered
}
