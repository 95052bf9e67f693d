//! Result table rendering

use std::fmt::Write;
use tunnelbench::{BenchReport, ProbeResult};

const NOT_AVAILABLE: &str = "N/A";
const INCOMPLETE: &str = "incomplete";
const BEST_MARKER: &str = "<- best";

fn latency_cell(result: &ProbeResult) -> String {
    result
        .avg_latency_ms
        .map_or_else(|| NOT_AVAILABLE.to_string(), |ms| format!("{ms:.2} ms"))
}

fn hops_cell(result: &ProbeResult) -> String {
    result
        .hop_count
        .map_or_else(|| NOT_AVAILABLE.to_string(), |hops| hops.to_string())
}

// A trace that ran but never reached the target reads "incomplete"; a route
// that was never traced reads N/A.
fn last_hop_cell(result: &ProbeResult) -> String {
    match (result.last_hop_rtt_ms, result.hop_count) {
        (Some(ms), _) => format!("{ms:.2} ms"),
        (None, Some(_)) => INCOMPLETE.to_string(),
        (None, None) => NOT_AVAILABLE.to_string(),
    }
}

/// Render `report` as a fixed-width table followed by the verdict line.
pub fn render(report: &BenchReport) -> String {
    let width = report
        .results
        .iter()
        .map(|r| r.route.len())
        .chain(std::iter::once("Route".len()))
        .max()
        .unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out, "\nResults for {}", report.target);
    let _ = writeln!(
        out,
        "{:<width$}  {:>12}  {:>5}  {:>12}",
        "Route", "Avg latency", "Hops", "Last hop"
    );
    let _ = writeln!(out, "{}", "-".repeat(width + 35));

    for (i, result) in report.results.iter().enumerate() {
        let marker = if report.is_best(i) {
            format!("  {BEST_MARKER}")
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "{:<width$}  {:>12}  {:>5}  {:>12}{marker}",
            result.route,
            latency_cell(result),
            hops_cell(result),
            last_hop_cell(result),
        );
    }

    out.push('\n');
    match report.best() {
        Some(best) => {
            let _ = writeln!(
                out,
                "Best route: {} ({})",
                best.route,
                latency_cell(best)
            );
        }
        None => {
            let _ = writeln!(out, "No reachable route to {}", report.target);
        }
    }
    out
}
