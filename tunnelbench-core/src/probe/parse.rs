//! Pure parsers for probe and resolver output.
//!
//! None of these fail: text that matches no known shape yields `None`
//! (or an incomplete [`PathTrace`]).

use super::PathTrace;
use regex::Regex;
use std::sync::LazyLock;

// Patterns are literals; a failed compile is a programming error.
#[allow(clippy::expect_used)]
static AVERAGE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)average\s*=\s*(\d+(?:\.\d+)?)\s*ms").expect("valid average regex")
});

#[allow(clippy::expect_used)]
static SUMMARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)min/avg/max(?:/(?:mdev|stddev))?\s*=\s*[\d.]+/(\d+(?:\.\d+)?)/[\d.]+")
        .expect("valid summary regex")
});

#[allow(clippy::expect_used)]
static TIME_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)time\s*[=<]\s*(\d+(?:\.\d+)?)\s*ms").expect("valid time regex")
});

#[allow(clippy::expect_used)]
static HOP_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\d+\s").expect("valid hop regex"));

#[allow(clippy::expect_used)]
static MS_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*ms\b").expect("valid ms regex"));

#[allow(clippy::expect_used)]
static NAME_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^\s*name:\s*(\S+)").expect("valid name regex"));

#[allow(clippy::expect_used)]
static POINTER_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)domain name pointer\s+(\S+)").expect("valid pointer regex")
});

fn first_capture(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Average round-trip time in milliseconds.
///
/// Tried in order: an aggregate `Average = 6ms` line (Windows), a
/// `min/avg/max/mdev = 1.0/2.0/3.0/0.5 ms` summary (Linux, macOS, BusyBox),
/// then the first inline `time=6.5 ms` reply field.
pub fn parse_average_latency(output: &str) -> Option<f64> {
    first_capture(&AVERAGE_LINE, output)
        .or_else(|| first_capture(&SUMMARY_LINE, output))
        .or_else(|| first_capture(&TIME_FIELD, output))
}

/// Hop count and RTT of the last hop from traceroute / tracert output.
///
/// A hop line starts with its index. The RTT is the final `N ms` value on the
/// last hop line; a last hop of `* * *` leaves it `None`.
pub fn parse_trace(output: &str) -> PathTrace {
    let mut hop_count = 0u32;
    let mut last_hop_line = None;

    for line in output.lines() {
        if HOP_LINE.is_match(line) {
            hop_count += 1;
            last_hop_line = Some(line);
        }
    }

    let last_hop_rtt_ms = last_hop_line.and_then(|line| {
        MS_VALUE
            .captures_iter(line)
            .last()
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    });

    PathTrace {
        hop_count,
        last_hop_rtt_ms,
    }
}

/// Lines of `output` that look like hops, for progress logging.
pub fn hop_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| HOP_LINE.is_match(line))
}

/// `Name:` field of nslookup output.
pub fn parse_name_field(output: &str) -> Option<String> {
    NAME_FIELD
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .filter(|name| !name.is_empty())
}

/// PTR target of `host` output.
pub fn parse_pointer_record(output: &str) -> Option<String> {
    POINTER_RECORD
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .filter(|name| !name.is_empty())
}
