use crate::MetricBundle;
use serde::{Deserialize, Serialize};

/// Bytes in one megabyte, as reported for `data_received`
pub const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

const HTTP_REQS: &str = "http_reqs";
const HTTP_REQ_FAILED: &str = "http_req_failed";
const HTTP_REQ_DURATION: &str = "http_req_duration";
const DATA_RECEIVED: &str = "data_received";

/// Fixed shape summary of one scenario's metrics
///
/// All values other than `requests` are rounded to two decimal places. Every field is zero when
/// the metric it comes from is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScenarioSummary {
    /// Total HTTP requests made
    pub requests: u64,
    /// Failed requests, as a percentage of all requests
    pub error_rate_percent: f64,
    pub avg_duration_ms: f64,
    pub p95_duration_ms: f64,
    pub max_duration_ms: f64,
    pub med_duration_ms: f64,
    /// Requests per second over the scenario
    pub rps: f64,
    pub data_received_mb: f64,
}

/// Normalize a scenario's metrics into a [ScenarioSummary]
///
/// Never fails. A missing bundle, a missing metric, or a value that is not a number all read as
/// zero, and negative values are clamped to zero.
pub fn extract_scenario_summary(bundle: Option<MetricBundle<'_>>) -> ScenarioSummary {
    let Some(bundle) = bundle else {
        return ScenarioSummary::default();
    };

    let value = |metric: &str, stat: &str| {
        bundle
            .stat(metric, stat)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
            .max(0.0)
    };

    ScenarioSummary {
        requests: value(HTTP_REQS, "count") as u64,
        error_rate_percent: round_to(value(HTTP_REQ_FAILED, "rate") * 100.0, 2),
        avg_duration_ms: round_to(value(HTTP_REQ_DURATION, "avg"), 2),
        p95_duration_ms: round_to(value(HTTP_REQ_DURATION, "p(95)"), 2),
        max_duration_ms: round_to(value(HTTP_REQ_DURATION, "max"), 2),
        med_duration_ms: round_to(value(HTTP_REQ_DURATION, "med"), 2),
        rps: round_to(value(HTTP_REQS, "rate"), 2),
        data_received_mb: round_to(value(DATA_RECEIVED, "count") / BYTES_PER_MB, 2),
    }
}

/// Digits needed to print any finite `f64` exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Round half away from zero to the given number of decimal places
///
/// Rounds the exact decimal value of `value`, not a scaled copy of it, so `2.675` (stored as
/// `2.67499999...`) rounds to `2.67`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let decimals = decimals.min(fraction.len());

    let mut digits = format!("{int_part}{}", &fraction[..decimals]).into_bytes();
    if fraction.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        increment_digits(&mut digits);
    }

    let (int_digits, fraction_digits) = digits.split_at(digits.len() - decimals);
    let rounded = format!(
        "{}.{}",
        String::from_utf8_lossy(int_digits),
        String::from_utf8_lossy(fraction_digits)
    )
    .parse::<f64>()
    .unwrap_or(value.abs());

    rounded.copysign(value)
}

/// Add one to a string of ASCII decimal digits, growing it on overflow
fn increment_digits(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
