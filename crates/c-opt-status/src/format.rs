//! ---
//! opt_section: "04-derived-status"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Fixed-precision display formatting for metric cards."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---

/// Render a metric value with a fixed number of decimals and a unit suffix,
/// e.g. `format_metric(1235.4, 0, "kW")` -> `"1235 kW"`.
pub fn format_metric(value: f64, decimals: usize, unit: &str) -> String {
    if unit.is_empty() {
        format!("{:.*}", decimals, value)
    } else {
        format!("{:.*} {}", decimals, value, unit)
    }
}

/// Render a trend delta as an explicitly signed percentage with one decimal,
/// e.g. `"+1.2%"` or `"-0.8%"`.
pub fn format_trend_pct(delta: f64) -> String {
    format!("{:+.1}%", delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_formatting_rounds_and_appends_unit() {
        assert_eq!(format_metric(1235.4, 0, "kW"), "1235 kW");
        assert_eq!(format_metric(0.8642, 1, "%"), "0.9 %");
        assert_eq!(format_metric(94.25, 2, "kWh/ton"), "94.25 kWh/ton");
    }

    #[test]
    fn unitless_metrics_skip_the_suffix_space() {
        assert_eq!(format_metric(0.87, 2, ""), "0.87");
    }

    #[test]
    fn trend_formatting_always_carries_a_sign() {
        assert_eq!(format_trend_pct(1.23), "+1.2%");
        assert_eq!(format_trend_pct(-0.84), "-0.8%");
        assert_eq!(format_trend_pct(0.0), "+0.0%");
    }
}
