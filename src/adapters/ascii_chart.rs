//! ASCII bar chart for monthly spending totals.

use std::collections::BTreeMap;

pub const DEFAULT_CHART_WIDTH: usize = 40;
const BAR_CHAR: char = '█';

pub fn render_bar_chart(month_totals: &BTreeMap<String, f64>, max_width: usize) -> String {
    if month_totals.is_empty() {
        return "(no expense data to chart)".to_string();
    }

    let max_val = month_totals
        .values()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);

    month_totals
        .iter()
        .map(|(month, &val)| {
            let length = if max_val > 0.0 {
                ((val / max_val) * max_width as f64) as usize
            } else {
                0
            };
            let bar: String = std::iter::repeat_n(BAR_CHAR, length.max(1)).collect();
            format!("{month} | {bar} {val:.2}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn empty_totals_render_placeholder() {
        assert_eq!(
            render_bar_chart(&BTreeMap::new(), DEFAULT_CHART_WIDTH),
            "(no expense data to chart)"
        );
    }

    #[test]
    fn bars_scale_to_largest_month() {
        let chart = render_bar_chart(&totals(&[("2025-01", 165.2), ("2025-02", 262.0)]), 10);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines.len(), 2);
        // 165.2 / 262 * 10 = 6.3 -> 6
        assert_eq!(lines[0], format!("2025-01 | {} 165.20", "█".repeat(6)));
        assert_eq!(lines[1], format!("2025-02 | {} 262.00", "█".repeat(10)));
    }

    #[test]
    fn tiny_values_still_get_one_block() {
        let chart = render_bar_chart(&totals(&[("2025-01", 0.01), ("2025-02", 1000.0)]), 40);
        assert!(chart.starts_with("2025-01 | █ 0.01"));
    }

    #[test]
    fn zero_maximum_draws_single_blocks() {
        let chart = render_bar_chart(&totals(&[("2025-01", 0.0)]), 40);
        assert_eq!(chart, "2025-01 | █ 0.00");
    }
}
