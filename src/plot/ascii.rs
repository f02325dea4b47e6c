//! ASCII bar chart for plain terminal output.
//!
//! This is intentionally "dumb" (fixed-width rows), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)

use crate::domain::ChartEntry;

const LABEL_WIDTH: usize = 18;

/// Render a horizontal bar chart of chart entries.
///
/// Bars scale to the maximum value; `width` is the maximum bar length in
/// columns. Entries are rendered in the order given (callers rank them).
pub fn render_bar_chart(entries: &[ChartEntry], width: usize) -> String {
    if entries.is_empty() {
        return "(no chart data)\n".to_string();
    }

    let width = width.max(8);
    let max_value = entries
        .iter()
        .map(|e| e.value)
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    for entry in entries {
        let bar_len = if max_value > 0.0 && entry.value.is_finite() && entry.value > 0.0 {
            // At least one column for any positive value.
            (((entry.value / max_value) * width as f64).round() as usize).max(1)
        } else {
            0
        };
        out.push_str(&format!(
            "{:<label$} {:<bar$} {}\n",
            clip_label(&entry.label),
            "#".repeat(bar_len),
            crate::report::fmt_count(entry.value),
            label = LABEL_WIDTH,
            bar = width,
        ));
    }
    out
}

fn clip_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        label.to_string()
    } else {
        let mut clipped: String = label.chars().take(LABEL_WIDTH - 1).collect();
        clipped.push('…');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, value: f64) -> ChartEntry {
        ChartEntry {
            label: label.to_string(),
            value,
        }
    }

    #[test]
    fn empty_series_renders_placeholder() {
        assert_eq!(render_bar_chart(&[], 40), "(no chart data)\n");
    }

    #[test]
    fn max_value_fills_the_width_and_bars_scale() {
        let entries = vec![entry("A", 300.0), entry("B", 150.0)];
        let text = render_bar_chart(&entries, 40);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('#').count(), 40);
        assert_eq!(lines[1].matches('#').count(), 20);
    }

    #[test]
    fn zero_values_render_no_bar() {
        let entries = vec![entry("A", 0.0)];
        let text = render_bar_chart(&entries, 40);
        assert_eq!(text.matches('#').count(), 0);
    }

    #[test]
    fn tiny_positive_values_still_show_one_column() {
        let entries = vec![entry("A", 1000.0), entry("B", 1.0)];
        let text = render_bar_chart(&entries, 40);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].matches('#').count(), 1);
    }
}
