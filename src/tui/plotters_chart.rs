//! Plotters-powered dashboard charts for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart`/`BarChart` widgets?
//! - nicer axis + tick rendering
//! - one drawing model for both the bar and line charts
//! - easy to extend later (legend, annotations, exportable PNG/SVG backends)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::domain::ChartEntry;

/// Render-only bar chart of the top districts by wage.
///
/// The widget is intentionally data-driven: entries are ranked and bounds are
/// computed outside the render call, which keeps `render()` focused on
/// drawing and the data prep separately testable.
pub struct WageBarChart<'a> {
    pub entries: &'a [ChartEntry],
    /// Upper y bound (₹); computed from the ranked entries.
    pub y_max: f64,
}

impl Widget for WageBarChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if self.entries.is_empty() {
            buf.set_string(
                area.x,
                area.y,
                "No data available for selected state.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.entries.len();
        let y_max = if self.y_max.is_finite() && self.y_max > 0.0 {
            self.y_max * 1.05
        } else {
            1.0
        };
        let entries = self.entries;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(0.0..n as f64, 0.0..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n.min(6))
                .y_labels(5)
                .x_label_formatter(&|v| district_tick(entries, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // One rectangle per district, highest wage first.
            let bar_color = RGBColor(59, 130, 246);
            chart.draw_series(entries.iter().enumerate().map(|(i, entry)| {
                let x0 = i as f64 + 0.15;
                let x1 = i as f64 + 0.85;
                Rectangle::new([(x0, 0.0), (x1, entry.value.max(0.0))], bar_color.filled())
            }))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Render-only line chart of ongoing vs completed works per 1000 households.
pub struct RatesLineChart<'a> {
    /// `(record index, ongoing per 1000 HH)` series.
    pub ongoing: &'a [(f64, f64)],
    /// `(record index, completed per 1000 HH)` series.
    pub completed: &'a [(f64, f64)],
    /// District labels indexed by record position (x tick labels).
    pub labels: &'a [String],
    pub y_max: f64,
}

impl Widget for RatesLineChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let n = self.labels.len();
        if n == 0 || (self.ongoing.is_empty() && self.completed.is_empty()) {
            buf.set_string(
                area.x,
                area.y,
                "No chart data available.",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x_max = (n.saturating_sub(1)).max(1) as f64;
        let y_max = if self.y_max.is_finite() && self.y_max > 0.0 {
            self.y_max * 1.05
        } else {
            1.0
        };
        let ongoing = self.ongoing;
        let completed = self.completed;
        let labels = self.labels;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 7)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n.min(6))
                .y_labels(5)
                .x_label_formatter(&|v| label_tick(labels, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            // Blue: ongoing, green: completed (the footer names the colors).
            let ongoing_color = RGBColor(0, 123, 255);
            let completed_color = RGBColor(40, 167, 69);
            chart.draw_series(LineSeries::new(ongoing.iter().copied(), &ongoing_color))?;
            chart.draw_series(LineSeries::new(completed.iter().copied(), &completed_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

fn district_tick(entries: &[ChartEntry], v: f64) -> String {
    let idx = v.floor() as usize;
    entries
        .get(idx)
        .map(|entry| truncate_label(&entry.label))
        .unwrap_or_default()
}

fn label_tick(labels: &[String], v: f64) -> String {
    let idx = v.round() as usize;
    labels
        .get(idx)
        .map(|label| truncate_label(label))
        .unwrap_or_default()
}

fn truncate_label(label: &str) -> String {
    label.chars().take(8).collect()
}
