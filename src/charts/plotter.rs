//! Chart Plotter Module
//! Renders aggregation results as interactive egui_plot charts and egui
//! grid tables.

use crate::analysis::{AggregationResult, Metric};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
use std::collections::HashMap;

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(52, 152, 219),  // Blue
    Color32::from_rgb(231, 76, 60),   // Red
    Color32::from_rgb(46, 204, 113),  // Green
    Color32::from_rgb(155, 89, 182),  // Purple
    Color32::from_rgb(243, 156, 18),  // Orange
    Color32::from_rgb(26, 188, 156),  // Teal
    Color32::from_rgb(233, 30, 99),   // Pink
    Color32::from_rgb(0, 188, 212),   // Cyan
    Color32::from_rgb(255, 87, 34),   // Deep Orange
    Color32::from_rgb(121, 85, 72),   // Brown
];

/// Creates the dashboard's charts and tables from aggregation results.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    fn format_value(metric: Metric, value: f64) -> String {
        match metric {
            Metric::Sum => format!("{:.0}", value),
            Metric::Mean => format!("{:.2}", value),
        }
    }

    fn draw_empty(ui: &mut egui::Ui, height: f32) {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No data in the selected range").size(14.0));
            });
        });
    }

    /// Bar chart with one series per year, grouped around each category on
    /// the x-axis. Expects rows keyed (category, year-code) with labels
    /// (category label, year label).
    pub fn draw_year_grouped_bars(
        ui: &mut egui::Ui,
        id: &str,
        result: &AggregationResult,
        height: f32,
    ) {
        if result.rows.is_empty() {
            Self::draw_empty(ui, height);
            return;
        }

        let mut year_codes: Vec<i64> = result
            .rows
            .iter()
            .filter_map(|r| r.keys.get(1).copied())
            .collect();
        year_codes.sort_unstable();
        year_codes.dedup();

        let mut category_labels: HashMap<i64, String> = HashMap::new();
        for row in &result.rows {
            if let (Some(&cat), Some(label)) = (row.keys.first(), row.labels.first()) {
                category_labels.entry(cat).or_insert_with(|| label.clone());
            }
        }

        let series_count = year_codes.len().max(1);
        let bar_width = 0.8 / series_count as f64;

        let mut charts: Vec<BarChart> = Vec::new();
        for (series_idx, year) in year_codes.iter().enumerate() {
            let offset = (series_idx as f64 - (series_count as f64 - 1.0) / 2.0) * bar_width;
            let color = Self::series_color(series_idx);
            let bars: Vec<Bar> = result
                .rows
                .iter()
                .filter(|r| r.keys.get(1) == Some(year))
                .filter_map(|r| {
                    let cat = *r.keys.first()?;
                    Some(Bar::new(cat as f64 + offset, r.value).width(bar_width * 0.9))
                })
                .collect();
            let name = result
                .rows
                .iter()
                .find(|r| r.keys.get(1) == Some(year))
                .and_then(|r| r.labels.get(1).cloned())
                .unwrap_or_else(|| year.to_string());
            charts.push(BarChart::new(bars).color(color).name(name));
        }

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .legend(Legend::default())
            .x_axis_formatter(move |mark, _range| {
                let key = mark.value.round() as i64;
                if (mark.value - key as f64).abs() > 0.3 {
                    return String::new();
                }
                category_labels.get(&key).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                for chart in charts {
                    plot_ui.bar_chart(chart);
                }
            });
    }

    /// Simple categorical bar chart: one bar per row, x ordered as the rows
    /// are, labeled from the first label column.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, result: &AggregationResult, height: f32) {
        if result.rows.is_empty() {
            Self::draw_empty(ui, height);
            return;
        }

        let labels: Vec<String> = result
            .rows
            .iter()
            .map(|r| r.labels.first().cloned().unwrap_or_default())
            .collect();

        let bars: Vec<Bar> = result
            .rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                Bar::new(i as f64, r.value)
                    .width(0.6)
                    .fill(Self::series_color(i))
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round() as usize;
                if (mark.value - idx as f64).abs() > 0.3 {
                    return String::new();
                }
                labels.get(idx).cloned().unwrap_or_default()
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Hourly usage line over the gap-filled 24-hour profile, with point
    /// markers on each hour.
    pub fn draw_hourly_line(ui: &mut egui::Ui, id: &str, result: &AggregationResult, height: f32) {
        if result.rows.is_empty() {
            Self::draw_empty(ui, height);
            return;
        }

        let points: Vec<[f64; 2]> = result
            .rows
            .iter()
            .filter_map(|r| Some([*r.keys.first()? as f64, r.value]))
            .collect();

        let color = Color32::from_rgb(46, 204, 113);
        Plot::new(id.to_string())
            .height(height)
            .allow_scroll(false)
            .x_axis_label("Hour of Day")
            .y_axis_label("Total Usage")
            .include_x(0.0)
            .include_x(23.0)
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(color),
                );
            });
    }

    /// Literal dump of an aggregation result as a striped grid, label
    /// columns first, metric column last.
    pub fn draw_result_table(ui: &mut egui::Ui, id: &str, result: &AggregationResult) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(id))
                    .striped(true)
                    .min_col_width(80.0)
                    .spacing([12.0, 4.0])
                    .show(ui, |ui| {
                        for name in &result.label_names {
                            ui.label(RichText::new(*name).strong().size(12.0));
                        }
                        ui.label(RichText::new(result.value_name).strong().size(12.0));
                        ui.end_row();

                        for row in &result.rows {
                            for label in &row.labels {
                                ui.label(RichText::new(label).size(12.0));
                            }
                            ui.label(
                                RichText::new(Self::format_value(result.metric, row.value))
                                    .size(12.0),
                            );
                            ui.end_row();
                        }

                        if result.rows.is_empty() {
                            ui.label(RichText::new("(no rows)").size(12.0).color(Color32::GRAY));
                            ui.end_row();
                        }
                    });
            });
    }
}
