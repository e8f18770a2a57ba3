//! Dashboard View Widget
//! Scrollable main panel: one card per analysis section, with charts,
//! data tables and narrative highlights.

use crate::analysis::DashboardData;
use crate::charts::ChartPlotter;
use egui::{Color32, RichText, ScrollArea};

const CHART_HEIGHT: f32 = 280.0;
const SUCCESS_COLOR: Color32 = Color32::from_rgb(40, 167, 69);
const WARNING_COLOR: Color32 = Color32::from_rgb(255, 193, 7);

/// Renders all dashboard sections for the current filter result.
pub struct DashboardView;

impl DashboardView {
    pub fn show(ui: &mut egui::Ui, data: &DashboardData) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::monthly_section(ui, data);
                Self::user_type_section(ui, data);
                Self::day_type_section(ui, data);
                Self::season_section(ui, data);
                Self::hourly_section(ui, data);
                Self::weather_section(ui, data);
            });
    }

    fn section_card(
        ui: &mut egui::Ui,
        title: &str,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(70)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(18.0).strong());
                ui.add_space(8.0);
                add_contents(ui);
            });
        ui.add_space(15.0);
    }

    fn narrative(ui: &mut egui::Ui, positive: bool, text: String) {
        let color = if positive { SUCCESS_COLOR } else { WARNING_COLOR };
        ui.label(RichText::new(text).size(13.0).color(color));
    }

    fn no_narrative(ui: &mut egui::Ui, text: &str) {
        ui.label(RichText::new(text).size(12.0).color(Color32::GRAY));
    }

    fn monthly_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section_card(ui, "📈 Monthly Bike Usage", |ui| {
            ChartPlotter::draw_year_grouped_bars(ui, "monthly_chart", &data.monthly, CHART_HEIGHT);
            egui::CollapsingHeader::new("Monthly usage data")
                .id_salt("monthly_table")
                .show(ui, |ui| {
                    ChartPlotter::draw_result_table(ui, "monthly_table_grid", &data.monthly);
                });
        });
    }

    fn user_type_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section_card(ui, "🚴 Casual vs Registered Users", |ui| {
            ChartPlotter::draw_bar_chart(ui, "user_type_chart", &data.user_types, 220.0);
            ChartPlotter::draw_result_table(ui, "user_type_table", &data.user_types);
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("Total riders: {:.0}", data.user_types.total()))
                    .size(13.0)
                    .strong(),
            );
        });
    }

    fn day_type_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section_card(ui, "📆 Holidays vs Working Days", |ui| {
            ChartPlotter::draw_bar_chart(ui, "day_type_chart", &data.day_types, 220.0);
            ChartPlotter::draw_result_table(ui, "day_type_table", &data.day_types);
            ui.add_space(6.0);

            match &data.holiday_comparison {
                Some(cmp) if cmp.holidays_win() => Self::narrative(
                    ui,
                    true,
                    format!(
                        "Yes, bike usage is higher on holidays ({:.2}) compared to working days ({:.2}).",
                        cmp.holiday_avg, cmp.workday_avg
                    ),
                ),
                Some(cmp) => Self::narrative(
                    ui,
                    false,
                    format!(
                        "No, bike usage is higher on working days ({:.2}) compared to holidays ({:.2}).",
                        cmp.workday_avg, cmp.holiday_avg
                    ),
                ),
                None => Self::no_narrative(
                    ui,
                    "The selected range has no holiday/working-day pair to compare.",
                ),
            }

            egui::CollapsingHeader::new("Yearly breakdowns")
                .id_salt("day_type_breakdowns")
                .show(ui, |ui| {
                    ChartPlotter::draw_result_table(ui, "holiday_table", &data.holiday);
                    ui.add_space(6.0);
                    ChartPlotter::draw_result_table(ui, "workday_table", &data.workday);
                });
        });
    }

    fn season_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section_card(ui, "🍂 Seasonal Bike Usage", |ui| {
            ChartPlotter::draw_bar_chart(ui, "season_chart", &data.season_means, 220.0);
            ChartPlotter::draw_result_table(ui, "season_means_table", &data.season_means);
            ui.add_space(6.0);

            match &data.top_season {
                Some(top) => Self::narrative(
                    ui,
                    true,
                    format!(
                        "The season with the highest bike usage is {}, with an average of {:.2} users.",
                        top.season, top.average
                    ),
                ),
                None => Self::no_narrative(ui, "No seasonal data in the selected range."),
            }

            egui::CollapsingHeader::new("Season by year")
                .id_salt("season_by_year")
                .show(ui, |ui| {
                    ChartPlotter::draw_result_table(ui, "season_table", &data.season);
                });
        });
    }

    fn hourly_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section_card(ui, "⏰ Hourly Bike Usage", |ui| {
            match &data.top_hour {
                Some(top) => Self::narrative(
                    ui,
                    true,
                    format!(
                        "Highest bike usage is at hour {} with {:.0} total users.",
                        top.hour, top.total
                    ),
                ),
                None => Self::no_narrative(ui, "No hourly data in the selected range."),
            }
            ui.add_space(6.0);
            ChartPlotter::draw_hourly_line(ui, "hourly_chart", &data.hourly, CHART_HEIGHT);
        });
    }

    fn weather_section(ui: &mut egui::Ui, data: &DashboardData) {
        Self::section_card(ui, "🌦 Usage by Weather Condition", |ui| {
            ChartPlotter::draw_bar_chart(ui, "weather_chart", &data.weather_totals, 220.0);
            ChartPlotter::draw_result_table(ui, "weather_totals_table", &data.weather_totals);
            egui::CollapsingHeader::new("Weather by year")
                .id_salt("weather_by_year")
                .show(ui, |ui| {
                    ChartPlotter::draw_result_table(ui, "weather_table", &data.weather);
                });
        });
    }
}
