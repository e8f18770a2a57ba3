//! Filter Panel Widget
//! Left panel with the logo and the date-range filter, bounded to the
//! dataset's min/max dates.

use chrono::{Duration, NaiveDate};
use egui::{Color32, RichText, TextureHandle};

/// Actions triggered by the side panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPanelAction {
    None,
    RangeChanged,
}

/// Left side panel holding the active date filter.
pub struct FilterPanel {
    min_date: NaiveDate,
    max_date: NaiveDate,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub logo: Option<TextureHandle>,
}

impl FilterPanel {
    /// Defaults to the full available range.
    pub fn new(min_date: NaiveDate, max_date: NaiveDate) -> Self {
        Self {
            min_date,
            max_date,
            start: min_date,
            end: max_date,
            logo: None,
        }
    }

    pub fn set_logo(&mut self, logo: TextureHandle) {
        self.logo = Some(logo);
    }

    /// Draw the panel. Returns `RangeChanged` when either bound moved; the
    /// bounds are kept ordered so the filter never sees a reversed range.
    pub fn show(&mut self, ui: &mut egui::Ui) -> FilterPanelAction {
        let mut action = FilterPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            if let Some(logo) = &self.logo {
                ui.add(egui::Image::new(logo).max_width(220.0));
                ui.add_space(5.0);
            }
            ui.label(
                RichText::new("🚵 Ride Insights")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Bike Sharing Dashboard")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        ui.label(RichText::new("📅 Date Range").size(14.0).strong());
        ui.add_space(5.0);

        let total_days = (self.max_date - self.min_date).num_days();
        let mut start_offset = (self.start - self.min_date).num_days();
        let mut end_offset = (self.end - self.min_date).num_days();
        let min_date = self.min_date;

        let start_response = ui.add(
            egui::Slider::new(&mut start_offset, 0..=total_days)
                .text("Start")
                .custom_formatter(move |v, _| {
                    (min_date + Duration::days(v as i64))
                        .format("%Y-%m-%d")
                        .to_string()
                }),
        );
        let end_response = ui.add(
            egui::Slider::new(&mut end_offset, 0..=total_days)
                .text("End")
                .custom_formatter(move |v, _| {
                    (min_date + Duration::days(v as i64))
                        .format("%Y-%m-%d")
                        .to_string()
                }),
        );

        if start_response.changed() || end_response.changed() {
            // keep the pair ordered by moving the bound that was not edited
            if start_response.changed() && start_offset > end_offset {
                end_offset = start_offset;
            }
            if end_response.changed() && end_offset < start_offset {
                start_offset = end_offset;
            }
            self.start = self.min_date + Duration::days(start_offset);
            self.end = self.min_date + Duration::days(end_offset);
            action = FilterPanelAction::RangeChanged;
        }

        ui.add_space(5.0);
        ui.label(
            RichText::new(format!(
                "{} → {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            ))
            .size(12.0),
        );

        ui.add_space(8.0);
        if ui.button("Reset to full range").clicked() && (self.start, self.end) != (self.min_date, self.max_date)
        {
            self.start = self.min_date;
            self.end = self.max_date;
            action = FilterPanelAction::RangeChanged;
        }

        action
    }
}
