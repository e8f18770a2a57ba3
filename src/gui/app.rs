//! Dashboard Main Application
//! Owns the base tables and the active filter; recomputes every aggregate
//! in one blocking pass when the date range changes.

use crate::analysis::{build_dashboard, DashboardData};
use crate::config::AppConfig;
use crate::data::filter_by_date;
use crate::gui::{DashboardView, FilterPanel, FilterPanelAction};
use chrono::NaiveDate;
use egui::{Color32, RichText, TextureHandle};
use log::{info, warn};
use polars::prelude::*;
use std::path::Path;

/// Main application window.
pub struct DashboardApp {
    base_day: DataFrame,
    base_hour: DataFrame,
    filter_panel: FilterPanel,
    dashboard: Option<DashboardData>,
    status: Option<String>,
}

impl DashboardApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        base_day: DataFrame,
        base_hour: DataFrame,
        bounds: (NaiveDate, NaiveDate),
    ) -> Self {
        let mut filter_panel = FilterPanel::new(bounds.0, bounds.1);
        if let Some(logo_path) = &config.logo {
            if let Some(texture) = Self::load_logo(&cc.egui_ctx, logo_path) {
                filter_panel.set_logo(texture);
            }
        }

        let mut app = Self {
            base_day,
            base_hour,
            filter_panel,
            dashboard: None,
            status: None,
        };
        app.recompute();
        app
    }

    /// The logo is decorative; a missing or unreadable file only logs.
    fn load_logo(ctx: &egui::Context, path: &Path) -> Option<TextureHandle> {
        match image::open(path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
                Some(ctx.load_texture("logo", color_image, egui::TextureOptions::LINEAR))
            }
            Err(err) => {
                warn!("could not load logo {}: {}", path.display(), err);
                None
            }
        }
    }

    /// Filter both base tables to the active range and rebuild every
    /// aggregate. Derived tables are freshly allocated; the base tables are
    /// never touched.
    fn recompute(&mut self) {
        let start = self.filter_panel.start;
        let end = self.filter_panel.end;
        info!("applying date filter {} → {}", start, end);

        let filtered = filter_by_date(&self.base_day, start, end).and_then(|day| {
            filter_by_date(&self.base_hour, start, end).map(|hour| (day, hour))
        });

        match filtered {
            Ok((day, hour)) => match build_dashboard(&day, &hour) {
                Ok(data) => {
                    self.dashboard = Some(data);
                    self.status = None;
                }
                Err(err) => {
                    self.dashboard = None;
                    self.status = Some(err.to_string());
                }
            },
            Err(err) => {
                self.dashboard = None;
                self.status = Some(err.to_string());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("filter_panel")
            .min_width(280.0)
            .max_width(330.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.filter_panel.show(ui) == FilterPanelAction::RangeChanged {
                        self.recompute();
                    }
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(
                RichText::new("Bike Sharing Dashboard 🚵")
                    .size(24.0)
                    .strong(),
            );
            ui.add_space(10.0);

            if let Some(status) = &self.status {
                ui.label(RichText::new(status).color(Color32::from_rgb(220, 53, 69)));
            } else if let Some(data) = &self.dashboard {
                DashboardView::show(ui, data);
            }
        });
    }
}
