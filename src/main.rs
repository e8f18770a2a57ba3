//! Ride Insights - Bike Sharing Data Analysis & Interactive Dashboard
//!
//! Loads the daily and hourly bike-sharing datasets once at startup and
//! serves an interactive date-filtered dashboard.

mod analysis;
mod charts;
mod config;
mod data;
mod gui;

use anyhow::Context;
use config::AppConfig;
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::load(Path::new(config::CONFIG_FILE));
    let (day, hour) = data::load(&config.day_csv, &config.hour_csv)
        .context("failed to load bike-sharing datasets")?;
    let bounds = data::date_bounds(&day)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Bike Sharing Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Bike Sharing Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, &config, day, hour, bounds)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to start dashboard UI: {err}"))
}
