#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod config;
mod io;
mod model;
mod tracker;
mod ui;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::AppSettings::load_or_init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([850.0, 600.0])
            .with_min_inner_size([850.0, 600.0])
            .with_title("Progress & ETC Tracker"),
        ..Default::default()
    };

    eframe::run_native(
        "Progress & ETC Tracker",
        options,
        Box::new(|cc| Ok(Box::new(app::ProgressApp::new(cc, settings)))),
    )
}
