#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod handlers;
mod logger;
mod views;
mod worker;

fn main() -> anyhow::Result<()> {
    let logger = logger::AppLogger::new(500);
    logger.clone().init()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_title("Photographic Report"),
        ..Default::default()
    };

    eframe::run_native(
        "Photographic Report",
        options,
        Box::new(move |cc| Ok(Box::new(app::PhotoReportApp::new(cc, handle, logger)))),
    )
    .map_err(|e| anyhow::anyhow!("GUI failed: {e}"))?;

    Ok(())
}
