use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

pub fn show_log_panel(ui: &mut egui::Ui, logger: &AppLogger) {
    ui.horizontal(|ui| {
        ui.strong("Log");
        if ui.small_button("Clear").clicked() {
            logger.clear();
        }
    });

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in logger.entries() {
                let color = match entry.level {
                    Level::Error => egui::Color32::from_rgb(220, 70, 70),
                    Level::Warn => egui::Color32::from_rgb(220, 160, 40),
                    _ => ui.visuals().text_color(),
                };
                ui.label(
                    egui::RichText::new(format!(
                        "{} {:<5} {}",
                        entry.timestamp.format("%H:%M:%S"),
                        entry.level,
                        entry.message
                    ))
                    .monospace()
                    .color(color),
                );
            }
        });
}
