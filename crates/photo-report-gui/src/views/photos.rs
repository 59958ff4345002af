use eframe::egui;
use photo_report::{Orientation, PhotoId, ReportState};
use photo_report_runtime::ReportCommand;
use std::collections::HashMap;
use tokio::sync::mpsc;

const CELL_SIZE: f32 = 160.0;

/// Photos grouped by the page they will land on
pub fn show_photos(
    ui: &mut egui::Ui,
    state: &ReportState,
    thumbnails: &HashMap<PhotoId, egui::TextureHandle>,
    command_tx: &mpsc::UnboundedSender<ReportCommand>,
) {
    let stats = state.statistics();
    ui.heading(format!("Photos ({})", stats.photos));
    ui.label(format!(
        "{} landscape on {} pages, {} portrait on {} pages",
        stats.landscape_photos, stats.landscape_pages, stats.portrait_photos, stats.portrait_pages
    ));
    if stats.unprobed_photos > 0 {
        ui.colored_label(
            egui::Color32::from_rgb(200, 120, 0),
            format!(
                "{} photo(s) could not be read and will print as empty frames",
                stats.unprobed_photos
            ),
        );
    }
    ui.separator();

    if state.is_empty() {
        ui.vertical_centered(|ui| {
            ui.add_space(50.0);
            ui.label("Add photos or drop image files here");
        });
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            for page in state.pages() {
                let icon = match page.orientation {
                    Orientation::Landscape => "▭",
                    Orientation::Portrait => "▯",
                };
                ui.label(
                    egui::RichText::new(format!(
                        "{} Page {} of {} · {}",
                        icon,
                        page.number,
                        page.total,
                        page.orientation.label()
                    ))
                    .strong(),
                );

                ui.horizontal_wrapped(|ui| {
                    for photo in &page.photos {
                        ui.group(|ui| {
                            ui.set_width(CELL_SIZE);
                            ui.vertical_centered(|ui| {
                                match thumbnails.get(&photo.id()) {
                                    Some(texture) => {
                                        ui.image((texture.id(), texture.size_vec2()));
                                    }
                                    None if photo.is_unprobed() => {
                                        ui.label(egui::RichText::new("unreadable").weak());
                                    }
                                    None => {
                                        ui.spinner();
                                    }
                                }
                                ui.label(egui::RichText::new(photo.name().to_uppercase()).small());
                                if photo.is_unprobed() {
                                    ui.label(egui::RichText::new("0 × 0").small().weak());
                                } else {
                                    ui.label(
                                        egui::RichText::new(format!(
                                            "{} × {}",
                                            photo.width(),
                                            photo.height()
                                        ))
                                        .small()
                                        .weak(),
                                    );
                                }
                                if ui.small_button("🗑 Remove").clicked() {
                                    let _ = command_tx
                                        .send(ReportCommand::RemovePhoto { id: photo.id() });
                                }
                            });
                        });
                    }
                });
                ui.add_space(10.0);
            }
        });
}
