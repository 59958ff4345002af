use eframe::egui;
use photo_report::{IMAGE_EXTENSIONS, MetadataText};
use photo_report_runtime::ReportCommand;
use tokio::sync::mpsc;

/// Header form: organization, subject, date and logo
pub fn show_metadata(
    ui: &mut egui::Ui,
    text: &mut MetadataText,
    logo_texture: Option<&egui::TextureHandle>,
    has_logo: bool,
    command_tx: &mpsc::UnboundedSender<ReportCommand>,
) {
    ui.heading("Report Header");
    ui.add_space(5.0);

    let mut changed = false;
    egui::Grid::new("metadata_grid")
        .num_columns(2)
        .spacing([10.0, 6.0])
        .show(ui, |ui| {
            ui.label("Organization:");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut text.organization)
                        .hint_text("ORGANIZATION OR ENTITY"),
                )
                .changed();
            ui.end_row();

            ui.label("Subject:");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut text.subject).hint_text("Subject description"),
                )
                .changed();
            ui.end_row();

            ui.label("Date:");
            changed |= ui
                .add(
                    egui::TextEdit::singleline(&mut text.date).hint_text("____ / ____ / ________"),
                )
                .changed();
            ui.end_row();
        });

    if changed {
        let _ = command_tx.send(ReportCommand::SetMetadata { text: text.clone() });
    }

    ui.add_space(10.0);
    ui.label("Logo:");
    ui.horizontal(|ui| {
        match logo_texture {
            Some(texture) => {
                ui.image((texture.id(), texture.size_vec2()));
            }
            None if has_logo => {
                ui.label(egui::RichText::new("(unreadable image)").weak());
            }
            None => {
                ui.label(egui::RichText::new("LOGO").weak());
            }
        }

        ui.vertical(|ui| {
            if ui.button("📂 Choose Logo...").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", IMAGE_EXTENSIONS)
                    .pick_file()
                {
                    let _ = command_tx.send(ReportCommand::SetLogo { path });
                }
            }
            if ui
                .add_enabled(has_logo, egui::Button::new("🗑 Remove Logo"))
                .clicked()
            {
                let _ = command_tx.send(ReportCommand::RemoveLogo);
            }
        });
    });
}
