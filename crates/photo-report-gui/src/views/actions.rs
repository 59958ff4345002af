use eframe::egui;
use photo_report::{IMAGE_EXTENSIONS, PaperSize, ReportOptions, ReportState};
use photo_report_runtime::ReportCommand;
use tokio::sync::mpsc;

pub fn show_actions(
    ui: &mut egui::Ui,
    state: &ReportState,
    options: &mut ReportOptions,
    processing: bool,
    command_tx: &mpsc::UnboundedSender<ReportCommand>,
    status: &mut String,
) {
    ui.heading("Photos");
    ui.horizontal(|ui| {
        if ui.button("➕ Add Photos...").clicked() {
            if let Some(paths) = rfd::FileDialog::new()
                .add_filter("Images", IMAGE_EXTENSIONS)
                .pick_files()
            {
                let _ = command_tx.send(ReportCommand::AddPhotos { paths });
            }
        }

        if processing {
            ui.spinner();
            ui.label("Processing images...");
        }
    });

    if ui
        .add_enabled(!state.is_empty(), egui::Button::new("🗑 Clear All"))
        .clicked()
    {
        let _ = command_tx.send(ReportCommand::Reset);
    }

    ui.add_space(10.0);
    ui.separator();
    show_layout_options(ui, options);

    ui.horizontal(|ui| {
        if ui.button("💾 Save Options").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .set_file_name("report_options.json")
                .save_file()
            {
                let _ = command_tx.send(ReportCommand::SaveOptions {
                    options: options.clone(),
                    path,
                });
            }
        }

        if ui.button("📂 Load Options").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                let _ = command_tx.send(ReportCommand::LoadOptions { path });
            }
        }
    });

    ui.add_space(10.0);
    ui.separator();

    // Disabled while empty; the worker still rejects an empty export
    let can_generate = !state.is_empty() && !processing;
    if ui
        .add_enabled(can_generate, egui::Button::new("🖨 Generate Report..."))
        .clicked()
    {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF", &["pdf"])
            .set_file_name("photographic_report.pdf")
            .save_file()
        {
            let _ = command_tx.send(ReportCommand::GenerateReport {
                options: options.clone(),
                output_path: path,
            });
            *status = "Generating report...".to_string();
        }
    }
}

/// Paper sizes the default frame height fits on
const PAPER_CHOICES: [PaperSize; 3] = [PaperSize::A4, PaperSize::Letter, PaperSize::Legal];

fn show_layout_options(ui: &mut egui::Ui, options: &mut ReportOptions) {
    ui.label("Paper:");
    egui::ComboBox::from_id_salt("paper_size")
        .selected_text(options.paper_size.name())
        .show_ui(ui, |ui| {
            for paper in PAPER_CHOICES {
                ui.selectable_value(&mut options.paper_size, paper, paper.name());
            }
        });

    ui.checkbox(
        &mut options.show_logo_placeholder,
        "Show logo placeholder when no logo is set",
    );

    if let Err(e) = options.validate() {
        ui.colored_label(egui::Color32::from_rgb(200, 60, 60), e.to_string());
    }
}
