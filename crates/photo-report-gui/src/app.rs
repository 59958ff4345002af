use eframe::egui;
use photo_report::{MetadataText, PhotoId, ReportOptions, ReportState, is_image_path};
use photo_report_runtime::{ReportCommand, ReportUpdate};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{show_actions, show_log_panel, show_metadata, show_photos};

pub struct PhotoReportApp {
    /// Latest snapshot from the worker
    state: Arc<ReportState>,
    /// Header form contents, owned by the UI while the user types
    metadata: MetadataText,
    options: ReportOptions,
    thumbnails: HashMap<PhotoId, egui::TextureHandle>,
    logo_texture: Option<egui::TextureHandle>,
    /// Ingestion batches sent but not finished yet
    pending_batches: usize,
    status: String,
    /// Message of the empty-report alert, while it is open
    empty_alert: Option<String>,
    show_log: bool,
    logger: AppLogger,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<ReportCommand>,
    update_rx: mpsc::UnboundedReceiver<ReportUpdate>,

    _tokio_handle: tokio::runtime::Handle,
}

impl PhotoReportApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            state: Arc::new(ReportState::default()),
            metadata: MetadataText::default(),
            options: ReportOptions::default(),
            thumbnails: HashMap::new(),
            logo_texture: None,
            pending_batches: 0,
            status: String::new(),
            empty_alert: None,
            show_log: false,
            logger,
            command_tx,
            update_rx,
            _tokio_handle: tokio_handle,
        }
    }

    fn send(&mut self, command: ReportCommand) {
        if let ReportCommand::AddPhotos { .. } = command {
            self.pending_batches += 1;
        }
        if self.command_tx.send(command).is_err() {
            self.status = "Error: background worker stopped".to_string();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let paths: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .filter(|path| is_image_path(path))
                .collect()
        });

        if !paths.is_empty() {
            self.send(ReportCommand::AddPhotos { paths });
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                ReportUpdate::StateChanged { state } => {
                    // Drop textures of removed photos
                    self.thumbnails
                        .retain(|id, _| state.photos().iter().any(|p| p.id() == *id));
                    if state.metadata().logo.is_none() {
                        self.logo_texture = None;
                    }
                    self.state = state;
                }
                ReportUpdate::IngestStarted { count } => {
                    self.status = format!("Processing {} images...", count);
                }
                ReportUpdate::IngestFinished { added, unreadable } => {
                    self.pending_batches = self.pending_batches.saturating_sub(1);
                    self.status = if unreadable > 0 {
                        format!("Added {} photos ({} unreadable)", added, unreadable)
                    } else {
                        format!("Added {} photos", added)
                    };
                }
                ReportUpdate::Thumbnail {
                    id,
                    width,
                    height,
                    rgba_data,
                } => {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                    let texture = ctx.load_texture(
                        id.to_string(),
                        color_image,
                        egui::TextureOptions::default(),
                    );
                    self.thumbnails.insert(id, texture);
                }
                ReportUpdate::LogoThumbnail {
                    width,
                    height,
                    rgba_data,
                } => {
                    let color_image =
                        egui::ColorImage::from_rgba_unmultiplied([width, height], &rgba_data);
                    if let Some(texture) = &mut self.logo_texture {
                        texture.set(color_image, egui::TextureOptions::default());
                    } else {
                        self.logo_texture = Some(ctx.load_texture(
                            "logo",
                            color_image,
                            egui::TextureOptions::default(),
                        ));
                    }
                }
                ReportUpdate::LogoRemoved => {
                    self.logo_texture = None;
                }
                ReportUpdate::OptionsLoaded { options } => {
                    self.options = options;
                    self.status = "Options loaded".to_string();
                }
                ReportUpdate::OptionsSaved { path } => {
                    self.status = format!("Options saved → {}", path.display());
                }
                ReportUpdate::ReportComplete { path, pages } => {
                    self.status = format!("Generated {} pages → {}", pages, path.display());
                }
                ReportUpdate::EmptyReport { message } => {
                    self.status.clear();
                    self.empty_alert = Some(message);
                }
                ReportUpdate::Error { message } => {
                    self.status = format!("Error: {message}");
                }
            }
            ctx.request_repaint();
        }
    }

    fn show_empty_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.empty_alert.clone() else {
            return;
        };

        egui::Window::new("Empty report")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    self.empty_alert = None;
                }
            });
    }
}

impl eframe::App for PhotoReportApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.process_updates(ctx);

        let processing = self.pending_batches > 0;

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.toggle_value(&mut self.show_log, "📜 Log");
                ui.separator();
                ui.label(&self.status);
            });
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("log")
                .resizable(true)
                .default_height(160.0)
                .show(ctx, |ui| show_log_panel(ui, &self.logger));
        }

        let (tx, mut rx) = mpsc::unbounded_channel();

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    show_metadata(
                        ui,
                        &mut self.metadata,
                        self.logo_texture.as_ref(),
                        self.state.metadata().logo.is_some(),
                        &tx,
                    );
                    ui.add_space(10.0);
                    ui.separator();
                    show_actions(
                        ui,
                        &self.state,
                        &mut self.options,
                        processing,
                        &tx,
                        &mut self.status,
                    );
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            show_photos(ui, &self.state, &self.thumbnails, &tx);
        });

        self.show_empty_alert(ctx);

        // Route view commands through `send` so batch tracking stays in one place
        drop(tx);
        while let Ok(command) = rx.try_recv() {
            self.send(command);
        }

        if processing {
            ctx.request_repaint(); // Keep the spinner moving
        }
    }
}
