// src/app.rs
use anyhow::Result;
use eframe::egui;
use rfd::FileDialog;

use crate::state::{AppState, Screen};

pub struct GdpAtlasApp {
    state: AppState,
}

impl GdpAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn show_menu(&mut self, ui: &mut egui::Ui) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Dataset...").clicked() {
                    self.open_dataset();
                    ui.close_menu();
                }
                if ui.button("Reload Dataset").clicked() {
                    if let Err(e) = self.state.reload_dataset() {
                        self.state.error_message = Some(e.to_string());
                    }
                    ui.close_menu();
                }
            });

            ui.separator();

            // Tab selection using buttons
            let tabs = [
                (Screen::Dataset, "Dataset"),
                (Screen::Analysis, "Analysis"),
            ];

            for (mode, label) in tabs {
                if ui.selectable_label(self.state.current_screen == mode, label).clicked() {
                    self.state.current_screen = mode;
                }
            }
        });
    }

    fn open_dataset(&mut self) {
        let file_dialog = FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_title("Open GDP Dataset");

        if let Some(path) = file_dialog.pick_file() {
            match self.state.load_dataset(&path) {
                Ok(()) => {
                    self.state.error_message = None;
                }
                Err(e) => {
                    log::error!("{}", e);
                    self.state.error_message = Some(e.to_string());
                }
            }
        }
    }
}

impl eframe::App for GdpAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.show_menu(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            match self.state.current_screen {
                Screen::Dataset => {
                    crate::ui::dataset::show_dataset_view(ui, &mut self.state);
                },
                Screen::Analysis => {
                    crate::ui::analysis::show_analysis_view(ui, &mut self.state);
                },
            }
        });

        // Show error modal if needed
        let error_msg = self.state.error_message.clone(); // Clone first
        if let Some(error) = error_msg {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(&error);
                    if ui.button("OK").clicked() {
                        self.state.error_message = None;
                    }
                });
        }
    }
}

pub fn run_dashboard(state: AppState) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("GDP Analysis Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "GDP Analysis Dashboard",
        options,
        Box::new(|_cc| Box::new(GdpAtlasApp::new(state))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
