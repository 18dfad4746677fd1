// src/ui/dataset.rs
use eframe::egui;
use crate::state::AppState;
use crate::utils::format_gdp;

pub fn show_dataset_view(ui: &mut egui::Ui, state: &mut AppState) {
    // Source Section
    ui.group(|ui| {
        ui.heading("Dataset");
        ui.add_space(8.0);

        ui.horizontal(|ui| {
            ui.label("Source:");
            ui.label(state.settings.dataset.to_string_lossy().as_ref());
        });

        if let Some(loaded_at) = &state.loaded_at {
            ui.label(format!("Loaded: {}", loaded_at.format("%Y-%m-%d %H:%M:%S")));
        }
    });

    ui.add_space(16.0);

    let Some(store) = &state.store else {
        ui.centered_and_justified(|ui| {
            ui.label("No dataset loaded. Use File > Open Dataset... to pick a CSV file.");
        });
        return;
    };

    if store.is_empty() {
        ui.colored_label(egui::Color32::YELLOW, "The dataset has a header row but no usable data rows.");
        ui.add_space(8.0);
    }

    let summary = store.summary();

    ui.horizontal(|ui| {
        // Records Card
        ui.group(|ui| {
            ui.set_min_width(ui.available_width() / 3.0);
            ui.vertical(|ui| {
                ui.heading("Records");
                ui.add_space(8.0);

                ui.strong(format!("Countries: {}", store.len()));
                ui.strong(format!("Year columns: {}", store.year_columns().len()));
                if let Some((first, last)) = store.year_span() {
                    ui.label(format!("Years: {} - {}", first, last));
                }

                if summary.skipped_rows > 0 {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("Skipped rows: {}", summary.skipped_rows),
                    );
                }
                if summary.coerced_cells > 0 {
                    ui.colored_label(
                        egui::Color32::YELLOW,
                        format!("Non-numeric cells read as 0: {}", summary.coerced_cells),
                    );
                }
            });
        });

        // Regions Card
        ui.group(|ui| {
            ui.set_min_width(ui.available_width() / 2.0);
            ui.vertical(|ui| {
                ui.heading("Regions");
                ui.add_space(8.0);

                egui::ScrollArea::vertical()
                    .id_source("regions_scroll")
                    .max_height(200.0)
                    .show(ui, |ui| {
                        for (region, count) in store.countries_per_region() {
                            ui.label(format!("• {} ({} countries)", region, count));
                        }
                    });
            });
        });
    });

    ui.add_space(16.0);

    // Sample Record Section
    if let Some(sample) = store.records().first() {
        ui.group(|ui| {
            ui.heading("Sample Record");
            ui.add_space(8.0);

            ui.label(format!("Country: {}", sample.country));
            ui.label(format!("Code: {}", sample.code));
            ui.label(format!("Region: {}", sample.region));
            ui.label(format!("GDP data available for {} years", sample.gdp_by_year.len()));

            if let Some((year, value)) = sample.gdp_by_year.iter().next_back() {
                ui.label(format!("Latest ({}): {}", year, format_gdp(*value)));
            }
        });
    }
}
