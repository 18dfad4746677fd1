// src/ui/analysis.rs
use eframe::egui;
use crate::config::{ChartKind, Operation};
use crate::state::{AppState, QueryKind};
use crate::ui::chart::show_chart;

pub fn show_analysis_view(ui: &mut egui::Ui, state: &mut AppState) {
    egui::SidePanel::left("analysis_form_panel")
        .resizable(true)
        .default_width(300.0)
        .show_inside(ui, |ui| {
            show_query_form(ui, state);
            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);
            show_chart_history(ui, state);
        });

    egui::CentralPanel::default().show_inside(ui, |ui| {
        match state.selected_chart() {
            Some(chart) => show_chart(ui, chart, &state.settings.chart),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("Fill in the form and press Generate Graph");
                });
            }
        }
    });
}

fn show_query_form(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Analysis");
    ui.add_space(4.0);

    let (min_year, max_year) = state.year_bounds();
    let regions: Vec<String> = state.store.as_ref()
        .map(|s| s.regions().into_iter().map(str::to_string).collect())
        .unwrap_or_default();
    let form = &mut state.form;

    egui::Grid::new("query_form_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label("Analysis Type:");
            egui::ComboBox::from_id_source("analysis_type_combo")
                .selected_text(form.kind.label())
                .show_ui(ui, |ui| {
                    for kind in [QueryKind::Region, QueryKind::CountryTrend] {
                        ui.selectable_value(&mut form.kind, kind, kind.label());
                    }
                });
            ui.end_row();

            match form.kind {
                QueryKind::Region => {
                    ui.label("Region:");
                    egui::ComboBox::from_id_source("region_combo")
                        .selected_text(form.region.as_str())
                        .show_ui(ui, |ui| {
                            for region in &regions {
                                ui.selectable_value(&mut form.region, region.clone(), region);
                            }
                        });
                    ui.end_row();

                    ui.label("Year:");
                    ui.add(egui::TextEdit::singleline(&mut form.year)
                        .hint_text(format!("{}-{}", min_year, max_year)));
                    ui.end_row();

                    ui.label("Operation:");
                    ui.horizontal(|ui| {
                        ui.add(egui::TextEdit::singleline(&mut form.operation).desired_width(80.0));
                        ui.menu_button("▼", |ui| {
                            for op in Operation::ALL {
                                if ui.button(op.as_str()).clicked() {
                                    form.operation = op.to_string();
                                    ui.close_menu();
                                }
                            }
                        });
                    });
                    ui.end_row();
                }
                QueryKind::CountryTrend => {
                    ui.label("Country:");
                    ui.add(egui::TextEdit::singleline(&mut form.country).hint_text("e.g. Pakistan"));
                    ui.end_row();

                    ui.label("Start Year:");
                    ui.add(egui::TextEdit::singleline(&mut form.year)
                        .hint_text(format!("{}-{}", min_year, max_year)));
                    ui.end_row();

                    ui.label("End Year:");
                    ui.add(egui::TextEdit::singleline(&mut form.end_year).hint_text("optional"));
                    ui.end_row();
                }
            }

            ui.label("Graph Type:");
            egui::ComboBox::from_id_source("graph_type_combo")
                .selected_text(form.chart.as_str())
                .show_ui(ui, |ui| {
                    for kind in ChartKind::ALL {
                        ui.selectable_value(&mut form.chart, kind, kind.as_str());
                    }
                });
            ui.end_row();
        });

    ui.add_space(8.0);
    if ui.button("Generate Graph").clicked() {
        if let Err(e) = state.submit_query() {
            log::warn!("Query rejected: {}", e);
            state.error_message = Some(e.to_string());
        }
    }
}

fn show_chart_history(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading("Charts");
    ui.add_space(4.0);

    if state.charts.is_empty() {
        ui.label("No charts generated yet");
        return;
    }

    egui::ScrollArea::vertical()
        .id_source("chart_history_scroll")
        .show(ui, |ui| {
            let mut delete_index = None;

            for (idx, chart) in state.charts.iter().enumerate() {
                let is_selected = state.selected_chart == Some(idx);
                let response = ui.selectable_label(
                    is_selected,
                    format!("{} ({})", chart.title(), chart.kind),
                );

                if response.clicked() {
                    state.selected_chart = Some(idx);
                }

                response.context_menu(|ui| {
                    if ui.button(egui::RichText::new("🗑 Delete").color(egui::Color32::RED)).clicked() {
                        delete_index = Some(idx);
                        ui.close_menu();
                    }
                });
            }

            if let Some(idx) = delete_index {
                state.remove_chart(idx);
            }
        });
}
