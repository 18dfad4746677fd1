// src/ui/chart.rs
use eframe::egui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::analysis::chart::{pie_slices, ChartPoint};
use crate::analysis::{AnalysisResult, Chart};
use crate::config::settings::ChartSettings;
use crate::config::ChartKind;
use crate::utils::format_gdp;

const PALETTE: [egui::Color32; 8] = [
    egui::Color32::from_rgb(0x8d, 0xd3, 0xc7),
    egui::Color32::from_rgb(0xff, 0xff, 0xb3),
    egui::Color32::from_rgb(0xbe, 0xba, 0xda),
    egui::Color32::from_rgb(0xfb, 0x80, 0x72),
    egui::Color32::from_rgb(0x80, 0xb1, 0xd3),
    egui::Color32::from_rgb(0xfd, 0xb4, 0x62),
    egui::Color32::from_rgb(0xb3, 0xde, 0x69),
    egui::Color32::from_rgb(0xfc, 0xcd, 0xe5),
];
const LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0xcc);
const PIE_START_DEG: f64 = 140.0;

pub fn show_chart(ui: &mut egui::Ui, chart: &Chart, settings: &ChartSettings) {
    ui.heading(chart.title());
    ui.label(format!("Generated {}", chart.created.format("%Y-%m-%d %H:%M:%S")));
    ui.add_space(8.0);

    let points = chart.points(settings.label_max_len);
    if points.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label("No data available.");
        });
        return;
    }

    let plot_height = (ui.available_height() * 0.6).max(200.0);
    match chart.kind {
        ChartKind::Bar => draw_bar(ui, &points, plot_height),
        ChartKind::Pie => draw_pie(ui, &points, settings.pie_threshold, plot_height),
        ChartKind::Line => draw_line(ui, &points, plot_height),
    }

    ui.add_space(8.0);
    show_summary(ui, &chart.result);
    ui.add_space(8.0);
    show_value_table(ui, &points);
}

fn draw_bar(ui: &mut egui::Ui, points: &[ChartPoint], height: f32) {
    let bars: Vec<Bar> = points.iter()
        .enumerate()
        .map(|(i, point)| {
            Bar::new(i as f64, point.value)
                .name(&point.full_label)
                .width(0.8)
                .fill(PALETTE[i % PALETTE.len()])
        })
        .collect();

    Plot::new("gdp_bar_chart")
        .height(height)
        .allow_zoom(false)
        .allow_drag(false)
        .show_axes([false, true])
        .y_axis_label("GDP (USD)")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));

            // Inline labels only when they can fit
            if points.len() <= 10 {
                for (i, point) in points.iter().enumerate() {
                    plot_ui.text(
                        Text::new(PlotPoint::new(i as f64, 0.0), point.label.clone())
                            .anchor(egui::Align2::CENTER_TOP)
                    );
                }
            }
        });
}

fn draw_pie(ui: &mut egui::Ui, points: &[ChartPoint], threshold: f64, height: f32) {
    let slices = pie_slices(points, threshold);
    if slices.is_empty() {
        ui.label("Pie chart needs a positive total.");
        return;
    }

    Plot::new("gdp_pie_chart")
        .height(height)
        .data_aspect(1.0)
        .allow_zoom(false)
        .allow_drag(false)
        .show_background(false)
        .show_axes([false, false])
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = PIE_START_DEG.to_radians();

            for (i, slice) in slices.iter().enumerate() {
                let sweep = slice.fraction * std::f64::consts::TAU;
                let steps = ((sweep.to_degrees() / 2.0).ceil() as usize).max(1);

                let mut outline = vec![[0.0, 0.0]];
                outline.extend((0..=steps).map(|s| {
                    let angle = start + sweep * s as f64 / steps as f64;
                    [angle.cos(), angle.sin()]
                }));

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(outline))
                        .name(format!("{} ({})", slice.label, format_gdp(slice.value)))
                        .fill_color(PALETTE[i % PALETTE.len()])
                        .stroke(egui::Stroke::new(1.0, egui::Color32::WHITE))
                );

                let middle = start + sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * middle.cos(), 0.6 * middle.sin()),
                        egui::RichText::new(format!("{:.1}%", slice.fraction * 100.0)).strong()
                    )
                    .color(egui::Color32::BLACK)
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(1.2 * middle.cos(), 1.2 * middle.sin()),
                    slice.label.clone(),
                ));

                start += sweep;
            }
        });
}

fn draw_line(ui: &mut egui::Ui, points: &[ChartPoint], height: f32) {
    // Trend labels are years; anything else falls back to its position
    let coords: Vec<[f64; 2]> = points.iter()
        .enumerate()
        .map(|(i, point)| [point.label.parse::<f64>().unwrap_or(i as f64), point.value])
        .collect();

    Plot::new("gdp_line_chart")
        .height(height)
        .x_axis_label("Year")
        .y_axis_label("GDP (USD)")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(coords.clone()))
                    .color(LINE_COLOR)
                    .width(2.0)
                    .name("GDP")
            );
            plot_ui.points(
                Points::new(PlotPoints::from(coords))
                    .radius(4.0)
                    .color(egui::Color32::WHITE)
            );
        });
}

fn show_summary(ui: &mut egui::Ui, result: &AnalysisResult) {
    ui.horizontal(|ui| match result {
        AnalysisResult::Region(r) => {
            ui.strong(format!("{}: {}", r.operation.title(), format_gdp(r.value)));
            ui.separator();
            ui.label(format!("{} countries with data", r.series.len()));
        }
        AnalysisResult::Trend(t) => {
            ui.strong(format!("Average: {}", format_gdp(t.average)));
            ui.separator();
            ui.strong(format!("Total: {}", format_gdp(t.total)));
            ui.separator();
            ui.label(format!("{} years with data", t.series.len()));
        }
    });
}

fn show_value_table(ui: &mut egui::Ui, points: &[ChartPoint]) {
    egui::ScrollArea::vertical()
        .id_source("chart_values_scroll")
        .show(ui, |ui| {
            egui::Grid::new("chart_values_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    for point in points {
                        ui.label(&point.full_label);
                        ui.label(format_gdp(point.value));
                        ui.end_row();
                    }
                });
        });
}
