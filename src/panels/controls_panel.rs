use std::ops::RangeInclusive;

use crate::FigurePoserApp;
use crate::constants::{MAX_SCALE, MIN_SCALE};
use crate::figure::{Figure, FigureField};
use crate::limb::{LimbId, Segment};

pub fn controls_panel(app: &mut FigurePoserApp, ctx: &egui::Context) {
    egui::SidePanel::left("controls_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                figures_section(app, ui);
                ui.separator();
                canvas_section(app, ui);
                ui.separator();

                // Copy so sliders can write back through the app
                match app.editor().selected_figure().cloned() {
                    Some(figure) => figure_section(app, ui, &figure),
                    None => {
                        ui.label("No figure selected");
                    }
                }
            });
        });
}

fn figures_section(app: &mut FigurePoserApp, ui: &mut egui::Ui) {
    ui.heading("Figures");
    ui.horizontal(|ui| {
        if ui.button("Add figure").clicked() {
            app.add_figure();
        }
        if ui.button("Remove selected").clicked() {
            app.remove_selected();
        }
    });

    let selected = app.editor().selected_id();
    let ids: Vec<_> = app.editor().scene().figures().iter().map(Figure::id).collect();
    for (index, id) in ids.into_iter().enumerate() {
        let label = format!("Figure {}", index + 1);
        if ui.selectable_label(selected == Some(id), label).clicked() {
            if let Err(e) = app.editor_mut().select(Some(id)) {
                log::warn!("{e}");
            }
        }
    }
}

fn canvas_section(app: &mut FigurePoserApp, ui: &mut egui::Ui) {
    ui.heading("Canvas");
    ui.horizontal(|ui| {
        ui.label("Width");
        let width = ui.add(egui::TextEdit::singleline(&mut app.canvas_width_text).desired_width(60.0));
        ui.label("Height");
        let height =
            ui.add(egui::TextEdit::singleline(&mut app.canvas_height_text).desired_width(60.0));
        if width.changed() || height.changed() {
            app.apply_canvas_size_text();
        }
    });

    let mut show = app.renderer().show_joint_handles;
    if ui.checkbox(&mut show, "Show joint handles").changed() {
        app.set_show_joint_handles(show);
    }
}

fn figure_section(app: &mut FigurePoserApp, ui: &mut egui::Ui, figure: &Figure) {
    ui.heading("Figure");

    if let Some(v) = slider(ui, "Scale", figure.scale(), MIN_SCALE..=MAX_SCALE) {
        app.edit_selected(FigureField::Scale(v));
    }
    if let Some(v) = slider(ui, "Rotation", figure.rotation, 0.0..=360.0) {
        app.edit_selected(FigureField::Rotation(v));
    }
    if let Some(v) = slider(ui, "Head rotation", figure.head_rotation, -90.0..=90.0) {
        app.edit_selected(FigureField::HeadRotation(v));
    }
    if let Some(v) = slider(ui, "Neck gap", figure.neck_gap_y(), 5.0..=100.0) {
        app.edit_selected(FigureField::NeckGapY(v));
    }
    if let Some(v) = slider(ui, "Head offset", figure.head_offset_y, -40.0..=40.0) {
        app.edit_selected(FigureField::HeadOffsetY(v));
    }

    ui.separator();
    ui.label("Style");
    let mut outline = figure.global_outline;
    if ui.checkbox(&mut outline, "Global outline").changed() {
        app.edit_selected(FigureField::GlobalOutline(outline));
    }
    if let Some(v) = slider(ui, "Outline", figure.outline_width, 2.0..=15.0) {
        app.edit_selected(FigureField::OutlineWidth(v));
    }
    if let Some(v) = slider(ui, "Limb width", figure.limb_width(), 10.0..=50.0) {
        app.edit_selected(FigureField::LimbWidth(v));
    }
    if let Some(v) = slider(ui, "Corner", figure.corner_radius, 0.0..=100.0) {
        app.edit_selected(FigureField::CornerRadius(v));
    }

    ui.separator();
    ui.label("Segment length");
    egui::ComboBox::from_id_salt("segment_selector")
        .selected_text(segment_label(app.segment))
        .show_ui(ui, |ui| {
            for limb in LimbId::ALL {
                for segment in Segment::ALL {
                    ui.selectable_value(&mut app.segment, (limb, segment), segment_label((limb, segment)));
                }
            }
        });
    let (limb, segment) = app.segment;
    let length = figure.limb(limb).target_length(segment);
    if let Some(v) = slider(ui, "Length", length, 0.0..=100.0) {
        app.edit_segment_length(v);
    }
}

fn segment_label((limb, segment): (LimbId, Segment)) -> String {
    format!("{} - {}", limb.label(), segment.label())
}

/// Returns the new value when the user moved the slider.
fn slider(ui: &mut egui::Ui, label: &str, mut value: f32, range: RangeInclusive<f32>) -> Option<f32> {
    ui.add(egui::Slider::new(&mut value, range).text(label))
        .changed()
        .then_some(value)
}
