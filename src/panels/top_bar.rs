use crate::FigurePoserApp;
use crate::export::ExportFormat;
use crate::figure::FigureField;
use crate::scene::BackgroundMode;

const PATH_FIELD_WIDTH: f32 = 160.0;

pub fn top_bar(app: &mut FigurePoserApp, ctx: &egui::Context) {
    let undo_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Z);
    if ctx.input_mut(|i| i.consume_shortcut(&undo_shortcut)) {
        app.undo();
    }

    egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
        ui.horizontal_wrapped(|ui| {
            if ui.button("Undo").clicked() {
                app.undo();
            }
            ui.separator();

            ui.label("Scene:");
            ui.add(
                egui::TextEdit::singleline(&mut app.settings_mut().scene_path)
                    .desired_width(PATH_FIELD_WIDTH),
            );
            if ui.button("Save").clicked() {
                app.save_scene();
            }
            if ui.button("Load").clicked() {
                app.load_scene();
            }
            ui.separator();

            if let Some(color) = app.editor().selected_figure().map(|figure| figure.color) {
                ui.label("Color:");
                // Figures are opaque `#rrggbb`, so no alpha channel in the picker
                let mut rgb = [color.r(), color.g(), color.b()];
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    app.edit_selected(FigureField::Color(egui::Color32::from_rgb(
                        rgb[0], rgb[1], rgb[2],
                    )));
                }
                ui.separator();
            }

            ui.label("Background:");
            let current = app.editor().scene().background;
            let mut background = current;
            ui.radio_value(&mut background, BackgroundMode::White, "White");
            ui.radio_value(&mut background, BackgroundMode::Transparent, "Transparent");
            if background != current {
                app.editor_mut().set_background(background);
            }
            ui.separator();

            ui.label("Export:");
            ui.add(
                egui::TextEdit::singleline(&mut app.settings_mut().export_path)
                    .desired_width(PATH_FIELD_WIDTH),
            );
            if ui.button("PNG").clicked() {
                app.export(ExportFormat::Png);
            }
            if ui.button("JPEG").clicked() {
                app.export(ExportFormat::Jpeg);
            }
        });
    });
}
