use crate::FigurePoserApp;

pub fn central_panel(app: &mut FigurePoserApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::both().show(ui, |ui| {
            let scene = app.editor().scene();
            let size = egui::vec2(scene.canvas_width() as f32, scene.canvas_height() as f32);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
            let origin = response.rect.min.to_vec2();

            // Handle input, canvas coordinates are world coordinates
            let (pressed, released, pointer) = ui.input(|i| {
                (
                    i.pointer.primary_pressed(),
                    i.pointer.primary_released(),
                    i.pointer.interact_pos(),
                )
            });
            if let Some(pos) = pointer {
                let world = pos - origin;
                let editor = app.editor_mut();
                if pressed && response.hovered() {
                    editor.pointer_down(world);
                } else if editor.is_dragging() {
                    editor.update_drag(world);
                }
            }
            if released {
                app.editor_mut().end_drag();
            }

            app.renderer().render(&painter, response.rect, app.editor());
        });
    });
}
