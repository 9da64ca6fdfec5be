use crate::FigurePoserApp;

pub fn status_bar(app: &mut FigurePoserApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let history = app.editor().history();
            ui.label(format!(
                "History {}/{}",
                history.index() + 1,
                history.len()
            ));
            if app.editor().is_dragging() {
                ui.label("Dragging");
            }
            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
    });
}
