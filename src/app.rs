use std::path::PathBuf;

use crate::editor::Editor;
use crate::error::{EditorError, EditorResult};
use crate::export::{self, ExportFormat};
use crate::figure::FigureField;
use crate::limb::{LimbId, Segment};
use crate::panels::{central_panel, controls_panel, status_bar, top_bar};
use crate::renderer::Renderer;
use crate::settings::EditorSettings;

/// The figure posing window: top bar, controls on the left and the canvas
/// in the middle.
pub struct FigurePoserApp {
    editor: Editor,
    renderer: Renderer,
    settings: EditorSettings,
    /// Segment driven by the length slider
    pub(crate) segment: (LimbId, Segment),
    pub(crate) canvas_width_text: String,
    pub(crate) canvas_height_text: String,
    status: Option<String>,
    /// A slider edit waiting for the pointer to be released before it is
    /// committed to history
    pending_commit: bool,
}

impl Default for FigurePoserApp {
    fn default() -> Self {
        Self::with_settings(EditorSettings::default())
    }
}

impl FigurePoserApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_settings(EditorSettings::load(cc.storage))
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        let editor = Editor::with_canvas_size(settings.canvas_width, settings.canvas_height)
            .unwrap_or_else(|e| {
                log::warn!("Stored canvas size rejected ({e}), using defaults");
                Editor::new()
            });
        let canvas_width_text = editor.scene().canvas_width().to_string();
        let canvas_height_text = editor.scene().canvas_height().to_string();

        Self {
            editor,
            renderer: Renderer::new(settings.show_joint_handles),
            settings,
            segment: (LimbId::LeftArm, Segment::Upper),
            canvas_width_text,
            canvas_height_text,
            status: None,
            pending_commit: false,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut EditorSettings {
        &mut self.settings
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_show_joint_handles(&mut self, show: bool) {
        self.renderer.show_joint_handles = show;
        self.settings.show_joint_handles = show;
    }

    /// Shows the outcome of a user action in the status bar.
    pub(crate) fn report(&mut self, result: EditorResult<()>, success: impl Into<String>) {
        self.status = Some(match result {
            Ok(()) => success.into(),
            Err(e) => {
                log::warn!("{e}");
                e.to_string()
            }
        });
    }

    /// Applies a slider edit to the selected figure. The history entry is
    /// taken once the pointer is released.
    pub(crate) fn edit_selected(&mut self, field: FigureField) {
        let Some(id) = self.editor.selected_id() else {
            return;
        };
        match self.editor.set_figure_field(id, field) {
            Ok(()) => self.pending_commit = true,
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub(crate) fn edit_segment_length(&mut self, length: f32) {
        let Some(id) = self.editor.selected_id() else {
            return;
        };
        let (limb, segment) = self.segment;
        match self.editor.set_limb_segment_length(id, limb, segment, length) {
            Ok(_) => self.pending_commit = true,
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    pub(crate) fn add_figure(&mut self) {
        let result = self.editor.add_figure().map(|_| ());
        self.report(result, "Figure added");
    }

    pub(crate) fn remove_selected(&mut self) {
        let result = self.editor.remove_selected();
        self.report(result, "Figure removed");
    }

    pub(crate) fn undo(&mut self) {
        self.pending_commit = false;
        let result = self.editor.undo();
        self.report(result, "Undone");
    }

    /// Canvas size edits are silently ignored while the text is not a valid
    /// size.
    pub(crate) fn apply_canvas_size_text(&mut self) {
        if let Err(e) = self
            .editor
            .set_canvas_size_text(&self.canvas_width_text, &self.canvas_height_text)
        {
            log::debug!("Ignoring canvas size edit: {e}");
            return;
        }
        self.settings.canvas_width = self.editor.scene().canvas_width();
        self.settings.canvas_height = self.editor.scene().canvas_height();
    }

    pub(crate) fn save_scene(&mut self) {
        let path = self.settings.scene_path.clone();
        let result = self.editor.save_scene(&path);
        self.report(result, format!("Saved {path}"));
    }

    pub(crate) fn load_scene(&mut self) {
        let path = self.settings.scene_path.clone();
        self.pending_commit = false;
        let result = self.editor.load_scene(&path);
        if result.is_ok() {
            self.sync_canvas_size_text();
        }
        self.report(result, format!("Loaded {path}"));
    }

    pub(crate) fn export(&mut self, format: ExportFormat) {
        let path = PathBuf::from(&self.settings.export_path).with_extension(format.extension());
        let result = export::export_scene(self.editor.scene(), &path, format).map_err(EditorError::from);
        self.report(result, format!("Exported {}", path.display()));
    }

    fn sync_canvas_size_text(&mut self) {
        self.canvas_width_text = self.editor.scene().canvas_width().to_string();
        self.canvas_height_text = self.editor.scene().canvas_height().to_string();
    }

    fn flush_pending_commit(&mut self, ctx: &egui::Context) {
        if self.pending_commit && !ctx.input(|i| i.pointer.any_down()) {
            self.editor.commit_history();
            self.pending_commit = false;
        }
    }
}

impl eframe::App for FigurePoserApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        top_bar(self, ctx);
        status_bar(self, ctx);
        controls_panel(self, ctx);
        central_panel(self, ctx);

        self.flush_pending_commit(ctx);
        if self.editor.take_dirty() {
            ctx.request_repaint();
        }
    }
}
