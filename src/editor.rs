use std::path::Path;

use egui::Pos2;

use crate::constants::FIGURE_SPAWN_SPACING;
use crate::error::{EditorError, EditorResult};
use crate::figure::{Figure, FigureField, FigureId};
use crate::geometry::{self, Pick};
use crate::history::{History, Snapshot};
use crate::limb::{LimbId, Segment, SegmentEditResult};
use crate::persistence::{FigureSnapshot, SceneDocument};
use crate::scene::{BackgroundMode, Scene};

/// Owns the scene and its undo history and applies every user interaction
/// to them.
///
/// Adding or removing a figure, releasing a drag and loading a scene commit
/// a history snapshot on their own. Field and segment edits do not: the
/// caller commits once the slider or picker interaction is over.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    history: History,
    selected: Option<FigureId>,
    dragging: bool,
    dirty: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates an editor with one figure in the middle of a default canvas
    /// and an initial snapshot.
    pub fn new() -> Self {
        Self::populated(Scene::default())
    }

    /// Like [`Editor::new`] with a custom canvas size.
    pub fn with_canvas_size(width: u32, height: u32) -> EditorResult<Self> {
        Ok(Self::populated(Scene::new(width, height)?))
    }

    fn populated(mut scene: Scene) -> Self {
        let figure = spawn_figure(&scene);
        if let Err(e) = scene.add_figure(figure) {
            log::warn!("Could not add the initial figure: {e}");
        }
        Self::with_scene(scene)
    }

    /// Wraps an existing scene, taking the initial snapshot from it.
    pub fn with_scene(scene: Scene) -> Self {
        let mut history = History::new();
        history.commit(&scene);
        let selected = scene.figures().first().map(Figure::id);
        Self {
            scene,
            history,
            selected,
            dragging: false,
            dirty: true,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn figure(&self, id: FigureId) -> EditorResult<&Figure> {
        self.scene.figure(id).ok_or(EditorError::UnknownFigure(id))
    }

    fn figure_mut(&mut self, id: FigureId) -> EditorResult<&mut Figure> {
        self.scene.figure_mut(id).ok_or(EditorError::UnknownFigure(id))
    }

    pub fn selected_id(&self) -> Option<FigureId> {
        self.selected
    }

    pub fn selected_figure(&self) -> Option<&Figure> {
        self.selected.and_then(|id| self.scene.figure(id))
    }

    pub fn select(&mut self, id: Option<FigureId>) -> EditorResult<()> {
        if let Some(id) = id {
            self.figure(id)?;
        }
        self.clear_active_joints();
        self.selected = id;
        self.dirty = true;
        Ok(())
    }

    /// Returns and clears the flag raised by every state change.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn add_figure(&mut self) -> EditorResult<FigureId> {
        let figure = spawn_figure(&self.scene);
        let id = self.scene.add_figure(figure).inspect_err(|e| {
            log::warn!("Refused to add figure: {e}");
        })?;
        log::info!("Added figure {id}");
        self.selected = Some(id);
        self.commit_history();
        Ok(id)
    }

    pub fn remove_figure(&mut self, id: FigureId) -> EditorResult<()> {
        self.scene.remove_figure(id)?;
        log::info!("Removed figure {id}");
        self.selected = self.scene.figures().first().map(Figure::id);
        self.dragging = false;
        self.commit_history();
        Ok(())
    }

    pub fn remove_selected(&mut self) -> EditorResult<()> {
        let id = self.selected.ok_or(EditorError::NoSelection)?;
        self.remove_figure(id)
    }

    pub fn set_figure_field(&mut self, id: FigureId, field: FigureField) -> EditorResult<()> {
        self.figure_mut(id)?.set_field(field).inspect_err(|e| {
            log::warn!("Rejected edit {field:?}: {e}");
        })?;
        self.dirty = true;
        Ok(())
    }

    pub fn set_limb_segment_length(
        &mut self,
        id: FigureId,
        limb: LimbId,
        segment: Segment,
        length: f32,
    ) -> EditorResult<SegmentEditResult> {
        let result = self
            .figure_mut(id)?
            .set_limb_segment_length(limb, segment, length)
            .inspect_err(|e| log::warn!("Rejected {limb:?} {segment:?} length: {e}"))?;
        if !result.geometry_applied {
            log::debug!("{limb:?} {segment:?} has zero length, only the target was updated");
        }
        self.dirty = true;
        Ok(result)
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> EditorResult<()> {
        self.scene.set_canvas_size(width, height)?;
        self.dirty = true;
        Ok(())
    }

    /// Canvas size from free text input. Anything that is not a positive
    /// integer is rejected and the current size kept.
    pub fn set_canvas_size_text(&mut self, width: &str, height: &str) -> EditorResult<()> {
        let parse = |text: &str| {
            text.trim()
                .parse::<u32>()
                .map_err(|_| EditorError::Validation(format!("'{text}' is not a valid size")))
        };
        let (width, height) = (parse(width)?, parse(height)?);
        self.set_canvas_size(width, height)
    }

    pub fn set_background(&mut self, mode: BackgroundMode) {
        self.scene.background = mode;
        self.dirty = true;
    }

    /// Picks the figure or joint under `pos` and selects it. A miss clears
    /// the selection.
    pub fn pick(&mut self, pos: Pos2) -> Option<Pick> {
        let hit = geometry::pick(self.scene.figures(), pos);
        self.clear_active_joints();
        self.selected = hit.map(|hit| hit.figure);
        if let Some(hit) = hit {
            log::debug!("Picked {hit:?}");
            if let Some(figure) = self.scene.figure_mut(hit.figure) {
                figure.selected_joint = hit.joint;
            }
        }
        self.dirty = true;
        hit
    }

    /// At most one joint is active, and only on the selected figure.
    fn clear_active_joints(&mut self) {
        for figure in self.scene.figures_mut() {
            figure.selected_joint = None;
        }
    }

    /// Starts dragging the current selection. Returns false if nothing is
    /// selected.
    pub fn begin_drag(&mut self) -> bool {
        self.dragging = self.selected_figure().is_some();
        self.dragging
    }

    /// `pick` followed by `begin_drag` on a hit.
    pub fn pointer_down(&mut self, pos: Pos2) -> Option<Pick> {
        let hit = self.pick(pos);
        if hit.is_some() {
            self.begin_drag();
        }
        hit
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Moves the active joint, or the whole figure when no joint is active.
    pub fn update_drag(&mut self, pos: Pos2) {
        if !self.dragging {
            return;
        }
        let Some(figure) = self.selected.and_then(|id| self.scene.figure_mut(id)) else {
            return;
        };
        match figure.selected_joint {
            Some(joint) => figure.set_joint_from_world(joint, pos),
            None => {
                figure.x = pos.x;
                figure.y = pos.y;
            }
        }
        self.dirty = true;
    }

    /// Ends the drag and commits exactly one snapshot for it.
    pub fn end_drag(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.commit_history();
        if let Some(figure) = self.selected.and_then(|id| self.scene.figure_mut(id)) {
            figure.selected_joint = None;
        }
    }

    pub fn commit_history(&mut self) {
        self.history.commit(&self.scene);
        self.dirty = true;
    }

    /// Restores the previous snapshot. The live figures are rebuilt from it
    /// entirely.
    pub fn undo(&mut self) -> EditorResult<()> {
        let figures = self
            .history
            .undo()?
            .restore()
            .map_err(EditorError::Load)?;
        self.scene.replace_figures(figures);
        self.selected = self.scene.figures().first().map(Figure::id);
        self.dragging = false;
        self.dirty = true;
        log::info!("Undo to snapshot {}", self.history.index());
        Ok(())
    }

    /// Scene document for the last committed state.
    pub fn document(&self) -> SceneDocument {
        let figures = match self.history.current() {
            Some(snapshot) => snapshot.figures().to_vec(),
            None => self.scene.figures().iter().map(FigureSnapshot::capture).collect(),
        };
        SceneDocument {
            canvas_width: self.scene.canvas_width(),
            canvas_height: self.scene.canvas_height(),
            background_mode: self.scene.background,
            figures,
        }
    }

    pub fn save_scene(&self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        self.document().save(path).map_err(EditorError::Save)?;
        log::info!("Saved scene to {}", path.display());
        Ok(())
    }

    /// Loads a scene file. On any error the current scene is left untouched.
    pub fn load_scene(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let document = SceneDocument::load(path).map_err(EditorError::Load)?;
        self.apply_document(document)?;
        log::info!("Loaded scene from {}", path.display());
        Ok(())
    }

    pub fn load_scene_json(&mut self, json: &str) -> EditorResult<()> {
        let document = SceneDocument::from_json(json).map_err(EditorError::Load)?;
        self.apply_document(document)
    }

    /// Replaces canvas settings and figures, then restarts history from the
    /// loaded state.
    pub fn apply_document(&mut self, document: SceneDocument) -> EditorResult<()> {
        let figures = document.restore_figures().map_err(EditorError::Load)?;
        // Validate before touching anything
        Scene::new(document.canvas_width, document.canvas_height)?;

        self.scene
            .set_canvas_size(document.canvas_width, document.canvas_height)?;
        self.scene.background = document.background_mode;
        self.scene.replace_figures(figures);
        self.selected = self.scene.figures().first().map(Figure::id);
        self.dragging = false;
        self.history.reset(Snapshot::capture(&self.scene));
        self.dirty = true;
        Ok(())
    }
}

/// New figures line up to the right of the canvas centre.
fn spawn_figure(scene: &Scene) -> Figure {
    let count = scene.figures().len() as f32;
    Figure::new(
        (scene.canvas_width() / 2) as f32 + count * FIGURE_SPAWN_SPACING,
        (scene.canvas_height() / 2) as f32,
    )
}
