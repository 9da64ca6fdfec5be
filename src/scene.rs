use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_FIGURES};
use crate::error::{EditorError, EditorResult};
use crate::figure::{Figure, FigureId};

/// How the canvas background is drawn and exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundMode {
    #[default]
    White,
    Transparent,
}

/// Top-level aggregate: canvas settings plus the figures it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    canvas_width: u32,
    canvas_height: u32,
    pub background: BackgroundMode,
    figures: Vec<Figure>,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            background: BackgroundMode::default(),
            figures: Vec::new(),
        }
    }
}

impl Scene {
    pub fn new(canvas_width: u32, canvas_height: u32) -> EditorResult<Self> {
        let mut scene = Self::default();
        scene.set_canvas_size(canvas_width, canvas_height)?;
        Ok(scene)
    }

    pub fn canvas_width(&self) -> u32 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.canvas_height
    }

    pub fn set_canvas_size(&mut self, width: u32, height: u32) -> EditorResult<()> {
        if width == 0 || height == 0 {
            return Err(EditorError::Validation(format!(
                "canvas size must be positive, got {width}x{height}"
            )));
        }
        self.canvas_width = width;
        self.canvas_height = height;
        Ok(())
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Mutable access that cannot change how many figures there are.
    pub(crate) fn figures_mut(&mut self) -> &mut [Figure] {
        &mut self.figures
    }

    pub fn figure(&self, id: FigureId) -> Option<&Figure> {
        self.figures.iter().find(|f| f.id() == id)
    }

    pub fn figure_mut(&mut self, id: FigureId) -> Option<&mut Figure> {
        self.figures.iter_mut().find(|f| f.id() == id)
    }

    pub fn is_full(&self) -> bool {
        self.figures.len() >= MAX_FIGURES
    }

    /// Adds a figure, refusing once the scene is at capacity.
    pub fn add_figure(&mut self, figure: Figure) -> EditorResult<FigureId> {
        if self.is_full() {
            return Err(EditorError::Capacity { max: MAX_FIGURES });
        }
        let id = figure.id();
        self.figures.push(figure);
        Ok(id)
    }

    pub fn remove_figure(&mut self, id: FigureId) -> EditorResult<Figure> {
        let index = self
            .figures
            .iter()
            .position(|f| f.id() == id)
            .ok_or(EditorError::UnknownFigure(id))?;
        Ok(self.figures.remove(index))
    }

    /// Replaces the whole figure list. Ids of figures already in the scene
    /// are kept by position so outstanding references survive an undo.
    pub(crate) fn replace_figures(&mut self, mut figures: Vec<Figure>) {
        for (incoming, existing) in figures.iter_mut().zip(&self.figures) {
            incoming.set_id(existing.id());
        }
        self.figures = figures;
    }
}
