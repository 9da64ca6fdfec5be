use crate::error::{EditorError, EditorResult};
use crate::figure::Figure;
use crate::persistence::{FigureSnapshot, PersistenceResult};
use crate::scene::Scene;

/// Fully detached copy of a scene's figures at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    figures: Vec<FigureSnapshot>,
}

impl Snapshot {
    pub fn capture(scene: &Scene) -> Self {
        Self {
            figures: scene.figures().iter().map(FigureSnapshot::capture).collect(),
        }
    }

    pub fn from_figures(figures: Vec<FigureSnapshot>) -> Self {
        Self { figures }
    }

    pub fn figures(&self) -> &[FigureSnapshot] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Rebuilds the figures this snapshot describes.
    pub fn restore(&self) -> PersistenceResult<Vec<Figure>> {
        self.figures.iter().map(FigureSnapshot::restore).collect()
    }
}

/// Linear undo history of full-scene snapshots.
///
/// Committing after an undo drops every snapshot past the current index, so
/// there is no redo.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Snapshot>,
    /// -1 before the first commit
    index: isize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            index: -1,
        }
    }

    /// Captures `scene`, discarding any snapshots after the current one.
    pub fn commit(&mut self, scene: &Scene) {
        self.push(Snapshot::capture(scene));
    }

    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.truncate((self.index + 1) as usize);
        self.snapshots.push(snapshot);
        self.index += 1;
        log::debug!(
            "History: committed snapshot {} ({} figures)",
            self.index,
            self.snapshots[self.index as usize].len()
        );
    }

    /// Steps back one snapshot and returns it for the caller to apply.
    pub fn undo(&mut self) -> EditorResult<&Snapshot> {
        if self.index <= 0 {
            return Err(EditorError::HistoryUnderflow);
        }
        self.index -= 1;
        Ok(&self.snapshots[self.index as usize])
    }

    /// Forgets everything and starts over from `snapshot`.
    pub fn reset(&mut self, snapshot: Snapshot) {
        self.snapshots.clear();
        self.index = -1;
        self.push(snapshot);
    }

    pub fn current(&self) -> Option<&Snapshot> {
        usize::try_from(self.index)
            .ok()
            .and_then(|index| self.snapshots.get(index))
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }
}
