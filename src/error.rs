use thiserror::Error;

use crate::export::ExportError;
use crate::figure::FigureId;
use crate::persistence::PersistenceError;

/// Errors reported by editor operations. None of them are fatal: the scene
/// stays in its last valid state whenever one is returned.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Rejected input such as a non-positive canvas size
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("A scene can hold at most {max} figures")]
    Capacity { max: usize },

    #[error("No figure with id {0}")]
    UnknownFigure(FigureId),

    #[error("No figure is selected")]
    NoSelection,

    #[error("Nothing to undo")]
    HistoryUnderflow,

    #[error("Failed to load scene: {0}")]
    Load(#[source] PersistenceError),

    #[error("Failed to save scene: {0}")]
    Save(#[source] PersistenceError),

    #[error("Failed to export image: {0}")]
    Export(#[from] ExportError),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
