#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod constants;
pub mod editor;
pub mod error;
pub mod export;
pub mod figure;
pub mod geometry;
pub mod history;
pub mod joint;
pub mod limb;
pub mod panels;
pub mod persistence;
pub mod renderer;
pub mod scene;
pub mod settings;

pub use app::FigurePoserApp;
pub use editor::Editor;
pub use error::{EditorError, EditorResult};
pub use export::{ExportError, ExportFormat};
pub use figure::{Figure, FigureField, FigureId};
pub use geometry::{Pick, PoseTransform};
pub use history::{History, Snapshot};
pub use joint::Joint;
pub use limb::{JointRef, Limb, LimbId, LimbJoint, Segment, SegmentEditResult};
pub use persistence::{FigureSnapshot, PersistenceError, SceneDocument};
pub use renderer::Renderer;
pub use scene::{BackgroundMode, Scene};
pub use settings::EditorSettings;
