// Figure skeleton dimensions (local space units)
pub const HEAD_RADIUS: f32 = 50.0;
pub const BODY_HEIGHT: f32 = 90.0;
pub const BODY_WIDTH: f32 = 65.0;

// Rest-pose segment lengths
pub const ARM_SEGMENT_LENGTH: f32 = 35.0;
pub const LEG_SEGMENT_LENGTH: f32 = 45.0;

// Styling defaults, also used when a scene file omits the key
pub const DEFAULT_COLOR: egui::Color32 = egui::Color32::from_rgb(0x93, 0x70, 0xDB);
pub const DEFAULT_OUTLINE_WIDTH: f32 = 6.0;
pub const DEFAULT_LIMB_WIDTH: f32 = 28.0;
pub const DEFAULT_CORNER_RADIUS: f32 = 45.0;
pub const DEFAULT_NECK_GAP_Y: f32 = 15.0;
pub const DEFAULT_HEAD_OFFSET_Y: f32 = 0.0;
pub const DEFAULT_SEGMENT_LENGTH: f32 = 35.0;

// Default pose of a freshly constructed figure
pub const DEFAULT_FIGURE_X: f32 = 400.0;
pub const DEFAULT_FIGURE_Y: f32 = 300.0;

/// Lower bound the UI clamps scale input to.
pub const MIN_SCALE: f32 = 0.3;
pub const MAX_SCALE: f32 = 3.0;

pub const MAX_FIGURES: usize = 2;

// Hit testing
pub const JOINT_PICK_RADIUS: f32 = 15.0;
pub const FIGURE_PICK_RADIUS: f32 = 100.0;

/// Horizontal spacing between figures added to the scene.
pub const FIGURE_SPAWN_SPACING: f32 = 100.0;

pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 800;

// Rendering
pub const JOINT_HANDLE_RADIUS: f32 = 8.0;
pub const SELECTION_HALF_SIZE: f32 = 150.0;
pub const EXPORT_OUTLINE_WIDTH: f32 = 4.0;
