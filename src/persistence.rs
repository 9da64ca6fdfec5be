//! Scene file format.
//!
//! A scene document stores the canvas settings and the figure list in the
//! same shape as a history snapshot, so the current history entry can be
//! written out as-is. Keys added over time are optional and fall back to
//! their defaults; files written with snake_case keys are accepted too.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::figure::Figure;
use crate::limb::{LimbId, LimbJoint};
use crate::scene::BackgroundMode;

/// Errors that can occur while reading or writing scene files
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read or write scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed scene data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene data: {0}")]
    InvalidScene(String),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// A value in a figure's `joints` table: either a joint position or a
/// segment target length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JointEntry {
    Position([f32; 2]),
    Length(f32),
}

/// Detached copy of every persisted field of one figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureSnapshot {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
    pub rotation: f32,
    #[serde(default, alias = "head_rotation")]
    pub head_rotation: f32,
    #[serde(with = "hex_color")]
    pub color: Color32,
    #[serde(alias = "outline_width")]
    pub outline_width: f32,
    #[serde(default = "default_limb_width", alias = "limb_width")]
    pub limb_width: f32,
    #[serde(default = "default_corner_radius", alias = "corner_radius")]
    pub corner_radius: f32,
    #[serde(default = "default_neck_gap_y", alias = "neck_gap_y")]
    pub neck_gap_y: f32,
    #[serde(default, alias = "head_offset_y")]
    pub head_offset_y: f32,
    #[serde(default, alias = "global_outline")]
    pub global_outline: bool,
    /// `limb_{i}_mid`, `limb_{i}_end`, `limb_{i}_mid_len`, `limb_{i}_end_len`
    pub joints: BTreeMap<String, JointEntry>,
}

fn default_limb_width() -> f32 {
    DEFAULT_LIMB_WIDTH
}

fn default_corner_radius() -> f32 {
    DEFAULT_CORNER_RADIUS
}

fn default_neck_gap_y() -> f32 {
    DEFAULT_NECK_GAP_Y
}

fn joint_key(limb: LimbId, joint: LimbJoint) -> String {
    match joint {
        LimbJoint::Mid => format!("limb_{}_mid", limb.index()),
        LimbJoint::End => format!("limb_{}_end", limb.index()),
    }
}

fn length_key(limb: LimbId, joint: LimbJoint) -> String {
    format!("{}_len", joint_key(limb, joint))
}

impl FigureSnapshot {
    pub fn capture(figure: &Figure) -> Self {
        let mut joints = BTreeMap::new();
        for (id, limb) in figure.limbs() {
            joints.insert(joint_key(id, LimbJoint::Mid), JointEntry::Position(limb.mid.into()));
            joints.insert(joint_key(id, LimbJoint::End), JointEntry::Position(limb.end.into()));
            joints.insert(length_key(id, LimbJoint::Mid), JointEntry::Length(limb.mid_length));
            joints.insert(length_key(id, LimbJoint::End), JointEntry::Length(limb.end_length));
        }

        Self {
            x: figure.x,
            y: figure.y,
            scale: figure.scale(),
            rotation: figure.rotation,
            head_rotation: figure.head_rotation,
            color: figure.color,
            outline_width: figure.outline_width,
            limb_width: figure.limb_width(),
            corner_radius: figure.corner_radius,
            neck_gap_y: figure.neck_gap_y(),
            head_offset_y: figure.head_offset_y,
            global_outline: figure.global_outline,
            joints,
        }
    }

    /// Builds a figure from this snapshot. Neck and waist are derived from
    /// `neck_gap_y`, limb sockets come from the rest pose.
    pub fn restore(&self) -> PersistenceResult<Figure> {
        let mut figure = Figure::new(self.x, self.y);
        figure
            .set_scale(self.scale)
            .map_err(|e| PersistenceError::InvalidScene(e.to_string()))?;
        figure.rotation = self.rotation;
        figure.head_rotation = self.head_rotation;
        figure.color = self.color;
        figure.outline_width = self.outline_width;
        figure.corner_radius = self.corner_radius;
        figure.set_neck_gap_y(self.neck_gap_y);
        figure.head_offset_y = self.head_offset_y;
        figure.global_outline = self.global_outline;
        figure.set_limb_width(self.limb_width);

        for id in LimbId::ALL {
            let mid = self.position(id, LimbJoint::Mid)?;
            let end = self.position(id, LimbJoint::End)?;
            let mid_length = self.length(id, LimbJoint::Mid)?;
            let end_length = self.length(id, LimbJoint::End)?;

            let limb = figure.limb_mut(id);
            limb.mid = mid.into();
            limb.end = end.into();
            limb.mid_length = mid_length;
            limb.end_length = end_length;
        }

        Ok(figure)
    }

    fn position(&self, limb: LimbId, joint: LimbJoint) -> PersistenceResult<[f32; 2]> {
        let key = joint_key(limb, joint);
        match self.joints.get(&key) {
            Some(JointEntry::Position(pos)) => Ok(*pos),
            Some(JointEntry::Length(_)) => Err(PersistenceError::InvalidScene(format!(
                "joint '{key}' must be an [x, y] pair"
            ))),
            None => Err(PersistenceError::InvalidScene(format!(
                "missing joint '{key}'"
            ))),
        }
    }

    fn length(&self, limb: LimbId, joint: LimbJoint) -> PersistenceResult<f32> {
        let key = length_key(limb, joint);
        match self.joints.get(&key) {
            Some(JointEntry::Length(len)) => Ok(*len),
            Some(JointEntry::Position(_)) => Err(PersistenceError::InvalidScene(format!(
                "segment length '{key}' must be a number"
            ))),
            None => Ok(DEFAULT_SEGMENT_LENGTH),
        }
    }
}

/// On-disk scene: canvas settings plus a figure snapshot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDocument {
    #[serde(default = "default_canvas_width", alias = "canvas_width")]
    pub canvas_width: u32,
    #[serde(default = "default_canvas_height", alias = "canvas_height")]
    pub canvas_height: u32,
    #[serde(default, alias = "background_mode")]
    pub background_mode: BackgroundMode,
    #[serde(alias = "characters")]
    pub figures: Vec<FigureSnapshot>,
}

fn default_canvas_width() -> u32 {
    DEFAULT_CANVAS_WIDTH
}

fn default_canvas_height() -> u32 {
    DEFAULT_CANVAS_HEIGHT
}

impl SceneDocument {
    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        let document: SceneDocument = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Checks the document and restores every figure, failing on the first
    /// invalid one.
    pub fn restore_figures(&self) -> PersistenceResult<Vec<Figure>> {
        self.validate()?;
        self.figures.iter().map(FigureSnapshot::restore).collect()
    }

    fn validate(&self) -> PersistenceResult<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PersistenceError::InvalidScene(format!(
                "canvas size must be positive, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.figures.len() > MAX_FIGURES {
            return Err(PersistenceError::InvalidScene(format!(
                "a scene holds at most {MAX_FIGURES} figures, found {}",
                self.figures.len()
            )));
        }
        Ok(())
    }
}

/// `#rrggbb` strings for [`Color32`].
mod hex_color {
    use egui::Color32;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error> {
        let [r, g, b, _] = color.to_srgba_unmultiplied();
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}"))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color32, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("invalid color '{text}'")))
    }

    pub(super) fn parse(text: &str) -> Option<Color32> {
        let hex = text.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limb::Segment;

    const LEGACY_SCENE: &str = r##"{
        "canvas_width": 640,
        "canvas_height": 480,
        "background_mode": "transparent",
        "characters": [{
            "x": 320, "y": 240, "scale": 1.5, "rotation": 10,
            "color": "#FF8800", "outline_width": 6,
            "joints": {
                "limb_0_mid": [-60, 40], "limb_0_end": [-60, 80],
                "limb_1_mid": [60, 40], "limb_1_end": [60, 80],
                "limb_2_mid": [-20, 70], "limb_2_end": [-20, 115],
                "limb_3_mid": [20, 70], "limb_3_end": [20, 115]
            }
        }]
    }"##;

    #[test]
    fn test_legacy_scene_uses_defaults() {
        let document = SceneDocument::from_json(LEGACY_SCENE).unwrap();
        assert_eq!(document.canvas_width, 640);
        assert_eq!(document.background_mode, BackgroundMode::Transparent);

        let figures = document.restore_figures().unwrap();
        let figure = &figures[0];
        assert_eq!(figure.limb_width(), 28.0);
        assert!(figure.limbs().all(|(_, limb)| limb.width == 28.0));
        assert_eq!(figure.corner_radius, 45.0);
        assert_eq!(figure.neck_gap_y(), 15.0);
        assert_eq!(figure.head_rotation, 0.0);
        assert_eq!(figure.head_offset_y, 0.0);
        assert!(!figure.global_outline);
        assert_eq!(figure.color, Color32::from_rgb(0xFF, 0x88, 0x00));
        assert!(figure
            .limbs()
            .all(|(_, limb)| limb.target_length(Segment::Upper) == 35.0
                && limb.target_length(Segment::Lower) == 35.0));
        assert_eq!(figure.left_arm.mid.x, -60.0);
    }

    #[test]
    fn test_missing_canvas_and_background_defaults() {
        let document = SceneDocument::from_json(r#"{"figures": []}"#).unwrap();
        assert_eq!(document.canvas_width, 800);
        assert_eq!(document.canvas_height, 800);
        assert_eq!(document.background_mode, BackgroundMode::White);
    }

    #[test]
    fn test_missing_joint_is_an_error() {
        let mut snapshot = FigureSnapshot::capture(&Figure::default());
        snapshot.joints.remove("limb_2_end");
        assert!(matches!(
            snapshot.restore(),
            Err(PersistenceError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_neck_is_derived_from_gap() {
        let mut figure = Figure::default();
        figure.set_neck_gap_y(30.0);
        let restored = FigureSnapshot::capture(&figure).restore().unwrap();
        assert_eq!(restored.neck().y, -80.0);
        assert_eq!(restored.waist().y, 10.0);
    }

    #[test]
    fn test_rejects_too_many_figures() {
        let snapshot = FigureSnapshot::capture(&Figure::default());
        let document = SceneDocument {
            canvas_width: 800,
            canvas_height: 800,
            background_mode: BackgroundMode::White,
            figures: vec![snapshot.clone(), snapshot.clone(), snapshot],
        };
        assert!(matches!(
            document.restore_figures(),
            Err(PersistenceError::InvalidScene(_))
        ));
        let json = document.to_json().unwrap();
        assert!(matches!(
            SceneDocument::from_json(&json),
            Err(PersistenceError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_rejects_bad_color_and_scale() {
        let json = LEGACY_SCENE.replace("#FF8800", "orange");
        assert!(matches!(
            SceneDocument::from_json(&json),
            Err(PersistenceError::Json(_))
        ));

        let json = LEGACY_SCENE.replace("\"scale\": 1.5", "\"scale\": 0");
        let document = SceneDocument::from_json(&json).unwrap();
        assert!(document.restore_figures().is_err());
    }

    #[test]
    fn test_written_keys() {
        let document = SceneDocument {
            canvas_width: 800,
            canvas_height: 600,
            background_mode: BackgroundMode::White,
            figures: vec![FigureSnapshot::capture(&Figure::default())],
        };
        let json = document.to_json().unwrap();
        for key in [
            "\"canvasWidth\"",
            "\"backgroundMode\": \"white\"",
            "\"headRotation\"",
            "\"neckGapY\"",
            "\"limb_3_end_len\"",
            "\"#9370db\"",
        ] {
            assert!(json.contains(key), "missing {key} in {json}");
        }
    }

    #[test]
    fn test_hex_color_parse() {
        assert_eq!(hex_color::parse("#9370DB"), Some(Color32::from_rgb(0x93, 0x70, 0xDB)));
        assert_eq!(hex_color::parse("9370DB"), None);
        assert_eq!(hex_color::parse("#93"), None);
    }
}
