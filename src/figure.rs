use egui::{Color32, Pos2, Rect, pos2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::*;
use crate::error::{EditorError, EditorResult};
use crate::geometry::PoseTransform;
use crate::joint::Joint;
use crate::limb::{JointRef, Limb, LimbId, Segment, SegmentEditResult};

/// Stable handle to a figure in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FigureId(Uuid);

impl FigureId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FigureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FigureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single editable property of a figure, with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FigureField {
    Position(Pos2),
    Scale(f32),
    Rotation(f32),
    HeadRotation(f32),
    Color(Color32),
    OutlineWidth(f32),
    LimbWidth(f32),
    CornerRadius(f32),
    NeckGapY(f32),
    HeadOffsetY(f32),
    GlobalOutline(bool),
}

/// One posable character: a head/body skeleton with four limbs, placed in
/// the world by position, rotation and scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    id: FigureId,
    pub x: f32,
    pub y: f32,
    scale: f32,
    /// Degrees, values outside [0, 360) wrap visually
    pub rotation: f32,
    pub head_rotation: f32,
    pub color: Color32,
    pub outline_width: f32,
    limb_width: f32,
    pub corner_radius: f32,
    neck_gap_y: f32,
    pub head_offset_y: f32,
    pub global_outline: bool,
    neck: Joint,
    waist: Joint,
    pub left_arm: Limb,
    pub right_arm: Limb,
    pub left_leg: Limb,
    pub right_leg: Limb,
    pub selected_joint: Option<JointRef>,
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(DEFAULT_FIGURE_X, DEFAULT_FIGURE_Y)
    }
}

impl Figure {
    /// Creates a figure in its rest pose at unit scale.
    pub fn new(x: f32, y: f32) -> Self {
        let limb_width = DEFAULT_LIMB_WIDTH;
        let neck_gap_y = DEFAULT_NECK_GAP_Y;
        // Floor division leaves the shoulders one unit off centre
        let shoulder_x = (BODY_WIDTH / 2.0).floor();
        let left_shoulder_x = (-BODY_WIDTH / 2.0).floor();
        let hip_y = BODY_HEIGHT - HEAD_RADIUS - neck_gap_y;

        let arm = |shoulder_x: f32, outward: f32| {
            let elbow_x = shoulder_x + outward * ARM_SEGMENT_LENGTH;
            Limb::new(
                Joint::new(shoulder_x, 5.0),
                Joint::new(elbow_x, 40.0),
                Joint::new(elbow_x, 40.0 + ARM_SEGMENT_LENGTH),
                ARM_SEGMENT_LENGTH,
                ARM_SEGMENT_LENGTH,
                limb_width,
            )
        };
        let leg = |hip_x: f32| {
            Limb::new(
                Joint::new(hip_x, hip_y),
                Joint::new(hip_x, hip_y + LEG_SEGMENT_LENGTH),
                Joint::new(hip_x, hip_y + 2.0 * LEG_SEGMENT_LENGTH),
                LEG_SEGMENT_LENGTH,
                LEG_SEGMENT_LENGTH,
                limb_width,
            )
        };

        Self {
            id: FigureId::new(),
            x,
            y,
            scale: 1.0,
            rotation: 0.0,
            head_rotation: 0.0,
            color: DEFAULT_COLOR,
            outline_width: DEFAULT_OUTLINE_WIDTH,
            limb_width,
            corner_radius: DEFAULT_CORNER_RADIUS,
            neck_gap_y,
            head_offset_y: DEFAULT_HEAD_OFFSET_Y,
            global_outline: false,
            neck: Joint::new(0.0, neck_y(neck_gap_y)),
            waist: Joint::new(0.0, waist_y(neck_gap_y)),
            left_arm: arm(left_shoulder_x, -1.0),
            right_arm: arm(shoulder_x, 1.0),
            left_leg: leg(-20.0),
            right_leg: leg(20.0),
            selected_joint: None,
        }
    }

    pub fn id(&self) -> FigureId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: FigureId) {
        self.id = id;
    }

    pub fn position(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn limb_width(&self) -> f32 {
        self.limb_width
    }

    pub fn neck_gap_y(&self) -> f32 {
        self.neck_gap_y
    }

    pub fn neck(&self) -> Joint {
        self.neck
    }

    pub fn waist(&self) -> Joint {
        self.waist
    }

    pub fn head_radius(&self) -> f32 {
        HEAD_RADIUS
    }

    pub fn body_height(&self) -> f32 {
        BODY_HEIGHT
    }

    pub fn body_width(&self) -> f32 {
        BODY_WIDTH
    }

    pub fn limb(&self, limb: LimbId) -> &Limb {
        match limb {
            LimbId::LeftArm => &self.left_arm,
            LimbId::RightArm => &self.right_arm,
            LimbId::LeftLeg => &self.left_leg,
            LimbId::RightLeg => &self.right_leg,
        }
    }

    pub fn limb_mut(&mut self, limb: LimbId) -> &mut Limb {
        match limb {
            LimbId::LeftArm => &mut self.left_arm,
            LimbId::RightArm => &mut self.right_arm,
            LimbId::LeftLeg => &mut self.left_leg,
            LimbId::RightLeg => &mut self.right_leg,
        }
    }

    /// Limbs in persisted order (left arm, right arm, left leg, right leg)
    pub fn limbs(&self) -> impl Iterator<Item = (LimbId, &Limb)> {
        LimbId::ALL.into_iter().map(move |id| (id, self.limb(id)))
    }

    pub fn joint(&self, joint: JointRef) -> Joint {
        self.limb(joint.limb).joint(joint.joint)
    }

    pub fn transform(&self) -> PoseTransform {
        PoseTransform::new(self.position().to_vec2(), self.rotation, self.scale)
    }

    /// Maps a local joint to world space.
    pub fn to_world(&self, joint: Joint) -> Pos2 {
        self.transform().apply(joint.into())
    }

    /// Maps a world position back into this figure's local space.
    pub fn from_world(&self, world: Pos2) -> Joint {
        self.transform().invert(world).into()
    }

    /// Writes a world position into a draggable joint. Target lengths are
    /// left untouched.
    pub fn set_joint_from_world(&mut self, joint: JointRef, world: Pos2) {
        let local = self.from_world(world);
        *self.limb_mut(joint.limb).joint_mut(joint.joint) = local;
    }

    pub fn set_scale(&mut self, scale: f32) -> EditorResult<()> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(EditorError::Validation(format!(
                "scale must be a positive number, got {scale}"
            )));
        }
        self.scale = scale;
        Ok(())
    }

    /// Sets the limb width on the figure and all four limbs.
    pub fn set_limb_width(&mut self, width: f32) {
        self.limb_width = width;
        for id in LimbId::ALL {
            self.limb_mut(id).width = width;
        }
    }

    /// Sets the head/body gap and re-derives the neck and waist joints.
    pub fn set_neck_gap_y(&mut self, gap: f32) {
        self.neck_gap_y = gap;
        self.neck.y = neck_y(gap);
        self.waist.y = waist_y(gap);
    }

    /// Applies one field edit. Non-finite numbers are rejected so every
    /// state stays serialisable, and colours are stored opaque.
    pub fn set_field(&mut self, field: FigureField) -> EditorResult<()> {
        match field {
            FigureField::Position(pos) => {
                self.x = finite("x", pos.x)?;
                self.y = finite("y", pos.y)?;
            }
            FigureField::Scale(scale) => self.set_scale(scale)?,
            FigureField::Rotation(degrees) => self.rotation = finite("rotation", degrees)?,
            FigureField::HeadRotation(degrees) => {
                self.head_rotation = finite("head rotation", degrees)?;
            }
            FigureField::Color(color) => {
                let [r, g, b, _] = color.to_srgba_unmultiplied();
                self.color = Color32::from_rgb(r, g, b);
            }
            FigureField::OutlineWidth(width) => {
                self.outline_width = finite("outline width", width)?;
            }
            FigureField::LimbWidth(width) => self.set_limb_width(finite("limb width", width)?),
            FigureField::CornerRadius(radius) => {
                self.corner_radius = finite("corner radius", radius)?;
            }
            FigureField::NeckGapY(gap) => self.set_neck_gap_y(finite("neck gap", gap)?),
            FigureField::HeadOffsetY(offset) => {
                self.head_offset_y = finite("head offset", offset)?;
            }
            FigureField::GlobalOutline(enabled) => self.global_outline = enabled,
        }
        Ok(())
    }

    /// Rejects negative or non-finite lengths, which would flip or break the
    /// segment direction.
    pub fn set_limb_segment_length(
        &mut self,
        limb: LimbId,
        segment: Segment,
        length: f32,
    ) -> EditorResult<SegmentEditResult> {
        if !length.is_finite() || length < 0.0 {
            return Err(EditorError::Validation(format!(
                "segment length must be a non-negative number, got {length}"
            )));
        }
        Ok(self.limb_mut(limb).set_segment_length(segment, length))
    }

    /// World-space body rectangle. The body is drawn axis aligned, only the
    /// limbs follow `rotation`.
    pub fn body_rect(&self) -> Rect {
        let half_width = (BODY_WIDTH * self.scale / 2.0).floor();
        Rect::from_min_max(
            pos2(
                self.x - half_width,
                self.y + self.neck.y * self.scale - 5.0 * self.scale,
            ),
            pos2(
                self.x + half_width,
                self.y + self.waist.y * self.scale + 15.0 * self.scale,
            ),
        )
    }

    pub fn body_corner_radius(&self) -> f32 {
        self.corner_radius * self.scale / 10.0
    }

    /// World-space centre of the head, which stays axis aligned.
    pub fn head_center(&self) -> Pos2 {
        Pos2::new(
            self.x,
            self.y + (self.neck.y + self.head_offset_y) * self.scale,
        )
    }
}

fn neck_y(neck_gap_y: f32) -> f32 {
    -HEAD_RADIUS - neck_gap_y
}

fn waist_y(neck_gap_y: f32) -> f32 {
    BODY_HEIGHT - HEAD_RADIUS - neck_gap_y
}

fn finite(name: &str, value: f32) -> EditorResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EditorError::Validation(format!("{name} must be a finite number, got {value}")))
    }
}
