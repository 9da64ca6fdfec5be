use serde::{Deserialize, Serialize};

use crate::joint::Joint;

/// The four limbs of a figure, in their fixed persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbId {
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl LimbId {
    pub const ALL: [LimbId; 4] = [
        LimbId::LeftArm,
        LimbId::RightArm,
        LimbId::LeftLeg,
        LimbId::RightLeg,
    ];

    /// Index used by the scene file (`limb_{index}_mid`, ...)
    pub fn index(self) -> usize {
        match self {
            LimbId::LeftArm => 0,
            LimbId::RightArm => 1,
            LimbId::LeftLeg => 2,
            LimbId::RightLeg => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LimbId::LeftArm => "Left arm",
            LimbId::RightArm => "Right arm",
            LimbId::LeftLeg => "Left leg",
            LimbId::RightLeg => "Right leg",
        }
    }
}

/// The two user-draggable joints of a limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LimbJoint {
    Mid,
    End,
}

impl LimbJoint {
    pub const ALL: [LimbJoint; 2] = [LimbJoint::Mid, LimbJoint::End];
}

/// Identifies one draggable joint of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JointRef {
    pub limb: LimbId,
    pub joint: LimbJoint,
}

impl JointRef {
    pub fn new(limb: LimbId, joint: LimbJoint) -> Self {
        Self { limb, joint }
    }
}

/// A sub-segment of a limb: `Upper` is start–mid, `Lower` is mid–end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    Upper,
    Lower,
}

impl Segment {
    pub const ALL: [Segment; 2] = [Segment::Upper, Segment::Lower];

    pub fn label(self) -> &'static str {
        match self {
            Segment::Upper => "upper",
            Segment::Lower => "lower",
        }
    }
}

/// Outcome of a segment length edit.
///
/// The target length is always recorded; `geometry_applied` is false when the
/// segment had zero length and its direction was undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentEditResult {
    pub target_length_set: bool,
    pub geometry_applied: bool,
}

/// A two-segment appendage: `start` is the socket on the body, `mid` and
/// `end` are the draggable joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limb {
    pub start: Joint,
    pub mid: Joint,
    pub end: Joint,
    /// Intended rest length of start–mid
    pub mid_length: f32,
    /// Intended rest length of mid–end
    pub end_length: f32,
    pub width: f32,
}

impl Limb {
    pub fn new(
        start: Joint,
        mid: Joint,
        end: Joint,
        mid_length: f32,
        end_length: f32,
        width: f32,
    ) -> Self {
        Self {
            start,
            mid,
            end,
            mid_length,
            end_length,
            width,
        }
    }

    pub fn joint(&self, joint: LimbJoint) -> Joint {
        match joint {
            LimbJoint::Mid => self.mid,
            LimbJoint::End => self.end,
        }
    }

    pub fn joint_mut(&mut self, joint: LimbJoint) -> &mut Joint {
        match joint {
            LimbJoint::Mid => &mut self.mid,
            LimbJoint::End => &mut self.end,
        }
    }

    pub fn target_length(&self, segment: Segment) -> f32 {
        match segment {
            Segment::Upper => self.mid_length,
            Segment::Lower => self.end_length,
        }
    }

    /// Actual Euclidean length of a sub-segment, which drags may have moved
    /// away from its target length.
    pub fn actual_length(&self, segment: Segment) -> f32 {
        match segment {
            Segment::Upper => self.start.distance(self.mid),
            Segment::Lower => self.mid.distance(self.end),
        }
    }

    /// Resizes one sub-segment to `new_length` while keeping its direction.
    ///
    /// Only the far joint of the segment moves. Editing `Upper` moves `mid`
    /// without repositioning `end`, so the lower segment's actual length and
    /// direction change as a side effect; the two target lengths are
    /// independent.
    pub fn set_segment_length(&mut self, segment: Segment, new_length: f32) -> SegmentEditResult {
        let (near, far) = match segment {
            Segment::Upper => {
                self.mid_length = new_length;
                (self.start, &mut self.mid)
            }
            Segment::Lower => {
                self.end_length = new_length;
                (self.mid, &mut self.end)
            }
        };

        let direction = near.vector_to(*far);
        let current_len = direction.length();
        let geometry_applied = current_len > 0.0;
        if geometry_applied {
            *far = near.offset(direction * (new_length / current_len));
        }

        SegmentEditResult {
            target_length_set: true,
            geometry_applied,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_limb() -> Limb {
        Limb::new(
            Joint::new(0.0, 0.0),
            Joint::new(3.0, 4.0),
            Joint::new(3.0, 14.0),
            5.0,
            10.0,
            28.0,
        )
    }

    #[test]
    fn test_upper_length_keeps_direction() {
        let mut limb = test_limb();
        let before = limb.start.vector_to(limb.mid).normalized();

        let result = limb.set_segment_length(Segment::Upper, 20.0);

        assert!(result.geometry_applied);
        assert!((limb.actual_length(Segment::Upper) - 20.0).abs() < 0.001);
        let after = limb.start.vector_to(limb.mid).normalized();
        assert!((after - before).length() < 0.001);
        assert_eq!(limb.mid_length, 20.0);
    }

    #[test]
    fn test_upper_edit_leaves_end_in_place() {
        let mut limb = test_limb();
        let end = limb.end;

        limb.set_segment_length(Segment::Upper, 10.0);

        assert_eq!(limb.end, end);
        assert_eq!(limb.end_length, 10.0);
        // The lower segment now starts from the moved mid joint
        assert!((limb.actual_length(Segment::Lower) - limb.mid.distance(end)).abs() < 0.001);
        assert!((limb.actual_length(Segment::Lower) - 10.0).abs() > 0.001);
    }

    #[test]
    fn test_lower_length() {
        let mut limb = test_limb();
        let mid = limb.mid;

        let result = limb.set_segment_length(Segment::Lower, 2.5);

        assert!(result.geometry_applied);
        assert_eq!(limb.mid, mid);
        assert!((limb.end.x - 3.0).abs() < 0.001);
        assert!((limb.end.y - 6.5).abs() < 0.001);
        assert_eq!(limb.end_length, 2.5);
    }

    #[test]
    fn test_degenerate_segment_is_noop() {
        let mut limb = test_limb();
        limb.mid = limb.start;

        let result = limb.set_segment_length(Segment::Upper, 40.0);

        assert_eq!(
            result,
            SegmentEditResult {
                target_length_set: true,
                geometry_applied: false
            }
        );
        assert_eq!(limb.mid, limb.start);
        assert_eq!(limb.mid_length, 40.0);
    }

    #[test]
    fn test_limb_indices_follow_file_order() {
        let indices: Vec<usize> = LimbId::ALL.iter().map(|l| l.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }
}
