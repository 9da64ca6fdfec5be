use egui::Pos2;

use crate::constants::{FIGURE_PICK_RADIUS, JOINT_PICK_RADIUS};
use crate::figure::{Figure, FigureId};
use crate::limb::{JointRef, LimbJoint};

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub figure: FigureId,
    /// Joint to drag, or `None` to move the whole figure
    pub joint: Option<JointRef>,
}

/// Finds what lies under `pos` (world space).
///
/// Draggable joints of every figure are tested first, then figure centres.
/// Within a tier the first match in figure, limb, joint order wins, even if
/// a later candidate is closer.
pub fn pick(figures: &[Figure], pos: Pos2) -> Option<Pick> {
    for figure in figures {
        for (limb_id, limb) in figure.limbs() {
            for joint in LimbJoint::ALL {
                let world = figure.to_world(limb.joint(joint));
                if pos.distance(world) < JOINT_PICK_RADIUS {
                    return Some(Pick {
                        figure: figure.id(),
                        joint: Some(JointRef::new(limb_id, joint)),
                    });
                }
            }
        }
    }

    figures
        .iter()
        .find(|figure| pos.distance(figure.position()) < FIGURE_PICK_RADIUS * figure.scale())
        .map(|figure| Pick {
            figure: figure.id(),
            joint: None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limb::LimbId;

    #[test]
    fn test_pick_joint() {
        let figure = Figure::default();
        let elbow = figure.to_world(figure.left_arm.mid);

        let hit = pick(std::slice::from_ref(&figure), elbow + egui::vec2(5.0, 5.0)).unwrap();

        assert_eq!(hit.figure, figure.id());
        assert_eq!(hit.joint, Some(JointRef::new(LimbId::LeftArm, LimbJoint::Mid)));
    }

    #[test]
    fn test_joint_wins_over_body() {
        let figure = Figure::default();
        // The knee lies inside the body pick radius as well
        let knee = figure.to_world(figure.left_leg.mid);
        assert!(knee.distance(figure.position()) < FIGURE_PICK_RADIUS);

        let hit = pick(std::slice::from_ref(&figure), knee).unwrap();
        assert_eq!(hit.joint, Some(JointRef::new(LimbId::LeftLeg, LimbJoint::Mid)));
    }

    #[test]
    fn test_pick_body() {
        let figure = Figure::default();
        let hit = pick(std::slice::from_ref(&figure), Pos2::new(400.0, 260.0)).unwrap();
        assert_eq!(hit, Pick { figure: figure.id(), joint: None });
    }

    #[test]
    fn test_body_radius_follows_scale() {
        let mut figure = Figure::default();
        let probe = Pos2::new(400.0, 300.0 - 150.0);
        assert!(pick(std::slice::from_ref(&figure), probe).is_none());

        figure.set_scale(2.0).unwrap();
        assert!(pick(std::slice::from_ref(&figure), probe).is_some());
    }

    #[test]
    fn test_miss() {
        let figure = Figure::default();
        assert!(pick(std::slice::from_ref(&figure), Pos2::new(0.0, 0.0)).is_none());
        assert!(pick(&[], Pos2::new(400.0, 300.0)).is_none());
    }

    #[test]
    fn test_first_match_wins_over_closest() {
        let first = Figure::new(400.0, 300.0);
        let second = Figure::new(410.0, 300.0);
        // Exactly on the second figure's elbow, but still within range of the first's
        let elbow = second.to_world(second.left_arm.mid);

        let hit = pick(&[first.clone(), second], elbow).unwrap();

        assert_eq!(hit.figure, first.id());
        assert_eq!(hit.joint, Some(JointRef::new(LimbId::LeftArm, LimbJoint::Mid)));
    }
}
