use serde::{Deserialize, Serialize};

use crate::geometry::shapes::{Line, Rect, Style};
use crate::geometry::{rotate, translate};
use crate::scene::{Component, SceneError};
use crate::util::colour::Colour;
use crate::util::linalg::Vector2;

/// Name of the robot's root component inside a scene tree.
pub const ROBOT: &str = "robot";

const CENTER_ROD: &str = "center_rod";
const FRONT_AXLE_LINKAGE: &str = "front_axle_linkage";
const BACK_AXLE_LINKAGE: &str = "back_axle_linkage";
const AXLE: &str = "axle";
const LEFT_WHEEL: &str = "left_wheel";
const RIGHT_WHEEL: &str = "right_wheel";
const WHEEL: &str = "wheel";

/// Physical dimensions of the robot, in simulation units (metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RobotMeasurements {
    /// Distance between the front and back axles.
    pub wheel_base: f64,
    /// Distance between the left and right wheel centres on one axle.
    pub track_width: f64,
    pub wheel_width: f64,
    pub wheel_diameter: f64,
}

impl Default for RobotMeasurements {
    fn default() -> Self {
        Self {
            wheel_base: 0.2,
            track_width: 0.2,
            wheel_width: 0.03,
            wheel_diameter: 0.06,
        }
    }
}

/// Builds the robot's scene subtree.
///
/// The robot's local origin is the centre of the back axle, with forward
/// along +y. A centre rod runs from the back axle to the front axle, and
/// each axle is its own component carrying a wheel at either end, so that
/// steering only ever touches the front axle's wheel transforms.
pub fn build(measurements: &RobotMeasurements) -> Component {
    try_build(measurements).expect("robot rig part names are distinct")
}

fn try_build(measurements: &RobotMeasurements) -> Result<Component, SceneError> {
    let mut robot = Component::new(ROBOT);
    robot.add_shape(
        CENTER_ROD,
        Line::new(Vector2::zero(), Vector2::new(0.0, measurements.wheel_base)),
    )?;

    let mut front_axle = axle_linkage(measurements)?;
    front_axle.set_transform(translate(0.0, measurements.wheel_base));
    robot.add_child(FRONT_AXLE_LINKAGE, front_axle)?;
    robot.add_child(BACK_AXLE_LINKAGE, axle_linkage(measurements)?)?;
    Ok(robot)
}

fn axle_linkage(measurements: &RobotMeasurements) -> Result<Component, SceneError> {
    let half_track = measurements.track_width / 2.0;
    let mut linkage = Component::new(AXLE);
    linkage.add_shape(
        AXLE,
        Line::new(Vector2::new(-half_track, 0.0), Vector2::new(half_track, 0.0)),
    )?;

    let mut left = wheel(measurements)?;
    left.set_transform(translate(-half_track, 0.0));
    linkage.add_child(LEFT_WHEEL, left)?;

    let mut right = wheel(measurements)?;
    right.set_transform(translate(half_track, 0.0));
    linkage.add_child(RIGHT_WHEEL, right)?;
    Ok(linkage)
}

fn wheel(measurements: &RobotMeasurements) -> Result<Component, SceneError> {
    let mut wheel = Component::new(WHEEL);
    wheel.add_shape(
        WHEEL,
        Rect::centred(measurements.wheel_width, measurements.wheel_diameter)
            .with_style(Style::default().with_fill(Colour::grey())),
    )?;
    Ok(wheel)
}

/// Places the robot at a world pose: rotated to `heading`, then moved to
/// `translation`. Replaces any previous pose outright.
pub fn set_pose(robot: &mut Component, translation: Vector2, heading: f64) {
    robot.set_transform(rotate(heading).translated_vec(translation));
}

/// Points the front wheels at `steering_angle` radians off straight ahead,
/// rotating each about its own centre at the axle end.
pub fn set_steering_angle(
    robot: &mut Component,
    measurements: &RobotMeasurements,
    steering_angle: f64,
) -> Result<(), SceneError> {
    let robot_name = robot.name().to_string();
    let front_axle =
        robot
            .child_mut(FRONT_AXLE_LINKAGE)
            .ok_or_else(|| SceneError::UnknownChild {
                component: robot_name,
                name: FRONT_AXLE_LINKAGE.to_string(),
            })?;
    let front_axle_name = front_axle.name().to_string();
    let half_track = measurements.track_width / 2.0;
    for (name, offset) in [(LEFT_WHEEL, -half_track), (RIGHT_WHEEL, half_track)] {
        let wheel = front_axle
            .child_mut(name)
            .ok_or_else(|| SceneError::UnknownChild {
                component: front_axle_name.clone(),
                name: name.to_string(),
            })?;
        wheel.set_transform(rotate(steering_angle).translated(offset, 0.0));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ApproxEq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn measurements() -> RobotMeasurements {
        RobotMeasurements::default()
    }

    // ==================== Rig structure ====================

    #[test]
    fn rig_has_rod_axles_and_wheels() {
        let robot = build(&measurements());
        assert!(robot.shape(CENTER_ROD).is_some());
        for axle in [FRONT_AXLE_LINKAGE, BACK_AXLE_LINKAGE] {
            let linkage = robot.child(axle).unwrap();
            assert!(linkage.shape(AXLE).is_some());
            assert!(linkage.child(LEFT_WHEEL).is_some());
            assert!(linkage.child(RIGHT_WHEEL).is_some());
        }
    }

    #[test]
    fn front_axle_sits_a_wheel_base_ahead() {
        let robot = build(&measurements());
        let front = robot.child(FRONT_AXLE_LINKAGE).unwrap();
        assert_eq!(
            front.transform().apply(&Vector2::zero()),
            Vector2::new(0.0, 0.2)
        );
        let back = robot.child(BACK_AXLE_LINKAGE).unwrap();
        assert_eq!(back.transform().apply(&Vector2::zero()), Vector2::zero());
    }

    #[test]
    fn wheels_sit_at_the_axle_ends() {
        let robot = build(&measurements());
        let front = robot.child(FRONT_AXLE_LINKAGE).unwrap();
        let left = front.child(LEFT_WHEEL).unwrap();
        let right = front.child(RIGHT_WHEEL).unwrap();
        assert_eq!(
            left.transform().apply(&Vector2::zero()),
            Vector2::new(-0.1, 0.0)
        );
        assert_eq!(
            right.transform().apply(&Vector2::zero()),
            Vector2::new(0.1, 0.0)
        );
    }

    // ==================== Pose ====================

    #[test]
    fn set_pose_rotates_before_translating() {
        let mut robot = build(&measurements());
        set_pose(&mut robot, Vector2::new(1.0, 2.0), FRAC_PI_2);
        // Local forward (0, 1) swings to (-1, 0) before the offset applies.
        assert!(robot
            .transform()
            .apply(&Vector2::new(0.0, 1.0))
            .approx_eq(&Vector2::new(0.0, 2.0), 1e-10));
        assert_eq!(
            robot.transform().apply(&Vector2::zero()),
            Vector2::new(1.0, 2.0)
        );
    }

    #[test]
    fn set_pose_replaces_the_previous_pose() {
        let mut robot = build(&measurements());
        set_pose(&mut robot, Vector2::new(5.0, 5.0), 1.0);
        set_pose(&mut robot, Vector2::zero(), 0.0);
        assert_eq!(robot.transform().apply(&Vector2::zero()), Vector2::zero());
    }

    // ==================== Steering ====================

    #[test]
    fn steering_turns_front_wheels_in_place() {
        let m = measurements();
        let mut robot = build(&m);
        set_steering_angle(&mut robot, &m, FRAC_PI_4).unwrap();

        let front = robot.child(FRONT_AXLE_LINKAGE).unwrap();
        let left = front.child(LEFT_WHEEL).unwrap();
        // Wheel centre stays pinned to the axle end.
        assert!(left
            .transform()
            .apply(&Vector2::zero())
            .approx_eq(&Vector2::new(-0.1, 0.0), 1e-10));
        // A point forward of the wheel centre swings by the steering angle.
        let tip = left.transform().apply(&Vector2::new(0.0, 0.03));
        let expected = Vector2::new(-0.1, 0.0)
            + Vector2::new(-0.03 * FRAC_PI_4.sin(), 0.03 * FRAC_PI_4.cos());
        assert!(tip.approx_eq(&expected, 1e-10));
    }

    #[test]
    fn steering_leaves_back_wheels_alone() {
        let m = measurements();
        let mut robot = build(&m);
        let before = robot
            .child(BACK_AXLE_LINKAGE)
            .unwrap()
            .child(LEFT_WHEEL)
            .unwrap()
            .transform()
            .clone();
        set_steering_angle(&mut robot, &m, FRAC_PI_4).unwrap();
        let after = robot
            .child(BACK_AXLE_LINKAGE)
            .unwrap()
            .child(LEFT_WHEEL)
            .unwrap()
            .transform()
            .clone();
        assert_eq!(before, after);
    }

    #[test]
    fn steering_a_bare_component_fails() {
        let m = measurements();
        let mut not_a_robot = Component::new("crate");
        assert_eq!(
            set_steering_angle(&mut not_a_robot, &m, 0.1).unwrap_err(),
            SceneError::UnknownChild {
                component: "crate".to_string(),
                name: FRONT_AXLE_LINKAGE.to_string()
            }
        );
    }
}
