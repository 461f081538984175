use serde::{Deserialize, Serialize};

use crate::core::config::STRAIGHT_LINE_TURNING_RADIUS;
use crate::geometry::rotate;
use crate::util::linalg::Vector2;

/// A vehicle pose: position in world coordinates plus heading in radians,
/// measured counterclockwise from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Odometry {
    pub translation: Vector2,
    pub rotation: f64,
}

impl Odometry {
    pub fn new(translation: Vector2, rotation: f64) -> Self {
        Self {
            translation,
            rotation,
        }
    }
}

/// Advances a pose by one tick of the single-track kinematic model.
///
/// The front axle steers, the rear axle is fixed, and the vehicle's
/// reference point sits on the rear axle. With a steering angle held over
/// the tick, the reference point traces an arc of radius
/// `wheel_base / sin(steering_angle)`; the arc's chord is computed in
/// vehicle coordinates, rotated into world coordinates by the pose's
/// heading before the tick, and added to the position.
///
/// A steering angle of exactly zero stands for driving straight ahead. The
/// turning radius is substituted with [`STRAIGHT_LINE_TURNING_RADIUS`],
/// which keeps every intermediate value finite and collapses the arc to a
/// straight step of length `speed * time_elapsed`.
///
/// Pure function of its inputs; the caller owns speed and steering state.
#[must_use]
pub fn next_odometry(
    last: &Odometry,
    time_elapsed: f64,
    speed: f64,
    wheel_base: f64,
    steering_angle: f64,
) -> Odometry {
    let turning_radius = if steering_angle == 0.0 {
        STRAIGHT_LINE_TURNING_RADIUS
    } else {
        wheel_base / steering_angle.sin()
    };
    let delta_heading = speed * time_elapsed / turning_radius;
    let delta_in_vehicle_frame = Vector2 {
        x: turning_radius * (1.0 - delta_heading.cos()),
        y: turning_radius * delta_heading.sin(),
    };
    let delta = rotate(last.rotation).apply(&delta_in_vehicle_frame);
    Odometry {
        translation: last.translation + delta,
        rotation: last.rotation + delta_heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ApproxEq;
    use std::f64::consts::{FRAC_PI_2, PI};

    // ==================== Straight-line motion ====================

    #[test]
    fn zero_steering_drives_straight() {
        let start = Odometry::default();
        let next = next_odometry(&start, 2.0, 0.5, 0.2, 0.0);
        assert!(next.translation.x.is_finite());
        assert!(next.translation.y.is_finite());
        assert!(next.translation.approx_eq(&Vector2::new(0.0, 1.0), 1e-10));
        assert!(next.rotation.approx_eq(&0.0, 1e-10));
    }

    #[test]
    fn zero_steering_respects_heading() {
        let start = Odometry::new(Vector2::zero(), FRAC_PI_2);
        let next = next_odometry(&start, 1.0, 1.0, 0.2, 0.0);
        // Forward in vehicle space is +y; a quarter-turn heading sends the
        // step along world -x.
        assert!(next.translation.approx_eq(&Vector2::new(-1.0, 0.0), 1e-10));
    }

    #[test]
    fn zero_speed_is_a_fixed_point() {
        let start = Odometry::new(Vector2::new(3.0, 4.0), 1.0);
        let next = next_odometry(&start, 10.0, 0.0, 0.2, 0.3);
        assert_eq!(next, start);
    }

    // ==================== Arc motion ====================

    #[test]
    fn unit_arc_matches_closed_form() {
        // wheel_base 1 and steering pi/2 give a turning radius of exactly 1,
        // so one second at unit speed sweeps one radian.
        let start = Odometry::default();
        let next = next_odometry(&start, 1.0, 1.0, 1.0, FRAC_PI_2);
        assert!(next
            .translation
            .approx_eq(&Vector2::new(1.0 - 1.0_f64.cos(), 1.0_f64.sin()), 1e-10));
        assert!(next.rotation.approx_eq(&1.0, 1e-10));
    }

    #[test]
    fn opposite_steering_mirrors_the_arc() {
        let start = Odometry::default();
        let left = next_odometry(&start, 1.0, 1.0, 1.0, FRAC_PI_2);
        let right = next_odometry(&start, 1.0, 1.0, 1.0, -FRAC_PI_2);
        assert!(right
            .translation
            .approx_eq(&Vector2::new(-left.translation.x, left.translation.y), 1e-10));
        assert!(right.rotation.approx_eq(&-left.rotation, 1e-10));
    }

    #[test]
    fn many_small_steps_approach_one_large_step() {
        // The model is exact for a constant steering angle, so subdividing
        // the tick must land on the same pose up to rounding.
        let start = Odometry::new(Vector2::new(0.5, -0.5), PI / 6.0);
        let coarse = next_odometry(&start, 1.0, 0.4, 0.2, 0.3);
        let mut fine = start;
        for _ in 0..1000 {
            fine = next_odometry(&fine, 1.0 / 1000.0, 0.4, 0.2, 0.3);
        }
        assert!(fine.translation.approx_eq(&coarse.translation, 1e-9));
        assert!(fine.rotation.approx_eq(&coarse.rotation, 1e-9));
    }
}
