pub mod odometry;
pub mod robot;

use std::f64::consts::{FRAC_PI_4, PI};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::shapes::Shape;
use crate::geometry::AffineTransform;
use crate::scene::Component;
use crate::sim::odometry::{next_odometry, Odometry};
use crate::sim::robot::RobotMeasurements;
use crate::util::linalg::Vector2;

/// A control input or time step outside its permitted range.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoundsError {
    #[error("{quantity} {value} is below the lower bound {bound}")]
    BelowLowerBound {
        quantity: &'static str,
        value: f64,
        bound: f64,
    },
    #[error("{quantity} {value} is above the upper bound {bound}")]
    AboveUpperBound {
        quantity: &'static str,
        value: f64,
        bound: f64,
    },
}

fn check_bounds(
    quantity: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, BoundsError> {
    if value < min {
        Err(BoundsError::BelowLowerBound {
            quantity,
            value,
            bound: min,
        })
    } else if value > max {
        Err(BoundsError::AboveUpperBound {
            quantity,
            value,
            bound: max,
        })
    } else {
        Ok(value)
    }
}

/// Tuning limits and defaults for a [`Simulation`].
///
/// Speeds are in simulation units per second, angles in radians, turning
/// speed in radians of steering change per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub min_speed: f64,
    pub max_speed: f64,
    pub default_speed: f64,
    pub min_steering_angle: f64,
    pub max_steering_angle: f64,
    pub min_turning_speed: f64,
    pub max_turning_speed: f64,
    pub default_turning_speed: f64,
    pub robot_measurements: RobotMeasurements,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        let turning_speed = 60.0_f64.to_radians();
        Self {
            min_speed: -0.4,
            max_speed: 0.4,
            default_speed: 0.4,
            min_steering_angle: -FRAC_PI_4,
            max_steering_angle: FRAC_PI_4,
            min_turning_speed: -turning_speed,
            max_turning_speed: turning_speed,
            default_turning_speed: turning_speed,
            robot_measurements: RobotMeasurements::default(),
        }
    }
}

/// The steerable-robot simulation: control state, kinematic integration and
/// the scene tree rendered from it.
///
/// Control methods set speed and steering rate.
/// [`move_forward_in_time()`](Simulation::move_forward_in_time) advances
/// the clock by a caller-chosen step, ramps the steering angle at the
/// current turning speed, integrates the pose, and re-poses the robot
/// subtree so that
/// [`shapes_in_world_coordinates()`](Simulation::shapes_in_world_coordinates)
/// always reflects the latest state.
///
/// # Examples
///
/// ```
/// use roversim::sim::Simulation;
///
/// let mut sim = Simulation::new();
/// sim.start_moving_forward(None).unwrap();
/// sim.move_forward_in_time(0.1).unwrap();
/// assert!(sim.odometry().translation.len() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    root: Component,
    parameters: SimulationParameters,
    speed: f64,
    steering_angle: f64,
    turning_speed: f64,
    odometry: Odometry,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::with_parameters(SimulationParameters::default())
    }

    pub fn with_parameters(parameters: SimulationParameters) -> Self {
        let mut root = Component::root();
        root.add_child(robot::ROBOT, robot::build(&parameters.robot_measurements))
            .expect("fresh root has no children yet");
        let mut sim = Self {
            root,
            parameters,
            speed: 0.0,
            steering_angle: 0.0,
            turning_speed: 0.0,
            // The robot starts facing the world's -y direction.
            odometry: Odometry::new(Vector2::zero(), PI),
        };
        sim.sync_rig();
        sim
    }

    // ==================== Accessors ====================

    pub fn parameters(&self) -> &SimulationParameters {
        &self.parameters
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn steering_angle(&self) -> f64 {
        self.steering_angle
    }

    pub fn turning_speed(&self) -> f64 {
        self.turning_speed
    }

    pub fn odometry(&self) -> &Odometry {
        &self.odometry
    }

    pub fn root(&self) -> &Component {
        &self.root
    }

    /// Composes a transform onto the scene root, e.g. a viewport transform
    /// mapping simulation units to pixels.
    pub fn apply_transform(&mut self, transform: AffineTransform) -> &mut Self {
        self.root.apply_transform(transform);
        self
    }

    /// Every shape of the scene, mapped through the full transform chain.
    pub fn shapes_in_world_coordinates(&self) -> Box<dyn Iterator<Item = Shape> + '_> {
        self.root.shapes_in_world_coordinates()
    }

    // ==================== Time ====================

    /// Advances the simulation by `time_elapsed` seconds.
    ///
    /// The steering angle first ramps at the current turning speed, clamped
    /// to its limits, and the tick then integrates with the ramped angle
    /// held constant. Time only moves forward; a negative step fails
    /// without touching any state.
    pub fn move_forward_in_time(&mut self, time_elapsed: f64) -> Result<&mut Self, BoundsError> {
        check_bounds("time step", time_elapsed, 0.0, f64::INFINITY)?;
        self.steering_angle = (self.steering_angle + self.turning_speed * time_elapsed).clamp(
            self.parameters.min_steering_angle,
            self.parameters.max_steering_angle,
        );
        self.odometry = next_odometry(
            &self.odometry,
            time_elapsed,
            self.speed,
            self.parameters.robot_measurements.wheel_base,
            self.steering_angle,
        );
        self.sync_rig();
        Ok(self)
    }

    // ==================== Driving controls ====================

    /// Starts driving forward at `speed`, or at the default speed when
    /// `None`. The magnitude must be non-negative and within the speed
    /// limit.
    pub fn start_moving_forward(&mut self, speed: Option<f64>) -> Result<&mut Self, BoundsError> {
        let magnitude = self.forward_magnitude("speed", speed, self.parameters.default_speed)?;
        self.speed = check_bounds(
            "speed",
            magnitude,
            self.parameters.min_speed,
            self.parameters.max_speed,
        )?;
        Ok(self)
    }

    /// Starts driving backward at `speed` (a non-negative magnitude), or at
    /// the default speed when `None`.
    pub fn start_moving_backward(&mut self, speed: Option<f64>) -> Result<&mut Self, BoundsError> {
        let magnitude = self.forward_magnitude("speed", speed, self.parameters.default_speed)?;
        self.speed = check_bounds(
            "speed",
            -magnitude,
            self.parameters.min_speed,
            self.parameters.max_speed,
        )?;
        Ok(self)
    }

    pub fn stop_moving(&mut self) -> &mut Self {
        self.speed = 0.0;
        self
    }

    /// Starts ramping the steering angle counterclockwise at
    /// `turning_speed`, or at the default turning speed when `None`.
    pub fn start_turning_counterclockwise(
        &mut self,
        turning_speed: Option<f64>,
    ) -> Result<&mut Self, BoundsError> {
        let magnitude = self.forward_magnitude(
            "turning speed",
            turning_speed,
            self.parameters.default_turning_speed,
        )?;
        self.turning_speed = check_bounds(
            "turning speed",
            magnitude,
            self.parameters.min_turning_speed,
            self.parameters.max_turning_speed,
        )?;
        Ok(self)
    }

    /// Starts ramping the steering angle clockwise at `turning_speed`, or at
    /// the default turning speed when `None`.
    pub fn start_turning_clockwise(
        &mut self,
        turning_speed: Option<f64>,
    ) -> Result<&mut Self, BoundsError> {
        let magnitude = self.forward_magnitude(
            "turning speed",
            turning_speed,
            self.parameters.default_turning_speed,
        )?;
        self.turning_speed = check_bounds(
            "turning speed",
            -magnitude,
            self.parameters.min_turning_speed,
            self.parameters.max_turning_speed,
        )?;
        Ok(self)
    }

    pub fn stop_turning(&mut self) -> &mut Self {
        self.turning_speed = 0.0;
        self
    }

    // ==================== Direct setters ====================

    /// Sets the speed exactly; out-of-range values fail.
    pub fn set_speed(&mut self, speed: f64) -> Result<&mut Self, BoundsError> {
        self.speed = check_bounds(
            "speed",
            speed,
            self.parameters.min_speed,
            self.parameters.max_speed,
        )?;
        Ok(self)
    }

    /// Sets the speed clamped into range; returns the value applied.
    pub fn set_bounded_speed(&mut self, speed: f64) -> f64 {
        self.speed = speed.clamp(self.parameters.min_speed, self.parameters.max_speed);
        self.speed
    }

    /// Sets the steering angle exactly; out-of-range values fail.
    pub fn set_steering_angle(&mut self, steering_angle: f64) -> Result<&mut Self, BoundsError> {
        self.steering_angle = check_bounds(
            "steering angle",
            steering_angle,
            self.parameters.min_steering_angle,
            self.parameters.max_steering_angle,
        )?;
        self.sync_rig();
        Ok(self)
    }

    /// Sets the steering angle clamped into range; returns the value
    /// applied.
    pub fn set_bounded_steering_angle(&mut self, steering_angle: f64) -> f64 {
        self.steering_angle = steering_angle.clamp(
            self.parameters.min_steering_angle,
            self.parameters.max_steering_angle,
        );
        self.sync_rig();
        self.steering_angle
    }

    /// Sets the turning speed exactly; out-of-range values fail.
    pub fn set_turning_speed(&mut self, turning_speed: f64) -> Result<&mut Self, BoundsError> {
        self.turning_speed = check_bounds(
            "turning speed",
            turning_speed,
            self.parameters.min_turning_speed,
            self.parameters.max_turning_speed,
        )?;
        Ok(self)
    }

    /// Sets the turning speed clamped into range; returns the value applied.
    pub fn set_bounded_turning_speed(&mut self, turning_speed: f64) -> f64 {
        self.turning_speed = turning_speed.clamp(
            self.parameters.min_turning_speed,
            self.parameters.max_turning_speed,
        );
        self.turning_speed
    }

    fn forward_magnitude(
        &self,
        quantity: &'static str,
        value: Option<f64>,
        default: f64,
    ) -> Result<f64, BoundsError> {
        check_bounds(quantity, value.unwrap_or(default), 0.0, f64::INFINITY)
    }

    fn sync_rig(&mut self) {
        let robot = self
            .root
            .child_mut(robot::ROBOT)
            .expect("simulation root keeps its robot child");
        robot::set_pose(robot, self.odometry.translation, self.odometry.rotation);
        robot::set_steering_angle(
            robot,
            &self.parameters.robot_measurements,
            self.steering_angle,
        )
        .expect("simulation owns a well-formed robot rig");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::ApproxEq;

    // ==================== Construction ====================

    #[test]
    fn new_simulation_is_at_rest() {
        let sim = Simulation::new();
        assert_eq!(sim.speed(), 0.0);
        assert_eq!(sim.steering_angle(), 0.0);
        assert_eq!(sim.turning_speed(), 0.0);
        assert_eq!(sim.odometry().translation, Vector2::zero());
        assert_eq!(sim.odometry().rotation, PI);
        assert!(sim.root().child(robot::ROBOT).is_some());
    }

    // ==================== Bounds ====================

    #[test]
    fn strict_setters_reject_out_of_range_values() {
        let mut sim = Simulation::new();
        let max = sim.parameters().max_speed;
        assert_eq!(
            sim.set_speed(max + 10.0).unwrap_err(),
            BoundsError::AboveUpperBound {
                quantity: "speed",
                value: max + 10.0,
                bound: max,
            }
        );
        assert!(matches!(
            sim.set_steering_angle(-10.0).unwrap_err(),
            BoundsError::BelowLowerBound { .. }
        ));
        assert!(matches!(
            sim.set_turning_speed(100.0).unwrap_err(),
            BoundsError::AboveUpperBound { .. }
        ));
        // Failed setters leave state untouched.
        assert_eq!(sim.speed(), 0.0);
        assert_eq!(sim.steering_angle(), 0.0);
        assert_eq!(sim.turning_speed(), 0.0);
    }

    #[test]
    fn bounded_setters_clamp_into_range() {
        let mut sim = Simulation::new();
        let max = sim.parameters().max_speed;
        assert_eq!(sim.set_bounded_speed(max + 10.0), max);
        assert_eq!(sim.speed(), max);
        let min_angle = sim.parameters().min_steering_angle;
        assert_eq!(sim.set_bounded_steering_angle(-10.0), min_angle);
        let max_turn = sim.parameters().max_turning_speed;
        assert_eq!(sim.set_bounded_turning_speed(100.0), max_turn);
    }

    #[test]
    fn negative_time_step_fails() {
        let mut sim = Simulation::new();
        assert!(matches!(
            sim.move_forward_in_time(-0.1).unwrap_err(),
            BoundsError::BelowLowerBound { .. }
        ));
        assert_eq!(sim.odometry().translation, Vector2::zero());
    }

    #[test]
    fn negative_magnitudes_fail() {
        let mut sim = Simulation::new();
        assert!(sim.start_moving_forward(Some(-0.1)).is_err());
        assert!(sim.start_moving_backward(Some(-0.1)).is_err());
        assert!(sim.start_turning_clockwise(Some(-0.1)).is_err());
        assert!(sim.start_turning_counterclockwise(Some(-0.1)).is_err());
    }

    // ==================== Driving ====================

    #[test]
    fn forward_and_backward_set_signed_speed() {
        let mut sim = Simulation::new();
        sim.start_moving_forward(None).unwrap();
        assert_eq!(sim.speed(), sim.parameters().default_speed);
        sim.start_moving_backward(Some(0.2)).unwrap();
        assert_eq!(sim.speed(), -0.2);
        sim.stop_moving();
        assert_eq!(sim.speed(), 0.0);
    }

    #[test]
    fn ticking_moves_the_robot_node() {
        let mut sim = Simulation::new();
        sim.start_moving_forward(None).unwrap();
        sim.move_forward_in_time(1.0).unwrap();
        // Heading pi sends forward motion along world -y.
        assert!(sim
            .odometry()
            .translation
            .approx_eq(&Vector2::new(0.0, -0.4), 1e-10));
        let robot = sim.root().child(robot::ROBOT).unwrap();
        assert!(robot
            .transform()
            .apply(&Vector2::zero())
            .approx_eq(&sim.odometry().translation, 1e-10));
    }

    #[test]
    fn steering_ramps_at_the_turning_speed() {
        let mut sim = Simulation::new();
        sim.start_turning_counterclockwise(None).unwrap();
        sim.move_forward_in_time(0.1).unwrap();
        let expected = sim.parameters().default_turning_speed * 0.1;
        assert!(sim.steering_angle().approx_eq(&expected, 1e-10));

        // A long enough ramp saturates at the steering limit.
        sim.move_forward_in_time(10.0).unwrap();
        assert_eq!(sim.steering_angle(), sim.parameters().max_steering_angle);
    }

    #[test]
    fn steering_ramp_happens_before_integration() {
        let mut sim = Simulation::new();
        sim.start_moving_forward(None).unwrap();
        sim.start_turning_counterclockwise(None).unwrap();
        sim.move_forward_in_time(0.5).unwrap();

        let mut reference = Simulation::new();
        reference.start_moving_forward(None).unwrap();
        let ramped = reference.parameters().default_turning_speed * 0.5;
        reference.set_steering_angle(ramped).unwrap();
        reference.move_forward_in_time(0.5).unwrap();

        assert!(sim
            .odometry()
            .translation
            .approx_eq(&reference.odometry().translation, 1e-10));
        assert!(sim
            .odometry()
            .rotation
            .approx_eq(&reference.odometry().rotation, 1e-10));
    }

    #[test]
    fn stopped_simulation_does_not_drift() {
        let mut sim = Simulation::new();
        sim.move_forward_in_time(100.0).unwrap();
        assert_eq!(sim.odometry().translation, Vector2::zero());
    }

    // ==================== Scene output ====================

    #[test]
    fn scene_reflects_the_latest_pose() {
        let mut sim = Simulation::new();
        let before: Vec<_> = sim
            .shapes_in_world_coordinates()
            .map(|s| s.vertices())
            .collect();
        sim.start_moving_forward(None).unwrap();
        sim.move_forward_in_time(1.0).unwrap();
        let after: Vec<_> = sim
            .shapes_in_world_coordinates()
            .map(|s| s.vertices())
            .collect();
        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    fn viewport_transform_scales_every_shape() {
        use crate::geometry::scale;
        let mut sim = Simulation::new();
        let before: Vec<_> = sim.shapes_in_world_coordinates().collect();
        sim.apply_transform(scale(500.0));
        let after: Vec<_> = sim.shapes_in_world_coordinates().collect();
        for (b, a) in before.iter().zip(&after) {
            for (bv, av) in b.vertices().iter().zip(a.vertices()) {
                assert!((*bv * 500.0).approx_eq(&av, 1e-6));
            }
        }
    }
}
