/// Default threshold for approximate floating-point comparisons.
pub const EPSILON: f64 = 1e-10;

/// Stand-in turning radius when the steering angle is exactly zero: large
/// enough that the heading change per tick underflows to nothing, but finite
/// so downstream arithmetic never divides by zero or produces NaN.
pub const STRAIGHT_LINE_TURNING_RADIUS: f64 = f64::MAX;

/// Scale factor from simulation units (metres) to pixels, for the demo
/// driver's viewport transform.
pub const PIXELS_PER_SIMULATION_UNIT: f64 = 500.0;
